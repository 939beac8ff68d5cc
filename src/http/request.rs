//! Request handling and transformation.
//!
//! # Responsibilities
//! - Turn an axum request into a `RequestContext`
//! - Collect route values, query pairs, content type and body
//!
//! # Design Decisions
//! - Body size is enforced by `DefaultBodyLimit`; an oversized body is
//!   rejected with 413 before anything is dispatched
//! - Routes without captures get an empty route-value list

use axum::{
    body::Bytes,
    extract::{rejection::RawPathParamsRejection, FromRequest, FromRequestParts, RawPathParams, Request},
    http::header::CONTENT_TYPE,
    response::{IntoResponse, Response},
};

use crate::binding::RequestContext;

/// Build the dispatch context for `request`, or the rejection to send back.
pub async fn into_context(request: Request) -> Result<RequestContext, Response> {
    let (mut parts, body) = request.into_parts();

    let route_values: Vec<(String, String)> =
        match RawPathParams::from_request_parts(&mut parts, &()).await {
            Ok(params) => params
                .iter()
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect(),
            Err(RawPathParamsRejection::MissingPathParams(_)) => Vec::new(),
            Err(rejection) => return Err(rejection.into_response()),
        };

    let mut ctx = RequestContext::new(parts.method.clone(), parts.uri.path());
    if let Some(query) = parts.uri.query() {
        ctx = ctx.with_query_string(query);
    }
    for (name, value) in route_values {
        ctx = ctx.with_route_value(name, value);
    }
    let content_type = parts
        .headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);

    let body = Bytes::from_request(Request::from_parts(parts, body), &())
        .await
        .map_err(IntoResponse::into_response)?;

    Ok(match content_type {
        Some(content_type) => ctx.with_body(content_type, body),
        None => ctx.with_raw_body(body),
    })
}
