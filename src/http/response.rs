//! Response handling and transformation.
//!
//! # Responsibilities
//! - Encode emitted values as HTTP responses (JSON, handler-formatted, empty)
//! - Map dispatch errors to appropriate HTTP status codes
//!
//! # Design Decisions
//! - Status follows `ErrorClass`, so new error variants only need a class
//! - Error bodies are JSON `{ "error": ..., "kind": ... }`

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::dispatch::Emitted;
use crate::error::{Error, ErrorClass};

/// HTTP status for a dispatch error.
pub fn status_for(error: &Error) -> StatusCode {
    match error.class() {
        ErrorClass::Client => StatusCode::BAD_REQUEST,
        ErrorClass::NotFound => StatusCode::NOT_FOUND,
        ErrorClass::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorClass::Server => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for Emitted {
    fn into_response(self) -> Response {
        match self {
            Emitted::Json(body) => (
                StatusCode::OK,
                [(
                    header::CONTENT_TYPE,
                    HeaderValue::from_static("application/json"),
                )],
                body,
            )
                .into_response(),
            Emitted::Raw {
                status,
                content_type,
                body,
            } => (status, [(header::CONTENT_TYPE, content_type)], body).into_response(),
            Emitted::NoContent => StatusCode::NO_CONTENT.into_response(),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = status_for(&self);
        let body = Json(json!({
            "error": self.to_string(),
            "kind": self.kind(),
        }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::BindingPolicy;
    use crate::error::HandlerError;
    use axum::http::Method;

    #[test]
    fn test_status_mapping() {
        let bad_request = Error::BadRequest {
            shape: "Person",
            origin: BindingPolicy::QueryString,
        };
        assert_eq!(status_for(&bad_request), StatusCode::BAD_REQUEST);

        let conversion = Error::Conversion {
            shape: "u64",
            field: "id".to_string(),
            message: "invalid digit".to_string(),
        };
        assert_eq!(status_for(&conversion), StatusCode::BAD_REQUEST);

        let not_found = Error::NotFound {
            pattern: "/nope".to_string(),
            method: Method::GET,
        };
        assert_eq!(status_for(&not_found), StatusCode::NOT_FOUND);

        assert_eq!(status_for(&Error::Cancelled), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(
            status_for(&Error::Handler(HandlerError::new("boom"))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_for(&Error::NotSupported(BindingPolicy::Form)),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_no_content_has_no_body_type() {
        let response = Emitted::NoContent.into_response();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert!(response.headers().get(header::CONTENT_TYPE).is_none());
    }

    #[test]
    fn test_raw_response_keeps_status_and_type() {
        let response = Emitted::Raw {
            status: StatusCode::CREATED,
            content_type: HeaderValue::from_static("text/csv"),
            body: bytes::Bytes::from_static(b"id,name"),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(response.headers().get(header::CONTENT_TYPE).unwrap(), "text/csv");
    }

    #[test]
    fn test_json_response_headers() {
        let response = Emitted::Json(bytes::Bytes::from_static(b"{}")).into_response();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
    }
}
