//! Read-only view of an inbound request.

use axum::http::Method;
use bytes::Bytes;

/// Everything the binder may read from one request.
///
/// The host fills this in once per request; the binder and handlers only
/// borrow it. Cloning is cheap because the body is reference counted.
#[derive(Debug, Clone)]
pub struct RequestContext {
    method: Method,
    path: String,
    content_type: Option<String>,
    body: Bytes,
    query: Vec<(String, String)>,
    route_values: Vec<(String, String)>,
}

impl RequestContext {
    /// Create an empty context for a method and path.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            content_type: None,
            body: Bytes::new(),
            query: Vec::new(),
            route_values: Vec::new(),
        }
    }

    /// Attach a body with its content type.
    pub fn with_body(mut self, content_type: impl Into<String>, body: impl Into<Bytes>) -> Self {
        self.content_type = Some(content_type.into());
        self.body = body.into();
        self
    }

    /// Attach a body whose content type is unknown.
    pub fn with_raw_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    /// Attach a JSON body.
    pub fn with_json(self, value: &serde_json::Value) -> Self {
        let body = value.to_string();
        self.with_body("application/json", body)
    }

    /// Append pairs decoded from a raw (already split off) query string.
    pub fn with_query_string(mut self, raw: &str) -> Self {
        self.query.extend(
            url::form_urlencoded::parse(raw.as_bytes())
                .map(|(key, value)| (key.into_owned(), value.into_owned())),
        );
        self
    }

    pub fn with_query_pair(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    pub fn with_route_value(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.route_values.push((name.into(), value.into()));
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Query pairs in the order they appeared, duplicates included.
    pub fn query_pairs(&self) -> &[(String, String)] {
        &self.query
    }

    /// Route values in path order.
    pub fn route_values(&self) -> &[(String, String)] {
        &self.route_values
    }

    /// True for `application/json` and any `+json` media type.
    pub fn has_json_content_type(&self) -> bool {
        let Some(content_type) = self.content_type.as_deref() else {
            return false;
        };
        let essence = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        essence == "application/json" || essence.ends_with("+json")
    }
}
