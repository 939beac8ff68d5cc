//! Dispatch output.

use axum::http::{HeaderValue, StatusCode};
use bytes::Bytes;

use crate::error::Result;
use crate::handler::Reply;

/// What a successful dispatch produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Emitted {
    /// A handler value encoded as JSON.
    Json(Bytes),
    /// A body the handler formatted itself.
    Raw {
        status: StatusCode,
        content_type: HeaderValue,
        body: Bytes,
    },
    /// The handler returned nothing; no body is written.
    NoContent,
}

impl Emitted {
    /// The encoded body, if any.
    pub fn body(&self) -> Option<&Bytes> {
        match self {
            Emitted::Json(body) | Emitted::Raw { body, .. } => Some(body),
            Emitted::NoContent => None,
        }
    }
}

/// Encode a handler result. `None` is never serialized.
pub fn emit<T: Reply>(value: Option<T>) -> Result<Emitted> {
    match value {
        Some(value) => value.into_emitted(),
        None => Ok(Emitted::NoContent),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::handler::{Content, JsonReply};
    use serde::ser::Error as _;
    use serde::Serialize;
    use serde_json::json;

    struct Unencodable;

    impl Serialize for Unencodable {
        fn serialize<S: serde::Serializer>(&self, _: S) -> std::result::Result<S::Ok, S::Error> {
            Err(S::Error::custom("refusing to encode"))
        }
    }

    impl JsonReply for Unencodable {}

    #[test]
    fn test_some_value_is_json() {
        let emitted = emit(Some(json!({ "hello": "world" }))).unwrap();
        let body = emitted.body().unwrap();
        let decoded: serde_json::Value = serde_json::from_slice(body).unwrap();
        assert_eq!(decoded, json!({ "hello": "world" }));
    }

    #[test]
    fn test_none_is_no_content() {
        let emitted = emit::<Unencodable>(None).unwrap();
        assert_eq!(emitted, Emitted::NoContent);
        assert!(emitted.body().is_none());
    }

    #[test]
    fn test_content_keeps_its_body() {
        let emitted = emit(Some(Content::text("plain"))).unwrap();
        assert!(matches!(emitted, Emitted::Raw { status, .. } if status == StatusCode::OK));
        assert_eq!(emitted.body().unwrap().as_ref(), b"plain");
    }

    #[test]
    fn test_encoding_failure_is_serialization_error() {
        let err = emit(Some(Unencodable)).unwrap_err();
        assert!(matches!(err, Error::Serialization(_)));
    }
}
