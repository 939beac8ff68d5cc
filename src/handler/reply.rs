//! Response shapes.
//!
//! Most handlers return a serializable value that is emitted as JSON.
//! A handler that needs to pick its own status and content type returns
//! [`Content`] instead; it is written to the transport as-is.

use axum::http::{HeaderValue, StatusCode};
use bytes::Bytes;
use serde::Serialize;
use uuid::Uuid;

use crate::dispatch::Emitted;
use crate::error::{Error, Result};
use crate::handler::ShapeDescriptor;

/// A type a handler can return.
pub trait Reply: Send + 'static {
    fn descriptor() -> ShapeDescriptor;

    /// Encode the value for the host.
    fn into_emitted(self) -> Result<Emitted>;
}

/// Marker for values emitted as JSON.
///
/// ```ignore
/// #[derive(Serialize)]
/// struct Item { id: u64, name: String }
///
/// impl JsonReply for Item {}
/// ```
pub trait JsonReply: Serialize + Send + 'static {}

impl<T: JsonReply> Reply for T {
    fn descriptor() -> ShapeDescriptor {
        ShapeDescriptor::response::<T>()
    }

    fn into_emitted(self) -> Result<Emitted> {
        serde_json::to_vec(&self)
            .map(|encoded| Emitted::Json(Bytes::from(encoded)))
            .map_err(Error::Serialization)
    }
}

impl<T: JsonReply> JsonReply for Vec<T> {}

macro_rules! json_reply {
    ($($ty:ty),* $(,)?) => {
        $(impl JsonReply for $ty {})*
    };
}

json_reply!(i8, i16, i32, i64, u8, u16, u32, u64, f32, f64, bool, String, Uuid, serde_json::Value);

/// A response body the handler formats itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Content {
    status: StatusCode,
    content_type: HeaderValue,
    body: Bytes,
}

impl Content {
    pub fn new(status: StatusCode, content_type: HeaderValue, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            content_type,
            body: body.into(),
        }
    }

    /// `200 OK` with a UTF-8 plain-text body.
    pub fn text(body: impl Into<String>) -> Self {
        Self::new(
            StatusCode::OK,
            HeaderValue::from_static("text/plain; charset=utf-8"),
            body.into(),
        )
    }

    /// Replace the status code.
    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }
}

impl Reply for Content {
    fn descriptor() -> ShapeDescriptor {
        ShapeDescriptor::response::<Content>()
    }

    fn into_emitted(self) -> Result<Emitted> {
        Ok(Emitted::Raw {
            status: self.status,
            content_type: self.content_type,
            body: self.body,
        })
    }
}
