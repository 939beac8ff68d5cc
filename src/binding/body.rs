//! JSON body binding.

use serde::de::DeserializeOwned;

use crate::binding::{Binding, RequestContext};
use crate::error::{Error, Result};

/// Deserialize the whole body into `T`.
///
/// An empty (or whitespace-only) body, a non-JSON content type and a JSON
/// `null` all mean "nothing sent" and yield `NotBound`. Anything else that
/// fails to parse is a `Deserialization` error.
pub fn bind_json<T: DeserializeOwned>(ctx: &RequestContext, shape: &'static str) -> Result<Binding<T>> {
    let body = ctx.body();
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Binding::NotBound);
    }
    if !ctx.has_json_content_type() {
        tracing::debug!(
            shape,
            content_type = ctx.content_type().unwrap_or("<none>"),
            "Body present without a JSON content type; not binding"
        );
        return Ok(Binding::NotBound);
    }

    let value: Option<T> =
        serde_json::from_slice(body).map_err(|source| Error::Deserialization { shape, source })?;
    Ok(value.into())
}
