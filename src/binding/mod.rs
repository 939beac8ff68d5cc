//! Request binding subsystem.
//!
//! # Data Flow
//! ```text
//! RequestContext (body, query pairs, route values)
//!     → policy.rs (resolve Unspecified → Body)
//!     → body.rs (JSON body → shape)
//!     → text.rs (flat text pairs → composite shape, case-insensitive)
//!     → primitive.rs (first text value → bare scalar)
//!     → Binding::Bound(value) | Binding::NotBound | Error
//! ```
//!
//! # Design Decisions
//! - Exactly one origin is consulted per request
//! - Parse and conversion failures propagate; nothing is defaulted
//! - Absence is not an error here; the dispatcher applies optionality
//! - The binder is stateless and only borrows the context

pub mod body;
pub mod context;
pub mod policy;
pub mod primitive;
pub mod text;

pub use body::bind_json;
pub use context::RequestContext;
pub use policy::{Binding, BindingPolicy};
pub use primitive::Primitive;

use serde::de::DeserializeOwned;

use crate::error::{Error, Result};
use crate::handler::Shape;
use self::text::TextError;

/// Bind a value of shape `T` from the origin selected by `policy`.
pub fn bind<T: Shape>(ctx: &RequestContext, policy: BindingPolicy) -> Result<Binding<T>> {
    T::bind(ctx, policy.resolve())
}

/// The text pairs a mapping-based policy reads from.
pub fn pairs_for(ctx: &RequestContext, policy: BindingPolicy) -> Result<&[(String, String)]> {
    match policy.resolve() {
        BindingPolicy::QueryString => Ok(ctx.query_pairs()),
        BindingPolicy::RouteValues => Ok(ctx.route_values()),
        other => Err(Error::NotSupported(other)),
    }
}

/// Deserialize a composite shape field-by-field from text pairs.
///
/// A missing required field means the origin did not carry the shape and
/// yields `NotBound`; a value that does not convert is a `Conversion` error.
pub fn bind_map<T: DeserializeOwned>(
    pairs: &[(String, String)],
    origin: BindingPolicy,
    shape: &'static str,
) -> Result<Binding<T>> {
    match text::from_pairs::<T>(pairs) {
        Ok(value) => Ok(Binding::Bound(value)),
        Err(TextError::Missing(field)) => {
            tracing::debug!(shape, %origin, field, "Required field absent; not binding");
            Ok(Binding::NotBound)
        }
        Err(TextError::Invalid { field, message }) => Err(Error::Conversion {
            shape,
            field: field.unwrap_or_else(|| origin.to_string()),
            message,
        }),
    }
}

/// Bind a bare scalar from the first pair present.
pub fn bind_first<T: Primitive>(
    pairs: &[(String, String)],
    shape: &'static str,
) -> Result<Binding<T>> {
    let Some((name, text)) = pairs.first() else {
        return Ok(Binding::NotBound);
    };
    T::parse_text(text)
        .map(Binding::Bound)
        .map_err(|message| Error::Conversion {
            shape,
            field: name.clone(),
            message,
        })
}
