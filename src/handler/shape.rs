//! Request and response shapes.
//!
//! A shape is the static type a handler accepts or returns. Request shapes
//! know how to bind themselves for each policy; the set of adapters is
//! closed and chosen by type at registration, never built at runtime.

use serde::de::DeserializeOwned;
use std::any::TypeId;
use uuid::Uuid;

use crate::binding::{self, Binding, BindingPolicy, Primitive, RequestContext};
use crate::error::{Error, Result};

/// Scalar families a bare primitive shape can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveKind {
    Integer,
    Float,
    Boolean,
    Text,
    Uuid,
}

/// Structural category of a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    /// A struct bound field-by-field.
    Composite,
    /// A bare scalar.
    Primitive(PrimitiveKind),
    /// The raw request context itself.
    Context,
    /// A serialized handler result.
    Response,
}

/// Static metadata describing one shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeDescriptor {
    name: &'static str,
    type_id: TypeId,
    kind: ShapeKind,
    optional: bool,
}

impl ShapeDescriptor {
    /// Describe a required shape of type `T`.
    pub fn of<T: 'static>(kind: ShapeKind) -> Self {
        Self {
            name: short_type_name::<T>(),
            type_id: TypeId::of::<T>(),
            kind,
            optional: false,
        }
    }

    /// Describe a handler response type.
    pub fn response<T: 'static>() -> Self {
        Self::of::<T>(ShapeKind::Response)
    }

    /// The same shape wrapped in `Option`. Keeps the inner name.
    pub fn optional<T: 'static>(inner: ShapeDescriptor) -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            optional: true,
            ..inner
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    pub fn is_optional(&self) -> bool {
        self.optional
    }
}

/// Type name without its module path: `my_app::ListRequest` → `ListRequest`.
fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    if full.contains('<') {
        return full;
    }
    full.rsplit("::").next().unwrap_or(full)
}

/// A type a handler can receive as its request.
pub trait Shape: Send + Sized + 'static {
    fn descriptor() -> ShapeDescriptor;

    /// Read the value from the origin chosen by `policy`.
    fn bind(ctx: &RequestContext, policy: BindingPolicy) -> Result<Binding<Self>>;

    /// Value used when nothing was bound. `None` means the shape is required.
    fn absent() -> Option<Self> {
        None
    }
}

/// Marker for structs bound from a JSON body or field-by-field from text pairs.
///
/// ```ignore
/// #[derive(Deserialize)]
/// struct ListRequest { page: u32, page_size: Option<u32> }
///
/// impl Composite for ListRequest {}
/// ```
pub trait Composite: DeserializeOwned + Send + 'static {}

impl<T: Composite> Shape for T {
    fn descriptor() -> ShapeDescriptor {
        ShapeDescriptor::of::<T>(ShapeKind::Composite)
    }

    fn bind(ctx: &RequestContext, policy: BindingPolicy) -> Result<Binding<Self>> {
        let shape = short_type_name::<T>();
        match policy.resolve() {
            BindingPolicy::Body => binding::bind_json(ctx, shape),
            origin @ (BindingPolicy::QueryString | BindingPolicy::RouteValues) => {
                binding::bind_map(binding::pairs_for(ctx, origin)?, origin, shape)
            }
            other => Err(Error::NotSupported(other)),
        }
    }
}

impl<T: Shape> Shape for Option<T> {
    fn descriptor() -> ShapeDescriptor {
        ShapeDescriptor::optional::<Self>(T::descriptor())
    }

    fn bind(ctx: &RequestContext, policy: BindingPolicy) -> Result<Binding<Self>> {
        Ok(T::bind(ctx, policy)?.map(Some))
    }

    fn absent() -> Option<Self> {
        Some(None)
    }
}

/// Handlers that want the whole request receive a clone of the context.
impl Shape for RequestContext {
    fn descriptor() -> ShapeDescriptor {
        ShapeDescriptor::of::<RequestContext>(ShapeKind::Context)
    }

    fn bind(ctx: &RequestContext, _policy: BindingPolicy) -> Result<Binding<Self>> {
        Ok(Binding::Bound(ctx.clone()))
    }
}

macro_rules! primitive_shape {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Shape for $ty {
                fn descriptor() -> ShapeDescriptor {
                    ShapeDescriptor::of::<$ty>(ShapeKind::Primitive(<$ty as Primitive>::KIND))
                }

                fn bind(ctx: &RequestContext, policy: BindingPolicy) -> Result<Binding<Self>> {
                    let shape = short_type_name::<$ty>();
                    match policy.resolve() {
                        BindingPolicy::Body => binding::bind_json(ctx, shape),
                        origin @ (BindingPolicy::QueryString | BindingPolicy::RouteValues) => {
                            binding::bind_first(binding::pairs_for(ctx, origin)?, shape)
                        }
                        other => Err(Error::NotSupported(other)),
                    }
                }
            }
        )*
    };
}

primitive_shape!(i8, i16, i32, i64, u8, u16, u32, u64, f32, f64, bool, String, Uuid);

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct ListRequest {
        #[allow(dead_code)]
        page: u32,
    }

    impl Composite for ListRequest {}

    #[test]
    fn test_descriptor_kinds() {
        let composite = ListRequest::descriptor();
        assert_eq!(composite.name(), "ListRequest");
        assert_eq!(composite.kind(), ShapeKind::Composite);
        assert!(!composite.is_optional());

        assert_eq!(
            u64::descriptor().kind(),
            ShapeKind::Primitive(PrimitiveKind::Integer)
        );
        assert_eq!(
            Uuid::descriptor().kind(),
            ShapeKind::Primitive(PrimitiveKind::Uuid)
        );
        assert_eq!(RequestContext::descriptor().kind(), ShapeKind::Context);
    }

    #[test]
    fn test_optional_descriptor_differs_from_required() {
        let required = ListRequest::descriptor();
        let optional = <Option<ListRequest>>::descriptor();

        assert!(optional.is_optional());
        assert_eq!(optional.name(), "ListRequest");
        assert_eq!(optional.kind(), ShapeKind::Composite);
        assert_ne!(required, optional);
    }

    #[test]
    fn test_absent_values() {
        assert!(ListRequest::absent().is_none());
        assert!(matches!(<Option<ListRequest>>::absent(), Some(None)));
    }
}
