//! Type-erased endpoints.
//!
//! `TypedEndpoint<H>` keeps the handler's concrete types; `Endpoint` is the
//! object-safe face the registry stores as `Arc<dyn Endpoint>`.

use async_trait::async_trait;

use crate::binding::RequestContext;
use crate::dispatch::{self, Emitted};
use crate::error::Result;
use crate::handler::{Handler, HandlerDescriptor, Reply, Shape, ShapeDescriptor};
use crate::lifecycle::Cancellation;

/// Object-safe view of a registered handler.
#[async_trait]
pub trait Endpoint: Send + Sync {
    /// Bind, check optionality, invoke and emit for one request.
    async fn call(
        &self,
        descriptor: &HandlerDescriptor,
        ctx: &RequestContext,
        cancellation: Cancellation,
    ) -> Result<Emitted>;

    /// Request shape the wrapped handler accepts.
    fn request_shape(&self) -> ShapeDescriptor;

    /// Response shape the wrapped handler produces.
    fn response_shape(&self) -> ShapeDescriptor;
}

/// Adapter chosen at registration for a concrete handler type.
pub struct TypedEndpoint<H: Handler> {
    handler: H,
}

impl<H: Handler> TypedEndpoint<H> {
    pub fn new(handler: H) -> Self {
        Self { handler }
    }
}

#[async_trait]
impl<H: Handler> Endpoint for TypedEndpoint<H> {
    async fn call(
        &self,
        descriptor: &HandlerDescriptor,
        ctx: &RequestContext,
        cancellation: Cancellation,
    ) -> Result<Emitted> {
        dispatch::invoke(&self.handler, descriptor, ctx, cancellation).await
    }

    fn request_shape(&self) -> ShapeDescriptor {
        H::Request::descriptor()
    }

    fn response_shape(&self) -> ShapeDescriptor {
        <H::Response as Reply>::descriptor()
    }
}
