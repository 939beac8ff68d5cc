//! The handler contract: one request shape in, one optional response out.

use async_trait::async_trait;

use crate::error::HandlerError;
use crate::handler::{Reply, Shape};
use crate::lifecycle::Cancellation;

/// A unit of business logic bound to a route.
///
/// # Example
/// ```ignore
/// struct EchoHandler;
///
/// #[async_trait]
/// impl Handler for EchoHandler {
///     type Request = EchoRequest;
///     type Response = EchoResponse;
///
///     async fn handle(
///         &self,
///         request: EchoRequest,
///         _cancellation: Cancellation,
///     ) -> Result<Option<EchoResponse>, HandlerError> {
///         Ok(Some(EchoResponse { id: request.id, text: request.text }))
///     }
/// }
/// ```
///
/// Returning `Ok(None)` emits an empty success; nothing is encoded.
/// Dependencies (stores, clients) are fields of the handler, injected when
/// it is constructed for registration.
#[async_trait]
pub trait Handler: Send + Sync + 'static {
    /// Request shape. Use `Option<T>` to accept requests that carry nothing.
    type Request: Shape;

    /// Response shape: a [`JsonReply`](crate::handler::JsonReply) value or
    /// handler-formatted [`Content`](crate::handler::Content).
    type Response: Reply;

    async fn handle(
        &self,
        request: Self::Request,
        cancellation: Cancellation,
    ) -> Result<Option<Self::Response>, HandlerError>;
}
