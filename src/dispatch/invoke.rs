//! One typed invocation: bind, apply optionality, call, emit.

use crate::binding::{self, Binding, RequestContext};
use crate::dispatch::emitted::{emit, Emitted};
use crate::error::{Error, Result};
use crate::handler::{Handler, HandlerDescriptor, Shape};
use crate::lifecycle::Cancellation;

/// Run `handler` for `ctx` under `descriptor`.
///
/// The handler future is raced against `cancellation`; if shutdown wins the
/// future is dropped and `Cancelled` is returned.
pub(crate) async fn invoke<H: Handler>(
    handler: &H,
    descriptor: &HandlerDescriptor,
    ctx: &RequestContext,
    cancellation: Cancellation,
) -> Result<Emitted> {
    let origin = descriptor.origin();
    let request = match binding::bind::<H::Request>(ctx, origin)? {
        Binding::Bound(value) => value,
        Binding::NotBound => H::Request::absent().ok_or(Error::BadRequest {
            shape: descriptor.request().name(),
            origin,
        })?,
    };

    if cancellation.is_cancelled() {
        return Err(Error::Cancelled);
    }

    let response = tokio::select! {
        biased;
        _ = cancellation.cancelled() => return Err(Error::Cancelled),
        result = handler.handle(request, cancellation.clone()) => result?,
    };

    emit(response)
}
