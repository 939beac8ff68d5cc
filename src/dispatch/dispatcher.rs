//! Registry-backed dispatcher.

use axum::http::Method;
use std::sync::Arc;
use std::time::Instant;

use crate::binding::RequestContext;
use crate::dispatch::Emitted;
use crate::error::{ErrorClass, Result};
use crate::lifecycle::Cancellation;
use crate::observability::metrics;
use crate::routing::Registry;

/// Resolves `(pattern, verb)` and runs the registered endpoint.
///
/// Cheap to clone; every clone shares the sealed registry.
#[derive(Clone)]
pub struct Dispatcher {
    registry: Arc<Registry>,
    cancellation: Cancellation,
}

impl Dispatcher {
    /// A dispatcher whose handlers are never cancelled.
    pub fn new(registry: Arc<Registry>) -> Self {
        Self {
            registry,
            cancellation: Cancellation::none(),
        }
    }

    /// Tie every dispatch to `cancellation`, usually `Shutdown::cancellation()`.
    pub fn with_cancellation(mut self, cancellation: Cancellation) -> Self {
        self.cancellation = cancellation;
        self
    }

    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    /// Dispatch one request to the handler registered for `pattern` + `method`.
    pub async fn dispatch(
        &self,
        pattern: &str,
        method: &Method,
        ctx: &RequestContext,
    ) -> Result<Emitted> {
        let start = Instant::now();
        let result = self.run(pattern, method, ctx).await;

        match &result {
            Ok(emitted) => {
                let outcome = match emitted {
                    Emitted::Json(_) => "ok",
                    Emitted::Raw { .. } => "raw",
                    Emitted::NoContent => "no_content",
                };
                tracing::debug!(
                    pattern,
                    %method,
                    outcome,
                    bytes = emitted.body().map_or(0, |body| body.len()),
                    "Dispatch succeeded"
                );
                metrics::record_dispatch(pattern, method, outcome, start);
            }
            Err(e) => {
                if e.class() == ErrorClass::Server {
                    tracing::error!(pattern, %method, error = %e, kind = e.kind(), "Dispatch failed");
                } else {
                    tracing::warn!(pattern, %method, error = %e, kind = e.kind(), "Dispatch rejected");
                }
                metrics::record_dispatch(pattern, method, e.kind(), start);
            }
        }

        result
    }

    async fn run(&self, pattern: &str, method: &Method, ctx: &RequestContext) -> Result<Emitted> {
        let registration = self.registry.resolve(pattern, method)?;
        registration
            .endpoint()
            .call(registration.descriptor(), ctx, self.cancellation.clone())
            .await
    }
}
