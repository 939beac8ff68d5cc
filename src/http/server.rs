//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with one route per registered pattern
//! - Wire up middleware (tracing, timeout, body limit, request ID)
//! - Bind server to listener
//! - Hand each request to the dispatcher and encode the outcome

use axum::{
    extract::{DefaultBodyLimit, Request, State},
    http::Method,
    response::{IntoResponse, Response},
    routing::{MethodFilter, MethodRouter},
    Router,
};
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::Instrument;

use crate::config::ServerConfig;
use crate::dispatch::Dispatcher;
use crate::error::{Error, Result};
use crate::http::request::into_context;
use crate::lifecycle::Cancellation;
use crate::routing::Registry;

/// Header carrying the per-request correlation id.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Application state injected into handlers.
#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) dispatcher: Dispatcher,
}

/// HTTP host for a sealed registry.
pub struct HttpServer {
    router: Router,
    config: ServerConfig,
}

impl HttpServer {
    /// Build the host. Fails when a registered route cannot be served over HTTP.
    pub fn new(config: ServerConfig, registry: Registry, cancellation: Cancellation) -> Result<Self> {
        let dispatcher = Dispatcher::new(Arc::new(registry)).with_cancellation(cancellation);
        let router = Self::build_router(&config, AppState { dispatcher })?;
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ServerConfig, state: AppState) -> Result<Router> {
        let mut order: Vec<String> = Vec::new();
        let mut methods: HashMap<String, MethodRouter<AppState>> = HashMap::new();
        let mut shapes: HashMap<String, String> = HashMap::new();

        for (pattern, method) in state.dispatcher.registry().routes() {
            let filter = MethodFilter::try_from(method.clone()).map_err(|_| {
                Error::Configuration(format!("{method} {pattern}: verb cannot be routed over HTTP"))
            })?;

            let shape = capture_shape(pattern);
            match shapes.get(&shape) {
                Some(existing) if existing != pattern => {
                    return Err(Error::Configuration(format!(
                        "{pattern} conflicts with {existing}; captures at the same position must share a name"
                    )));
                }
                Some(_) => {}
                None => {
                    shapes.insert(shape, pattern.to_string());
                }
            }

            // axum answers HEAD with the GET route, so dispatch by the
            // registered verb rather than the wire verb.
            let route_pattern: Arc<str> = Arc::from(pattern);
            let route_method = method.clone();
            let handler = move |State(state): State<AppState>, request: Request| {
                let pattern = route_pattern.clone();
                let method = route_method.clone();
                async move { serve_route(state, pattern, method, request).await }
            };

            let entry = match methods.remove(pattern) {
                Some(existing) => existing.on(filter, handler),
                None => {
                    order.push(pattern.to_string());
                    MethodRouter::new().on(filter, handler)
                }
            };
            methods.insert(pattern.to_string(), entry);
        }

        let mut router = Router::new();
        for pattern in order {
            if let Some(method_router) = methods.remove(&pattern) {
                tracing::debug!(pattern = %pattern, "Mounted route");
                router = router.route(&pattern, method_router);
            }
        }

        Ok(router
            .with_state(state)
            .layer(DefaultBodyLimit::max(config.limits.max_body_bytes))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid)))
    }

    /// The configured router, for serving or driving directly in tests.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` resolves, then drain open connections.
    pub async fn run<F>(self, listener: TcpListener, shutdown: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            request_timeout_secs = self.config.timeouts.request_secs,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Pattern with capture names erased: `/items/{id}` → `/items/{}`.
fn capture_shape(pattern: &str) -> String {
    pattern
        .split('/')
        .map(|segment| match segment.strip_prefix('{') {
            Some(rest) if rest.starts_with('*') => "{*}",
            Some(_) => "{}",
            None => segment,
        })
        .collect::<Vec<_>>()
        .join("/")
}

async fn serve_route(state: AppState, pattern: Arc<str>, method: Method, request: Request) -> Response {
    let request_id = request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string();

    let span = tracing::info_span!(
        "dispatch",
        request_id = %request_id,
        pattern = %pattern,
        method = %method,
    );

    async move {
        let ctx = match into_context(request).await {
            Ok(ctx) => ctx,
            Err(rejection) => {
                tracing::warn!(status = %rejection.status(), "Request rejected before dispatch");
                return rejection;
            }
        };

        match state.dispatcher.dispatch(&pattern, &method, &ctx).await {
            Ok(emitted) => emitted.into_response(),
            Err(e) => e.into_response(),
        }
    }
    .instrument(span)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_shape_erases_names() {
        assert_eq!(capture_shape("/items/{id}"), "/items/{}");
        assert_eq!(capture_shape("/files/{*path}"), "/files/{*}");
        assert_eq!(capture_shape("/"), "/");
    }
}
