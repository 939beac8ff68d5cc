//! Handler registration and lookup.
//!
//! # Responsibilities
//! - Hold `(pattern, verb) → descriptor + endpoint`
//! - Reject bad registrations at startup, before any traffic
//! - Freeze into an immutable registry for the serving phase
//!
//! # Design Decisions
//! - Two types: a mutable `RegistryBuilder` and a sealed `Registry`;
//!   only the sealed one can be served, so registration can never race
//!   with dispatch
//! - Failed registrations leave the builder untouched
//! - Routes keep registration order for deterministic router building

use axum::http::Method;
use std::collections::HashMap;
use std::sync::Arc;

use crate::binding::BindingPolicy;
use crate::error::{Error, Result};
use crate::handler::{Handler, HandlerDescriptor, Reply, ShapeKind};
use crate::routing::crud::CrudBuilder;
use crate::routing::endpoint::{Endpoint, TypedEndpoint};
use crate::routing::pattern::route_params;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct RouteKey {
    pattern: String,
    method: Method,
}

/// A resolved route: its descriptor and the endpoint that serves it.
#[derive(Clone)]
pub struct Registration {
    descriptor: HandlerDescriptor,
    endpoint: Arc<dyn Endpoint>,
}

impl Registration {
    pub fn descriptor(&self) -> &HandlerDescriptor {
        &self.descriptor
    }

    pub fn endpoint(&self) -> &Arc<dyn Endpoint> {
        &self.endpoint
    }
}

impl std::fmt::Debug for Registration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registration")
            .field("descriptor", &self.descriptor)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Default)]
struct Routes {
    entries: HashMap<RouteKey, Registration>,
    order: Vec<RouteKey>,
}

impl Routes {
    fn resolve(&self, pattern: &str, method: &Method) -> Result<&Registration> {
        let key = RouteKey {
            pattern: pattern.to_string(),
            method: method.clone(),
        };
        self.entries.get(&key).ok_or_else(|| Error::NotFound {
            pattern: pattern.to_string(),
            method: method.clone(),
        })
    }

    fn iter(&self) -> impl Iterator<Item = (&str, &Method)> {
        self.order
            .iter()
            .map(|key| (key.pattern.as_str(), &key.method))
    }
}

/// Mutable registry used during startup.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    routes: Routes,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for `pattern` + `method` under an explicit descriptor.
    ///
    /// Fails with `Configuration` for a duplicate route, a malformed pattern
    /// or a descriptor whose shapes differ from the handler's, and with
    /// `NotSupported` for a reserved policy.
    pub fn register<H: Handler>(
        &mut self,
        pattern: impl Into<String>,
        method: Method,
        descriptor: HandlerDescriptor,
        handler: H,
    ) -> Result<&mut Self> {
        let pattern = pattern.into();
        let endpoint = TypedEndpoint::new(handler);

        let params = route_params(&pattern).map_err(Error::Configuration)?;
        let policy = descriptor.policy();
        if !policy.is_supported() {
            return Err(Error::NotSupported(policy));
        }
        if policy.resolve() == BindingPolicy::RouteValues
            && descriptor.request().kind() != ShapeKind::Context
            && params.is_empty()
        {
            return Err(Error::Configuration(format!(
                "{method} {pattern}: policy `{policy}` needs at least one {{param}} in the pattern"
            )));
        }

        let declared_request = endpoint.request_shape();
        if *descriptor.request() != declared_request {
            return Err(Error::Configuration(format!(
                "{method} {pattern}: descriptor declares request {} but the handler accepts {}",
                describe(descriptor.request().name(), descriptor.request().is_optional()),
                describe(declared_request.name(), declared_request.is_optional()),
            )));
        }
        let declared_response = endpoint.response_shape();
        if *descriptor.response() != declared_response {
            return Err(Error::Configuration(format!(
                "{method} {pattern}: descriptor declares response {} but the handler returns {}",
                descriptor.response().name(),
                declared_response.name(),
            )));
        }

        let key = RouteKey {
            pattern,
            method,
        };
        if self.routes.entries.contains_key(&key) {
            return Err(Error::Configuration(format!(
                "{} {} is already registered",
                key.method, key.pattern
            )));
        }

        tracing::debug!(
            pattern = %key.pattern,
            method = %key.method,
            request = descriptor.request().name(),
            response = descriptor.response().name(),
            policy = %policy,
            "Registered endpoint"
        );
        self.routes.order.push(key.clone());
        self.routes.entries.insert(
            key,
            Registration {
                descriptor,
                endpoint: Arc::new(endpoint),
            },
        );
        Ok(self)
    }

    /// Register `handler` with a descriptor built from its own types.
    pub fn route<H: Handler>(
        &mut self,
        pattern: impl Into<String>,
        method: Method,
        policy: BindingPolicy,
        handler: H,
    ) -> Result<&mut Self> {
        self.register(pattern, method, HandlerDescriptor::for_handler::<H>(policy), handler)
    }

    /// Create and read routes for entity `T` under `pattern`.
    pub fn crud<T: Reply>(&mut self, pattern: impl Into<String>) -> CrudBuilder<'_, T> {
        CrudBuilder::new(self, pattern.into())
    }

    pub fn resolve(&self, pattern: &str, method: &Method) -> Result<&Registration> {
        self.routes.resolve(pattern, method)
    }

    pub fn len(&self) -> usize {
        self.routes.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.order.is_empty()
    }

    /// Freeze the registry for serving.
    pub fn seal(self) -> Registry {
        tracing::info!(routes = self.routes.order.len(), "Registry sealed");
        Registry {
            routes: self.routes,
        }
    }
}

/// Immutable registry shared by every dispatch.
pub struct Registry {
    routes: Routes,
}

impl Registry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    pub fn resolve(&self, pattern: &str, method: &Method) -> Result<&Registration> {
        self.routes.resolve(pattern, method)
    }

    /// Registered `(pattern, method)` pairs in registration order.
    pub fn routes(&self) -> impl Iterator<Item = (&str, &Method)> {
        self.routes.iter()
    }

    pub fn len(&self) -> usize {
        self.routes.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.order.is_empty()
    }
}

fn describe(name: &str, optional: bool) -> String {
    if optional {
        format!("Option<{name}>")
    } else {
        name.to_string()
    }
}
