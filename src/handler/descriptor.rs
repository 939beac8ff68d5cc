//! Static metadata for one registered operation.

use crate::binding::BindingPolicy;
use crate::handler::{Handler, Reply, Shape, ShapeDescriptor};

/// Declared request/response shapes plus the binding policy.
///
/// Immutable once built; the registry owns one per route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandlerDescriptor {
    request: ShapeDescriptor,
    response: ShapeDescriptor,
    policy: BindingPolicy,
}

impl HandlerDescriptor {
    pub fn new(request: ShapeDescriptor, response: ShapeDescriptor, policy: BindingPolicy) -> Self {
        Self {
            request,
            response,
            policy,
        }
    }

    /// Descriptor derived from a handler's own associated types.
    pub fn for_handler<H: Handler>(policy: BindingPolicy) -> Self {
        Self::new(
            H::Request::descriptor(),
            <H::Response as Reply>::descriptor(),
            policy,
        )
    }

    pub fn request(&self) -> &ShapeDescriptor {
        &self.request
    }

    pub fn response(&self) -> &ShapeDescriptor {
        &self.response
    }

    pub fn policy(&self) -> BindingPolicy {
        self.policy
    }

    /// The origin actually read at request time.
    pub fn origin(&self) -> BindingPolicy {
        self.policy.resolve()
    }
}
