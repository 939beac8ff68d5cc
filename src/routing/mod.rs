//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Registration (at startup):
//!     pattern + verb + descriptor + handler
//!     → pattern.rs (validate pattern, list captures)
//!     → registry.rs (shape check, duplicate check)
//!     → endpoint.rs (wrap handler as Arc<dyn Endpoint>)
//!     → seal() → immutable Registry
//!
//! crud.rs registers the create/read pair for an entity in one call.
//!
//! Lookup (per request):
//!     (pattern, verb) → Registration or NotFound
//! ```
//!
//! # Design Decisions
//! - Routes registered at startup, immutable at runtime
//! - Explicit NotFound rather than a silent default
//! - The host's router matches URLs; this registry is keyed by the
//!   pattern text it was given

pub mod crud;
pub mod endpoint;
pub mod pattern;
pub mod registry;

pub use crud::CrudBuilder;
pub use endpoint::{Endpoint, TypedEndpoint};
pub use registry::{Registration, Registry, RegistryBuilder};
