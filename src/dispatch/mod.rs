//! Dispatch subsystem.
//!
//! # Data Flow
//! ```text
//! (pattern, verb, RequestContext)
//!     → dispatcher.rs (resolve in the sealed Registry, metrics, logging)
//!     → Endpoint::call (type-erased)
//!     → invoke.rs (bind → optionality → handler ⟂ cancellation)
//!     → emitted.rs (Some → JSON bytes or handler Content, None → NoContent)
//! ```
//!
//! # Design Decisions
//! - No retries: a failed dispatch is reported once
//! - Required shapes that bind nothing fail with `BadRequest`; optional
//!   shapes receive `None`
//! - Shutdown cancels in-flight handlers instead of waiting on them

pub mod dispatcher;
pub mod emitted;
mod invoke;

pub use dispatcher::Dispatcher;
pub use emitted::{emit, Emitted};
pub(crate) use invoke::invoke;
