//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Shutdown::trigger
//!
//! Shutdown (shutdown.rs):
//!     trigger → server stops accepting (graceful shutdown)
//!             → Cancellation fires → in-flight handlers are abandoned
//! ```
//!
//! # Design Decisions
//! - One coordinator per process; clones share state
//! - Cancellation is observable both by polling and by awaiting
//! - Triggering twice is harmless

pub mod shutdown;
pub mod signals;

pub use shutdown::{Cancellation, Shutdown};
