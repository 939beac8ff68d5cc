//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Registry, dispatcher and HTTP host produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → Log aggregation (stdout)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Request ID flows through the HTTP span into every dispatch event
//! - Metrics are cheap (atomic increments)

pub mod logging;
pub mod metrics;
