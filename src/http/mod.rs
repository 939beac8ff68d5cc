//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request ID, trace, timeout, body limit)
//!     → request.rs (route values, query, body → RequestContext)
//!     → Dispatcher (resolve, bind, invoke, emit)
//!     → response.rs (Emitted / Error → status + JSON)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::into_context;
pub use response::status_for;
pub use server::{HttpServer, X_REQUEST_ID};
