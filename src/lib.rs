//! Typed endpoint handlers over a registry and dispatcher.
//!
//! # Architecture Overview
//!
//! ```text
//!   startup:   RegistryBuilder::route(pattern, verb, policy, handler) ... → seal() → Registry
//!
//!   request:   HTTP host ──▶ RequestContext ──▶ Dispatcher
//!                                                  │ resolve (pattern, verb)
//!                                                  │ bind (body | query | route values)
//!                                                  │ optionality (Option<T> → None, else BadRequest)
//!                                                  │ handler.handle(request, cancellation)
//!                                                  ▼
//!              HTTP host ◀── Emitted::Json | Emitted::NoContent | Error
//! ```
//!
//! Handlers are plain types implementing [`Handler`]; their dependencies
//! are fields injected when the handler is constructed for registration.

// Core subsystems
pub mod binding;
pub mod dispatch;
pub mod error;
pub mod handler;
pub mod routing;

// Host
pub mod config;
pub mod demo;
pub mod http;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

pub use binding::{Binding, BindingPolicy, RequestContext};
pub use config::ServerConfig;
pub use dispatch::{Dispatcher, Emitted};
pub use error::{Error, ErrorClass, HandlerError, Result};
pub use handler::{
    Composite, Content, Handler, HandlerDescriptor, JsonReply, Reply, Shape, ShapeDescriptor,
};
pub use http::HttpServer;
pub use lifecycle::{Cancellation, Shutdown};
pub use routing::{Registry, RegistryBuilder};
