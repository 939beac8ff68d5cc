//! Handler contract and shape metadata.
//!
//! # Design Decisions
//! - Shapes are associated types of the handler, so the request type a
//!   handler accepts is fixed at compile time
//! - Descriptors are plain data built once at registration
//! - No runtime type scanning: hosts enumerate handlers explicitly

pub mod contract;
pub mod descriptor;
pub mod reply;
pub mod shape;

pub use contract::Handler;
pub use descriptor::HandlerDescriptor;
pub use reply::{Content, JsonReply, Reply};
pub use shape::{Composite, PrimitiveKind, Shape, ShapeDescriptor, ShapeKind};
