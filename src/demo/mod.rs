//! Demo endpoints served by the binary.
//!
//! | Route                     | Policy        | Handler             |
//! |---------------------------|---------------|---------------------|
//! | `GET /`                   | unspecified   | `HomeHandler`       |
//! | `GET /hello`              | unspecified   | `HelloWorld`        |
//! | `GET /test/{id}`          | route values  | `TestHandler`       |
//! | `GET /bam`                | query string  | `EchoHandler`       |
//! | `GET /items`              | query string  | `ListItemsHandler`  |
//! | `POST /store/items`       | body          | `CreateItemHandler` |
//! | `GET /store/items/{key}`  | route values  | `ReadItemHandler`   |
//!
//! A request binds from one origin only. `TestHandler` reads `{id}` and
//! leaves `text` unset; a `?text=` query on `/test/{id}` is not consulted.
//! The two store routes come from `RegistryBuilder::crud`.

pub mod greeting;
pub mod items;

use axum::http::Method;

use crate::binding::BindingPolicy;
use crate::error::Result;
use crate::routing::Registry;

pub use greeting::{EchoHandler, HelloWorld, HomeHandler, TestHandler};
pub use items::{CreateItemHandler, Item, ItemStore, ListItemsHandler, ReadItemHandler};

/// Register every demo endpoint and seal the registry.
pub fn registry(store: ItemStore) -> Result<Registry> {
    let mut builder = Registry::builder();
    builder
        .route("/", Method::GET, BindingPolicy::Unspecified, HomeHandler)?
        .route("/hello", Method::GET, BindingPolicy::Unspecified, HelloWorld)?
        .route("/test/{id}", Method::GET, BindingPolicy::RouteValues, TestHandler)?
        .route("/bam", Method::GET, BindingPolicy::QueryString, EchoHandler)?
        .route("/items", Method::GET, BindingPolicy::QueryString, ListItemsHandler)?;
    builder
        .crud::<Item>("/store/items")
        .create(CreateItemHandler::new(store.clone()))?
        .read(ReadItemHandler::new(store))?;
    Ok(builder.seal())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_routes_follow_crud_convention() {
        let registry = registry(ItemStore::new()).unwrap();
        assert_eq!(registry.len(), 7);

        let create = registry.resolve("/store/items", &Method::POST).unwrap();
        assert_eq!(create.descriptor().policy(), BindingPolicy::Body);
        let read = registry.resolve("/store/items/{key}", &Method::GET).unwrap();
        assert_eq!(read.descriptor().policy(), BindingPolicy::RouteValues);
    }
}
