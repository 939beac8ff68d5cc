//! Create/read route conventions for one entity type.
//!
//! ```text
//! crud::<Item>("/store/items")
//!     .create(h)  → POST /store/items        (body)
//!     .read(h)    → GET  /store/items/{key}  (route values)
//! ```
//!
//! Both handlers must return the entity type; `read` handlers usually take
//! the bare key (`u64`, `Uuid`, ...) as their request.

use axum::http::Method;
use std::marker::PhantomData;

use crate::binding::BindingPolicy;
use crate::error::Result;
use crate::handler::{Handler, Reply};
use crate::routing::registry::RegistryBuilder;

/// Capture name used for the item route.
pub const KEY_PARAM: &str = "key";

/// Registers the conventional routes for entity `T` under one collection pattern.
pub struct CrudBuilder<'a, T> {
    registry: &'a mut RegistryBuilder,
    pattern: String,
    entity: PhantomData<fn() -> T>,
}

impl<'a, T: Reply> CrudBuilder<'a, T> {
    pub(crate) fn new(registry: &'a mut RegistryBuilder, pattern: String) -> Self {
        Self {
            registry,
            pattern,
            entity: PhantomData,
        }
    }

    /// Item pattern, used for read: the collection plus `/{key}`.
    pub fn item_pattern(&self) -> String {
        format!("{}/{{{KEY_PARAM}}}", self.pattern.trim_end_matches('/'))
    }

    /// `POST <pattern>`, request bound from the body.
    pub fn create<H: Handler<Response = T>>(&mut self, handler: H) -> Result<&mut Self> {
        self.registry
            .route(self.pattern.clone(), Method::POST, BindingPolicy::Body, handler)?;
        Ok(self)
    }

    /// `GET <pattern>/{key}`, request bound from route values.
    pub fn read<H: Handler<Response = T>>(&mut self, handler: H) -> Result<&mut Self> {
        self.registry
            .route(self.item_pattern(), Method::GET, BindingPolicy::RouteValues, handler)?;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, HandlerError};
    use crate::handler::{Composite, JsonReply};
    use crate::lifecycle::Cancellation;
    use async_trait::async_trait;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Serialize, Deserialize)]
    struct Note {
        id: u64,
        text: String,
    }

    impl Composite for Note {}
    impl JsonReply for Note {}

    struct SaveNote;

    #[async_trait]
    impl Handler for SaveNote {
        type Request = Note;
        type Response = Note;

        async fn handle(&self, note: Note, _: Cancellation) -> Result<Option<Note>, HandlerError> {
            Ok(Some(note))
        }
    }

    struct FindNote;

    #[async_trait]
    impl Handler for FindNote {
        type Request = u64;
        type Response = Note;

        async fn handle(&self, id: u64, _: Cancellation) -> Result<Option<Note>, HandlerError> {
            Ok(Some(Note {
                id,
                text: String::new(),
            }))
        }
    }

    #[test]
    fn test_create_and_read_follow_the_convention() {
        let mut builder = RegistryBuilder::new();
        builder
            .crud::<Note>("/notes")
            .create(SaveNote)
            .unwrap()
            .read(FindNote)
            .unwrap();

        let registry = builder.seal();
        let create = registry.resolve("/notes", &Method::POST).unwrap();
        assert_eq!(create.descriptor().policy(), BindingPolicy::Body);

        let read = registry.resolve("/notes/{key}", &Method::GET).unwrap();
        assert_eq!(read.descriptor().policy(), BindingPolicy::RouteValues);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_trailing_slash_is_not_doubled() {
        let mut builder = RegistryBuilder::new();
        let crud = builder.crud::<Note>("/notes/");
        assert_eq!(crud.item_pattern(), "/notes/{key}");
    }

    #[test]
    fn test_registration_errors_surface() {
        let mut builder = RegistryBuilder::new();
        builder.crud::<Note>("/notes").read(FindNote).unwrap();

        let again = builder.crud::<Note>("/notes").read(FindNote).map(|_| ());
        assert!(matches!(again, Err(Error::Configuration(_))));
        assert_eq!(builder.len(), 1);
    }
}
