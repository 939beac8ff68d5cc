//! Item listing and a small in-memory item store.

use async_trait::async_trait;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::error::HandlerError;
use crate::handler::{Composite, Handler, JsonReply};
use crate::lifecycle::Cancellation;

/// Size of the virtual item sequence served by `GET /items`.
pub const VIRTUAL_ITEMS: u64 = 1_000_000;

/// Page size used when the request does not name one.
pub const DEFAULT_PAGE_SIZE: u32 = 50;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: u64,
    pub name: String,
}

impl JsonReply for Item {}

impl Item {
    fn numbered(id: u64) -> Self {
        Self {
            id,
            name: format!("Item number {id}"),
        }
    }
}

/// Zero-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListRequest {
    pub page: u32,
    pub page_size: Option<u32>,
}

impl Composite for ListRequest {}

/// `GET /items`: pages over items 1..=1_000_000 without storing them.
pub struct ListItemsHandler;

impl ListItemsHandler {
    fn page(request: Option<ListRequest>) -> Vec<Item> {
        let page = request.map_or(0, |r| u64::from(r.page));
        let size = u64::from(
            request
                .and_then(|r| r.page_size)
                .unwrap_or(DEFAULT_PAGE_SIZE),
        );

        let first = page.saturating_mul(size).saturating_add(1);
        let last = first.saturating_add(size).min(VIRTUAL_ITEMS + 1);
        (first..last).map(Item::numbered).collect()
    }
}

#[async_trait]
impl Handler for ListItemsHandler {
    type Request = Option<ListRequest>;
    type Response = Vec<Item>;

    async fn handle(
        &self,
        request: Option<ListRequest>,
        _cancellation: Cancellation,
    ) -> Result<Option<Vec<Item>>, HandlerError> {
        Ok(Some(Self::page(request)))
    }
}

/// A thread-safe store of created items.
#[derive(Clone, Default)]
pub struct ItemStore {
    inner: Arc<DashMap<u64, Item>>,
    next_id: Arc<AtomicU64>,
}

impl ItemStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a new item under the next free id.
    pub fn create(&self, name: String) -> Item {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        let item = Item { id, name };
        self.inner.insert(id, item.clone());
        tracing::debug!(id, stored = self.inner.len(), "Item created");
        item
    }

    pub fn get(&self, id: u64) -> Option<Item> {
        self.inner.get(&id).map(|entry| entry.value().clone())
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewItem {
    pub name: String,
}

impl Composite for NewItem {}

/// Create handler for the item store; takes a name, returns the stored item.
pub struct CreateItemHandler {
    store: ItemStore,
}

impl CreateItemHandler {
    pub fn new(store: ItemStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Handler for CreateItemHandler {
    type Request = NewItem;
    type Response = Item;

    async fn handle(&self, request: NewItem, _cancellation: Cancellation) -> Result<Option<Item>, HandlerError> {
        if request.name.trim().is_empty() {
            return Err(HandlerError::new("item name must not be blank"));
        }
        Ok(Some(self.store.create(request.name)))
    }
}

/// Read handler for the item store: nothing is emitted for an unknown id.
pub struct ReadItemHandler {
    store: ItemStore,
}

impl ReadItemHandler {
    pub fn new(store: ItemStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Handler for ReadItemHandler {
    type Request = u64;
    type Response = Item;

    async fn handle(&self, id: u64, _cancellation: Cancellation) -> Result<Option<Item>, HandlerError> {
        Ok(self.store.get(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_page() {
        let items = ListItemsHandler::page(None);
        assert_eq!(items.len(), DEFAULT_PAGE_SIZE as usize);
        assert_eq!(items[0], Item::numbered(1));
        assert_eq!(items[49].id, 50);
    }

    #[test]
    fn test_explicit_page_and_size() {
        let items = ListItemsHandler::page(Some(ListRequest {
            page: 2,
            page_size: Some(10),
        }));
        let ids: Vec<u64> = items.iter().map(|item| item.id).collect();
        assert_eq!(ids, (21..=30).collect::<Vec<_>>());
        assert_eq!(items[0].name, "Item number 21");
    }

    #[test]
    fn test_pages_past_the_end_are_empty() {
        let last = ListItemsHandler::page(Some(ListRequest {
            page: 19_999,
            page_size: Some(50),
        }));
        assert_eq!(last.len(), 50);
        assert_eq!(last[49].id, VIRTUAL_ITEMS);

        let beyond = ListItemsHandler::page(Some(ListRequest {
            page: u32::MAX,
            page_size: Some(u32::MAX),
        }));
        assert!(beyond.is_empty());
    }

    #[tokio::test]
    async fn test_store_round_trip() {
        let store = ItemStore::new();
        let create = CreateItemHandler::new(store.clone());
        let read = ReadItemHandler::new(store.clone());

        let created = create
            .handle(NewItem { name: "widget".to_string() }, Cancellation::none())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(created.id, 1);
        assert_eq!(store.len(), 1);

        let fetched = read.handle(created.id, Cancellation::none()).await.unwrap();
        assert_eq!(fetched, Some(created));
        assert_eq!(read.handle(99, Cancellation::none()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_blank_name_is_a_handler_error() {
        let create = CreateItemHandler::new(ItemStore::new());
        let err = create
            .handle(NewItem { name: "  ".to_string() }, Cancellation::none())
            .await
            .unwrap_err();
        assert_eq!(err.message(), "item name must not be blank");
    }
}
