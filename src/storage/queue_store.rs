//! Queue item store. The external queueing concern owns row creation and
//! deletion; this core only looks rows up by their batch linkage and writes
//! status updates back.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;

use crate::models::QueueItem;
use crate::storage::batch_store::StoreError;

/// Access to the coarse queue mirror record.
#[async_trait]
pub trait QueueStore: Send + Sync {
    /// Find the queue item whose `item_id` links to the given batch id.
    async fn find_by_item_id(&self, item_id: &str) -> Result<Option<QueueItem>, StoreError>;

    /// Write an updated queue item back. Fails if the row no longer exists.
    async fn update(&self, item: QueueItem) -> Result<(), StoreError>;
}

/// In-memory reference implementation keyed by queue item id.
#[derive(Debug, Default)]
pub struct InMemoryQueueStore {
    items: RwLock<HashMap<String, QueueItem>>,
}

impl InMemoryQueueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a row the way the external queueing concern would.
    /// Not part of the [`QueueStore`] trait; used by tests and demos.
    pub fn seed(&self, item: QueueItem) {
        self.items.write().insert(item.id.clone(), item);
    }

    /// Direct snapshot by queue item id, bypassing the linkage lookup.
    pub fn get(&self, id: &str) -> Option<QueueItem> {
        self.items.read().get(id).cloned()
    }
}

#[async_trait]
impl QueueStore for InMemoryQueueStore {
    async fn find_by_item_id(&self, item_id: &str) -> Result<Option<QueueItem>, StoreError> {
        Ok(self
            .items
            .read()
            .values()
            .find(|item| item.item_id == item_id)
            .cloned())
    }

    async fn update(&self, item: QueueItem) -> Result<(), StoreError> {
        let mut items = self.items.write();
        if !items.contains_key(&item.id) {
            return Err(StoreError::NotFound(item.id));
        }
        items.insert(item.id.clone(), item);
        Ok(())
    }
}
