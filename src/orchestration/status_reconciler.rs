//! # Status Reconciler
//!
//! Copies a coarse projection of the batch status onto the externally owned
//! queue item linked to it. The two records have different owners and
//! different consumers, so they stay separate and an explicit reconciliation
//! keeps them consistent.

use std::sync::Arc;

use chrono::Utc;
use tracing::debug;

use crate::state_machine::QueueItemState;
use crate::storage::batch_store::{BatchStore, StoreError};
use crate::storage::queue_store::QueueStore;

/// Idempotent, side-effect-only sync of batch status onto the queue mirror.
#[derive(Clone)]
pub struct StatusReconciler {
    batch_store: Arc<dyn BatchStore>,
    queue_store: Arc<dyn QueueStore>,
}

impl StatusReconciler {
    pub fn new(batch_store: Arc<dyn BatchStore>, queue_store: Arc<dyn QueueStore>) -> Self {
        Self {
            batch_store,
            queue_store,
        }
    }

    /// Project the current batch status onto the linked queue item.
    ///
    /// A missing queue item is a silent no-op since not every batch is
    /// externally queued. Repeated calls with an unchanged batch write
    /// nothing. `processed_at` is stamped once, at the first sync that
    /// observes a terminal batch status.
    pub async fn sync(&self, batch_id: &str) -> Result<(), StoreError> {
        let Some(job) = self.batch_store.fetch(batch_id).await? else {
            debug!(batch_id, "No batch record to reconcile");
            return Ok(());
        };

        let Some(mut item) = self.queue_store.find_by_item_id(batch_id).await? else {
            debug!(batch_id, "No queue item linked to batch, skipping reconciliation");
            return Ok(());
        };

        let mapped = QueueItemState::from(job.status);
        let needs_status = item.status != mapped;
        let needs_processed_at = mapped.is_terminal() && item.processed_at.is_none();
        if !needs_status && !needs_processed_at {
            return Ok(());
        }

        item.status = mapped;
        if needs_processed_at {
            item.processed_at = Some(Utc::now());
        }
        debug!(
            batch_id,
            queue_item_id = %item.id,
            status = %item.status,
            "Reconciled queue item status"
        );
        self.queue_store.update(item).await
    }
}
