//! Queue item mirror record. Rows are created and deleted by the external
//! queueing concern; this core only updates `status` and `processed_at`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::state_machine::QueueItemState;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueueItem {
    pub id: String,
    /// Foreign reference equal to some [`crate::models::BatchJob`] id.
    pub item_id: String,
    pub status: QueueItemState,
    /// Set once, at the first reconciliation that observes a terminal batch.
    pub processed_at: Option<DateTime<Utc>>,
}

impl QueueItem {
    pub fn new(id: String, item_id: String) -> Self {
        Self {
            id,
            item_id,
            status: QueueItemState::default(),
            processed_at: None,
        }
    }
}
