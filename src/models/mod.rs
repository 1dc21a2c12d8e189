//! # Data Model
//!
//! The two durable records this core owns: the detailed [`BatchJob`] and the
//! coarse externally owned [`QueueItem`] mirror.

pub mod batch_job;
pub mod queue_item;

pub use batch_job::{BatchInput, BatchJob, BatchResults, StageError, StageResults};
pub use queue_item::QueueItem;
