//! # Record Storage
//!
//! Access to the two durable records this core owns. Persistence backends
//! are collaborator concerns, so each store is an object-safe async trait
//! with an in-memory reference implementation. Every trait operation is a
//! single atomic record write, which is what lets status polls race
//! harmlessly with in-flight updates.

pub mod batch_store;
pub mod queue_store;

pub use batch_store::{BatchStore, InMemoryBatchStore, StoreError};
pub use queue_store::{InMemoryQueueStore, QueueStore};
