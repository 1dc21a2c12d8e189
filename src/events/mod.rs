//! # Lifecycle Events
//!
//! Broadcast-based publication of batch lifecycle events for observers
//! (UI pushers, metrics collectors). Publishing never blocks orchestration
//! and having zero subscribers is not an error.

pub mod publisher;

pub use publisher::{BatchEvent, EventPublisher, PublishError};
