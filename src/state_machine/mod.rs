//! # Batch Status State Machines
//!
//! Status definitions and transition rules for the detailed batch record and
//! the coarse queue mirror record.

pub mod states;

pub use states::{BatchState, QueueItemState};
