//! # Merchgen Core
//!
//! Rust core for photo-to-merchandise batch orchestration. Given one
//! uploaded photo, it runs a fixed sequence of generation stages (one of
//! which fans out into multiple style variants), tracks fine-grained
//! progress, tolerates per-stage failure without aborting the run, and
//! keeps two independently owned status records consistent: the detailed
//! batch job and the simplified queue mirror owned by an external queueing
//! concern.
//!
//! ## Module Organization
//!
//! - [`models`] - The two durable records: batch job detail and queue mirror
//! - [`state_machine`] - Status definitions and transition rules
//! - [`storage`] - Store traits with in-memory reference implementations
//! - [`services`] - Seams for the generation gateway and product registrar
//! - [`orchestration`] - Pipeline definition, stage runner, orchestrator,
//!   and status reconciler
//! - [`events`] - Broadcast lifecycle events for observers
//! - [`config`] - Environment-driven pipeline configuration
//! - [`error`] - Crate-level error handling
//!
//! ## Execution Model
//!
//! Each batch runs as one detached asynchronous task. `start` and `attach`
//! return the batch identifier immediately; callers poll `get_status` for
//! progress. Stages execute strictly in declared order within a batch, and
//! batches for different photos run concurrently with no shared mutable
//! state between them.

pub mod config;
pub mod constants;
pub mod error;
pub mod events;
pub mod logging;
pub mod models;
pub mod orchestration;
pub mod services;
pub mod state_machine;
pub mod storage;

pub use config::PipelineConfig;
pub use error::{MerchgenError, Result};
pub use events::{BatchEvent, EventPublisher};
pub use models::{BatchInput, BatchJob, BatchResults, QueueItem, StageError, StageResults};
pub use orchestration::{
    BatchOrchestrator, OrchestrationError, OrchestrationResult, RetryPolicy, StageOutcome,
    StageRunner, StatusReconciler,
};
pub use services::{
    GeneratedArtifact, GenerationGateway, GenerationRequest, ProductMetadata, ProductRegistrar,
    RegisteredProducts, RegistrationRequest,
};
pub use state_machine::{BatchState, QueueItemState};
pub use storage::{BatchStore, InMemoryBatchStore, InMemoryQueueStore, QueueStore, StoreError};
