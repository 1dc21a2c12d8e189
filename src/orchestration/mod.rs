//! # Orchestration Engine
//!
//! Batch orchestration core for merchandise generation: a fixed pipeline of
//! stages driven sequentially per batch, with per-stage failure absorption
//! and dual-record status bookkeeping.
//!
//! ## Core Components
//!
//! - **BatchOrchestrator**: owns the stage list and drives each batch to a
//!   terminal status as a detached task
//! - **StageRunner**: executes one stage (generation, optional product
//!   registration) with bounded retry and catch-at-boundary error handling
//! - **StatusReconciler**: projects coarse batch status onto the externally
//!   owned queue item after every progress update
//! - **Pipeline definition**: the declared stage order, unit counts, and
//!   per-stage retry policies

pub mod batch_orchestrator;
pub mod errors;
pub mod pipeline;
pub mod stage_runner;
pub mod status_reconciler;
pub mod types;

pub use batch_orchestrator::BatchOrchestrator;
pub use errors::{OrchestrationError, OrchestrationResult};
pub use pipeline::{
    merchandise_pipeline, total_units, GenerationMode, RetryPolicy, StageDefinition,
};
pub use stage_runner::StageRunner;
pub use status_reconciler::StatusReconciler;
pub use types::StageOutcome;
