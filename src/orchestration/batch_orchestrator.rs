//! # Batch Orchestrator
//!
//! ## Architecture: Pipeline Drive Loop
//!
//! The BatchOrchestrator owns the ordered stage list for a batch and drives
//! it to a terminal status. It brings together the other orchestration
//! components:
//!
//! - **StageRunner**: executes individual stages against the collaborators
//! - **BatchStore**: receives every progress update and result merge
//! - **StatusReconciler**: mirrors coarse status after every update
//! - **EventPublisher**: publishes batch lifecycle events
//!
//! Each batch runs as one detached task: `start` and `attach` return the
//! batch identifier immediately and callers observe progress by polling
//! `get_status`. Batches for different photos are independent; a batch task
//! only ever writes its own record and the one queue item linked to it.
//!
//! Per-stage failures are absorbed by the StageRunner and accumulate in the
//! results. Only failures outside stage boundaries (the record store
//! becoming unreachable) abort the run, with a synthetic error entry and a
//! terminal `failed` status.

use std::sync::Arc;

use serde_json::json;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::config::PipelineConfig;
use crate::constants::{events, ORCHESTRATION_ERROR_TAG};
use crate::events::publisher::{BatchEvent, EventPublisher};
use crate::models::{BatchInput, BatchJob, StageError};
use crate::orchestration::errors::{OrchestrationError, OrchestrationResult};
use crate::orchestration::pipeline::{merchandise_pipeline, total_units, StageDefinition};
use crate::orchestration::stage_runner::StageRunner;
use crate::orchestration::status_reconciler::StatusReconciler;
use crate::services::generation_gateway::GenerationGateway;
use crate::services::product_registrar::ProductRegistrar;
use crate::state_machine::BatchState;
use crate::storage::batch_store::BatchStore;
use crate::storage::queue_store::QueueStore;

/// Drives batches through the merchandise pipeline.
#[derive(Clone)]
pub struct BatchOrchestrator {
    batch_store: Arc<dyn BatchStore>,
    stage_runner: StageRunner,
    reconciler: StatusReconciler,
    event_publisher: EventPublisher,
    stages: Arc<Vec<StageDefinition>>,
    total_units: u32,
}

impl BatchOrchestrator {
    pub fn new(
        batch_store: Arc<dyn BatchStore>,
        queue_store: Arc<dyn QueueStore>,
        gateway: Arc<dyn GenerationGateway>,
        registrar: Arc<dyn ProductRegistrar>,
        config: &PipelineConfig,
    ) -> Self {
        let stages = merchandise_pipeline(config);
        let total = total_units(&stages);
        Self {
            batch_store: batch_store.clone(),
            stage_runner: StageRunner::new(gateway, registrar),
            reconciler: StatusReconciler::new(batch_store, queue_store),
            event_publisher: EventPublisher::new(config.event_channel_capacity),
            stages: Arc::new(stages),
            total_units: total,
        }
    }

    /// Allocate a fresh batch and launch its pipeline as a detached task.
    ///
    /// Returns the new batch identifier immediately; the caller polls
    /// [`get_status`](Self::get_status) to observe progress.
    pub async fn start(&self, input: BatchInput) -> OrchestrationResult<String> {
        let batch_id = Uuid::new_v4().to_string();
        let job = BatchJob::new(batch_id.clone(), input, self.total_units);
        self.batch_store.insert(job).await?;
        info!(batch_id = %batch_id, "Starting merchandise batch");
        self.spawn_run(batch_id.clone());
        Ok(batch_id)
    }

    /// Run the pipeline against an identifier an external queueing concern
    /// has already reserved. Identical execution path to [`start`], but the
    /// progress lands on the existing identifier instead of a minted one.
    ///
    /// [`start`]: Self::start
    pub async fn attach(&self, existing_id: &str, input: BatchInput) -> OrchestrationResult<String> {
        let job = BatchJob::new(existing_id.to_string(), input, self.total_units);
        self.batch_store.upsert(job).await?;
        info!(batch_id = existing_id, "Attaching to existing batch identifier");
        self.spawn_run(existing_id.to_string());
        Ok(existing_id.to_string())
    }

    /// Synchronous snapshot of the batch record. No side effects.
    pub async fn get_status(&self, batch_id: &str) -> OrchestrationResult<BatchJob> {
        self.batch_store
            .fetch(batch_id)
            .await?
            .ok_or_else(|| OrchestrationError::BatchNotFound(batch_id.to_string()))
    }

    /// Subscribe to batch lifecycle events.
    pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<BatchEvent> {
        self.event_publisher.subscribe()
    }

    fn spawn_run(&self, batch_id: String) {
        let orchestrator = self.clone();
        tokio::spawn(async move {
            orchestrator.run_batch(&batch_id).await;
        });
    }

    /// Worker body for one batch. Owns the batch record exclusively for its
    /// lifetime.
    async fn run_batch(&self, batch_id: &str) {
        self.publish(events::BATCH_STARTED, batch_id, json!({})).await;

        if let Err(fatal) = self.run_stages(batch_id).await {
            error!(
                batch_id,
                error = %fatal,
                "Batch aborted outside stage boundaries"
            );
            self.mark_failed(batch_id, &fatal).await;
        }

        // Final sync so the queue mirror observes the terminal status
        self.sync_quietly(batch_id).await;
    }

    async fn run_stages(&self, batch_id: &str) -> OrchestrationResult<()> {
        let input = self.get_status(batch_id).await?.input;
        let mut completed_units = 0u32;

        for stage in self.stages.iter() {
            self.batch_store
                .record_progress(batch_id, stage.progress_label, completed_units)
                .await?;
            self.sync_quietly(batch_id).await;
            self.publish(
                events::STAGE_STARTED,
                batch_id,
                json!({ "stage": stage.name }),
            )
            .await;

            let outcome = self.stage_runner.run_stage(stage, &input).await;
            completed_units += outcome.units_completed;

            self.batch_store
                .merge_stage_outcome(
                    batch_id,
                    stage.name,
                    outcome.artifacts,
                    outcome.product_ids,
                    outcome.error.clone(),
                )
                .await?;
            self.batch_store
                .record_progress(
                    batch_id,
                    &format!(
                        "Completed {} ({completed_units} of {} units)",
                        stage.name, self.total_units
                    ),
                    completed_units,
                )
                .await?;
            self.sync_quietly(batch_id).await;
            self.publish(
                events::STAGE_COMPLETED,
                batch_id,
                json!({
                    "stage": stage.name,
                    "completed_units": completed_units,
                    "succeeded": outcome.error.is_none(),
                }),
            )
            .await;
        }

        let job = self.get_status(batch_id).await?;
        let status = if job.results.errors.is_empty() {
            BatchState::Completed
        } else {
            BatchState::CompletedWithErrors
        };
        self.batch_store.finalize(batch_id, status, None).await?;
        info!(batch_id, status = %status, "Batch finished");
        self.publish(
            events::BATCH_FINALIZED,
            batch_id,
            json!({ "status": status.to_string() }),
        )
        .await;
        Ok(())
    }

    /// Terminal handling for fatal orchestration failures: one synthetic
    /// error entry, distinct from per-stage errors, and a `failed` status.
    async fn mark_failed(&self, batch_id: &str, fatal: &OrchestrationError) {
        let synthetic = StageError {
            stage: ORCHESTRATION_ERROR_TAG.to_string(),
            error: fatal.to_string(),
        };
        if let Err(store_error) = self
            .batch_store
            .finalize(batch_id, BatchState::Failed, Some(synthetic))
            .await
        {
            error!(
                batch_id,
                error = %store_error,
                "Unable to record batch failure"
            );
            return;
        }
        self.publish(
            events::BATCH_FINALIZED,
            batch_id,
            json!({ "status": BatchState::Failed.to_string() }),
        )
        .await;
    }

    /// Reconciliation is best-effort: a failed sync is logged and retried
    /// at the next progress update.
    async fn sync_quietly(&self, batch_id: &str) {
        if let Err(sync_error) = self.reconciler.sync(batch_id).await {
            warn!(
                batch_id,
                error = %sync_error,
                "Queue status reconciliation failed"
            );
        }
    }

    async fn publish(&self, name: &str, batch_id: &str, context: serde_json::Value) {
        if let Err(publish_error) = self.event_publisher.publish(name, batch_id, context).await {
            warn!(
                batch_id,
                event = name,
                error = %publish_error,
                "Failed to publish lifecycle event"
            );
        }
    }
}
