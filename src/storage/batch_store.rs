//! # Batch Store
//!
//! Durable record of one batch's full detail. The store enforces the two
//! record-level invariants rather than trusting callers: `completed_units`
//! never decreases and never exceeds `total_units`, and the status leaves
//! `processing` exactly once.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;

use crate::models::{BatchJob, StageError};
use crate::services::generation_gateway::GeneratedArtifact;
use crate::state_machine::BatchState;

/// Error types for record storage operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("record not found: {0}")]
    NotFound(String),

    #[error("record already exists: {0}")]
    AlreadyExists(String),

    #[error("invalid status transition: {0}")]
    InvalidTransition(String),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Access to the detailed batch record.
#[async_trait]
pub trait BatchStore: Send + Sync {
    /// Insert a fresh record. Fails if the id is already taken.
    async fn insert(&self, job: BatchJob) -> Result<(), StoreError>;

    /// Insert or replace the record under the job's id, preserving the
    /// original `created_at` when a record already exists. Used when an
    /// external concern has reserved the identifier ahead of time.
    async fn upsert(&self, job: BatchJob) -> Result<(), StoreError>;

    /// Read the current record snapshot. No side effects.
    async fn fetch(&self, id: &str) -> Result<Option<BatchJob>, StoreError>;

    /// Overwrite the stage description and advance the progress counter.
    async fn record_progress(
        &self,
        id: &str,
        description: &str,
        completed_units: u32,
    ) -> Result<(), StoreError>;

    /// Merge one stage's output into the results accumulator.
    async fn merge_stage_outcome(
        &self,
        id: &str,
        stage: &str,
        artifacts: Vec<GeneratedArtifact>,
        product_ids: Vec<String>,
        error: Option<StageError>,
    ) -> Result<(), StoreError>;

    /// Transition the record into a terminal status, stamping
    /// `completed_at` and recording the synthetic error for fatal failures.
    async fn finalize(
        &self,
        id: &str,
        status: BatchState,
        synthetic_error: Option<StageError>,
    ) -> Result<(), StoreError>;
}

/// In-memory reference implementation keyed by batch id.
///
/// Each record mutation happens under the map entry's lock, so readers
/// observe consistent snapshots and never a torn write.
#[derive(Debug, Default)]
pub struct InMemoryBatchStore {
    jobs: DashMap<String, BatchJob>,
}

impl InMemoryBatchStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BatchStore for InMemoryBatchStore {
    async fn insert(&self, job: BatchJob) -> Result<(), StoreError> {
        if self.jobs.contains_key(&job.id) {
            return Err(StoreError::AlreadyExists(job.id));
        }
        self.jobs.insert(job.id.clone(), job);
        Ok(())
    }

    async fn upsert(&self, mut job: BatchJob) -> Result<(), StoreError> {
        if let Some(existing) = self.jobs.get(&job.id) {
            job.created_at = existing.created_at;
        }
        self.jobs.insert(job.id.clone(), job);
        Ok(())
    }

    async fn fetch(&self, id: &str) -> Result<Option<BatchJob>, StoreError> {
        Ok(self.jobs.get(id).map(|entry| entry.value().clone()))
    }

    async fn record_progress(
        &self,
        id: &str,
        description: &str,
        completed_units: u32,
    ) -> Result<(), StoreError> {
        let mut entry = self
            .jobs
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        let job = entry.value_mut();
        job.current_stage_description = description.to_string();
        // Monotonic clamp: never move backwards, never past the total
        job.completed_units = completed_units
            .min(job.total_units)
            .max(job.completed_units);
        job.updated_at = Utc::now();
        Ok(())
    }

    async fn merge_stage_outcome(
        &self,
        id: &str,
        stage: &str,
        artifacts: Vec<GeneratedArtifact>,
        product_ids: Vec<String>,
        error: Option<StageError>,
    ) -> Result<(), StoreError> {
        let mut entry = self
            .jobs
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        let job = entry.value_mut();
        if !artifacts.is_empty() || !product_ids.is_empty() {
            job.results.record_stage(stage, artifacts, product_ids);
        }
        if let Some(error) = error {
            job.results.record_error(error);
        }
        job.updated_at = Utc::now();
        Ok(())
    }

    async fn finalize(
        &self,
        id: &str,
        status: BatchState,
        synthetic_error: Option<StageError>,
    ) -> Result<(), StoreError> {
        let mut entry = self
            .jobs
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        let job = entry.value_mut();
        if !job.status.can_transition_to(status) {
            return Err(StoreError::InvalidTransition(format!(
                "batch {} cannot move from {} to {}",
                id, job.status, status
            )));
        }
        if let Some(error) = synthetic_error {
            job.results.record_error(error);
        }
        job.status = status;
        let now = Utc::now();
        job.completed_at = Some(now);
        job.updated_at = now;
        Ok(())
    }
}
