//! # Batch Job Model
//!
//! The detailed record for one end-to-end pipeline run: immutable input,
//! progress counters, the current stage description for poll consumers, and
//! an append-only results accumulator.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::services::generation_gateway::GeneratedArtifact;
use crate::state_machine::BatchState;

/// Source photo reference plus descriptive metadata supplied at batch start.
///
/// Immutable after creation. The metadata fields flow through to product
/// registration untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchInput {
    pub source_image_ref: String,
    pub artist: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
}

/// One recorded stage failure, tagged with the stage that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageError {
    pub stage: String,
    pub error: String,
}

/// Accumulated output of a single stage: generated artifacts and the product
/// identifiers registered from them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StageResults {
    pub artifacts: Vec<GeneratedArtifact>,
    pub product_ids: Vec<String>,
}

/// Append-only accumulator for everything a batch produced.
///
/// Entries are only ever added or extended. A stage that failed outright
/// contributes an error entry and no stage entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchResults {
    pub stages: BTreeMap<String, StageResults>,
    pub errors: Vec<StageError>,
}

impl BatchResults {
    pub fn record_stage(
        &mut self,
        stage: &str,
        artifacts: Vec<GeneratedArtifact>,
        product_ids: Vec<String>,
    ) {
        let entry = self.stages.entry(stage.to_string()).or_default();
        entry.artifacts.extend(artifacts);
        entry.product_ids.extend(product_ids);
    }

    pub fn record_error(&mut self, error: StageError) {
        self.errors.push(error);
    }
}

/// One pipeline run for a single source photo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchJob {
    pub id: String,
    pub input: BatchInput,
    pub status: BatchState,
    pub total_units: u32,
    pub completed_units: u32,
    pub current_stage_description: String,
    pub results: BatchResults,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl BatchJob {
    /// Create a fresh job in the initial `processing` state.
    pub fn new(id: String, input: BatchInput, total_units: u32) -> Self {
        let now = Utc::now();
        Self {
            id,
            input,
            status: BatchState::default(),
            total_units,
            completed_units: 0,
            current_stage_description: String::new(),
            results: BatchResults::default(),
            created_at: now,
            updated_at: now,
            completed_at: None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Fraction of units completed, for poll consumers rendering progress.
    pub fn progress_fraction(&self) -> f64 {
        if self.total_units == 0 {
            return 0.0;
        }
        f64::from(self.completed_units) / f64::from(self.total_units)
    }
}
