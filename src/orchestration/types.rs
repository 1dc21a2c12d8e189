//! Core types shared across the orchestration components.

use serde::{Deserialize, Serialize};

use crate::models::StageError;
use crate::services::generation_gateway::GeneratedArtifact;

/// Result of running one pipeline stage.
///
/// A stage always reports its full unit count: a failed stage still advances
/// the batch past itself, it just contributes an error entry instead of
/// artifacts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageOutcome {
    pub stage: String,
    pub units_completed: u32,
    pub artifacts: Vec<GeneratedArtifact>,
    pub product_ids: Vec<String>,
    pub error: Option<StageError>,
}

impl StageOutcome {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}
