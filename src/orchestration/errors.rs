use crate::storage::batch_store::StoreError;

/// Error types for batch orchestration operations
///
/// Per-stage failures never surface here; they are converted into result
/// entries at the stage boundary. Only fatal conditions (record storage
/// unreachable, unknown batch) become orchestration errors.
#[derive(Debug, thiserror::Error)]
pub enum OrchestrationError {
    #[error("storage error: {0}")]
    Storage(#[from] StoreError),

    #[error("batch not found: {0}")]
    BatchNotFound(String),
}

pub type OrchestrationResult<T> = Result<T, OrchestrationError>;
