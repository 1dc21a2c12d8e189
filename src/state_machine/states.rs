use serde::{Deserialize, Serialize};
use std::fmt;

/// Batch status for the detailed job record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchState {
    /// Initial state while the pipeline is running
    Processing,
    /// Every stage finished without recording an error
    Completed,
    /// The pipeline finished but at least one stage recorded an error
    CompletedWithErrors,
    /// The batch aborted outside any stage boundary
    Failed,
}

impl BatchState {
    /// Check if this is a terminal state (no further transitions allowed)
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Completed | Self::CompletedWithErrors | Self::Failed
        )
    }

    /// Check if this is an active state (batch is being processed)
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Processing)
    }

    /// Check whether a transition to `target` is allowed.
    ///
    /// The machine is a single hop: `processing` moves to exactly one
    /// terminal state and nothing ever leaves a terminal state.
    pub fn can_transition_to(&self, target: BatchState) -> bool {
        self.is_active() && target.is_terminal()
    }
}

impl fmt::Display for BatchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Processing => write!(f, "processing"),
            Self::Completed => write!(f, "completed"),
            Self::CompletedWithErrors => write!(f, "completed_with_errors"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

impl std::str::FromStr for BatchState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "processing" => Ok(Self::Processing),
            "completed" => Ok(Self::Completed),
            "completed_with_errors" => Ok(Self::CompletedWithErrors),
            "failed" => Ok(Self::Failed),
            _ => Err(format!("Invalid batch state: {s}")),
        }
    }
}

/// Queue item status for the externally owned mirror record
///
/// Deliberately coarser than [`BatchState`]: queue consumers only need to
/// know whether an item is still waiting, running, or done.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueueItemState {
    /// Created by the queueing concern, not yet picked up
    Pending,
    /// A batch linked to this item is running
    Processing,
    /// The linked batch reached a successful terminal state
    Completed,
    /// The linked batch failed
    Failed,
}

impl QueueItemState {
    /// Check if this is a terminal state (no further transitions allowed)
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

impl fmt::Display for QueueItemState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Processing => write!(f, "processing"),
            Self::Completed => write!(f, "completed"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

impl std::str::FromStr for QueueItemState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "processing" => Ok(Self::Processing),
            "completed" => Ok(Self::Completed),
            "failed" => Ok(Self::Failed),
            _ => Err(format!("Invalid queue item state: {s}")),
        }
    }
}

/// Coarse projection used by status reconciliation.
///
/// `completed_with_errors` collapses to `completed`: partial failure still
/// counts as a finished item for queue consumers.
impl From<BatchState> for QueueItemState {
    fn from(state: BatchState) -> Self {
        match state {
            BatchState::Processing => Self::Processing,
            BatchState::Completed | BatchState::CompletedWithErrors => Self::Completed,
            BatchState::Failed => Self::Failed,
        }
    }
}

/// Default state for new batch jobs
impl Default for BatchState {
    fn default() -> Self {
        Self::Processing
    }
}

/// Default state for queue items before a batch picks them up
impl Default for QueueItemState {
    fn default() -> Self {
        Self::Pending
    }
}
