use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum MerchgenError {
    StorageError(String),
    StateTransitionError(String),
    OrchestrationError(String),
    EventError(String),
    ConfigurationError(String),
}

impl fmt::Display for MerchgenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MerchgenError::StorageError(msg) => write!(f, "Storage error: {msg}"),
            MerchgenError::StateTransitionError(msg) => {
                write!(f, "State transition error: {msg}")
            }
            MerchgenError::OrchestrationError(msg) => write!(f, "Orchestration error: {msg}"),
            MerchgenError::EventError(msg) => write!(f, "Event error: {msg}"),
            MerchgenError::ConfigurationError(msg) => write!(f, "Configuration error: {msg}"),
        }
    }
}

impl std::error::Error for MerchgenError {}

pub type Result<T> = std::result::Result<T, MerchgenError>;
