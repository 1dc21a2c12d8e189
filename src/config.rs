use crate::constants::{
    DEFAULT_EVENT_CHANNEL_CAPACITY, DEFAULT_RETRY_BACKOFF_SECONDS, DEFAULT_RETRY_MAX_ATTEMPTS,
};
use crate::error::{MerchgenError, Result};
use std::time::Duration;

/// Runtime configuration for the batch pipeline.
///
/// Values come from the environment with sensible defaults, so embedding
/// applications can tune retry behavior without recompiling.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub retry_max_attempts: u32,
    pub retry_backoff: Duration,
    pub event_channel_capacity: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            retry_max_attempts: DEFAULT_RETRY_MAX_ATTEMPTS,
            retry_backoff: Duration::from_secs(DEFAULT_RETRY_BACKOFF_SECONDS),
            event_channel_capacity: DEFAULT_EVENT_CHANNEL_CAPACITY,
        }
    }
}

impl PipelineConfig {
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(max_attempts) = std::env::var("MERCHGEN_RETRY_MAX_ATTEMPTS") {
            config.retry_max_attempts = max_attempts.parse().map_err(|e| {
                MerchgenError::ConfigurationError(format!("Invalid retry_max_attempts: {e}"))
            })?;
        }

        if let Ok(backoff_seconds) = std::env::var("MERCHGEN_RETRY_BACKOFF_SECONDS") {
            let seconds: u64 = backoff_seconds.parse().map_err(|e| {
                MerchgenError::ConfigurationError(format!("Invalid retry_backoff_seconds: {e}"))
            })?;
            config.retry_backoff = Duration::from_secs(seconds);
        }

        if let Ok(capacity) = std::env::var("MERCHGEN_EVENT_CHANNEL_CAPACITY") {
            config.event_channel_capacity = capacity.parse().map_err(|e| {
                MerchgenError::ConfigurationError(format!("Invalid event_channel_capacity: {e}"))
            })?;
        }

        Ok(config)
    }
}
