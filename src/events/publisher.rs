use serde_json::Value;
use tokio::sync::broadcast;

/// High-throughput publisher for batch lifecycle events
#[derive(Debug, Clone)]
pub struct EventPublisher {
    sender: broadcast::Sender<BatchEvent>,
}

/// Event that has been published
#[derive(Debug, Clone)]
pub struct BatchEvent {
    pub name: String,
    pub batch_id: String,
    pub context: Value,
    pub published_at: chrono::DateTime<chrono::Utc>,
}

impl EventPublisher {
    /// Create a new event publisher with the specified channel capacity
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event with the given name, batch id, and context
    pub async fn publish(
        &self,
        event_name: impl Into<String>,
        batch_id: impl Into<String>,
        context: Value,
    ) -> Result<(), PublishError> {
        let event = BatchEvent {
            name: event_name.into(),
            batch_id: batch_id.into(),
            context,
            published_at: chrono::Utc::now(),
        };

        // A broadcast send fails only when there are no subscribers, which
        // is an acceptable condition for lifecycle events
        match self.sender.send(event) {
            Ok(_) => Ok(()),
            Err(broadcast::error::SendError(_)) => Ok(()),
        }
    }

    /// Subscribe to events
    pub fn subscribe(&self) -> broadcast::Receiver<BatchEvent> {
        self.sender.subscribe()
    }

    /// Get the number of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

/// Error types for event publishing
#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    #[error("Event channel is closed")]
    ChannelClosed,
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Default for EventPublisher {
    fn default() -> Self {
        Self::new(1000)
    }
}
