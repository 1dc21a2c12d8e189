use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::services::generation_gateway::GeneratedArtifact;

/// Descriptive metadata attached to a registered product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductMetadata {
    pub artist: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    /// Merchandise kind this registration creates, e.g. `poster`.
    pub product_kind: String,
}

/// One request to persist a product from a set of artifacts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistrationRequest {
    pub artifacts: Vec<GeneratedArtifact>,
    pub metadata: ProductMetadata,
}

/// Identifiers of the persisted product records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisteredProducts {
    pub product_ids: Vec<String>,
}

/// Stateless calls that turn artifacts into persisted product records.
/// May fail independently of generation.
#[async_trait]
pub trait ProductRegistrar: Send + Sync {
    async fn register(&self, request: RegistrationRequest)
        -> anyhow::Result<RegisteredProducts>;
}
