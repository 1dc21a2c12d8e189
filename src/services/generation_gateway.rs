use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// One request to the image generation service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Reference to the uploaded source photo.
    pub source_image_ref: String,
    /// Name of the stage issuing the request.
    pub stage: String,
    /// Style instructions passed through verbatim.
    pub style_prompt: String,
    /// Number of variants expected back; 1 for single-artifact stages.
    pub variant_count: u32,
}

/// One derived image artifact returned by the gateway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedArtifact {
    /// Storage reference of the generated image.
    pub artifact_ref: String,
    /// Optional human label, e.g. the style variant name.
    pub label: Option<String>,
}

/// Stateless request/response calls turning a source image into derived
/// artifacts.
///
/// An `Ok` with an empty list counts as "no usable artifact" and is treated
/// the same as a failure by retry-enabled stages.
#[async_trait]
pub trait GenerationGateway: Send + Sync {
    async fn generate(
        &self,
        request: GenerationRequest,
    ) -> anyhow::Result<Vec<GeneratedArtifact>>;
}
