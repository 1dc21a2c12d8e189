//! # Stage Runner
//!
//! Executes one pipeline stage: calls the generation gateway (with bounded
//! retry where the stage's policy allows it), then registers the resulting
//! artifacts as a product. Every collaborator failure is caught here and
//! converted into a stage-tagged error entry, so a bad stage never stops
//! the ones after it.

use std::sync::Arc;

use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::models::{BatchInput, StageError};
use crate::orchestration::pipeline::StageDefinition;
use crate::orchestration::types::StageOutcome;
use crate::services::generation_gateway::{
    GeneratedArtifact, GenerationGateway, GenerationRequest,
};
use crate::services::product_registrar::{
    ProductMetadata, ProductRegistrar, RegistrationRequest,
};

/// Runs individual stages against the external collaborators.
#[derive(Clone)]
pub struct StageRunner {
    gateway: Arc<dyn GenerationGateway>,
    registrar: Arc<dyn ProductRegistrar>,
}

impl StageRunner {
    pub fn new(gateway: Arc<dyn GenerationGateway>, registrar: Arc<dyn ProductRegistrar>) -> Self {
        Self { gateway, registrar }
    }

    /// Execute one stage and report a partial result or error without
    /// throwing.
    ///
    /// The outcome always carries the stage's full unit count: a failed
    /// stage still moves the batch past itself. A generation failure skips
    /// registration for the stage; a registration failure keeps the
    /// generated artifacts and records the error alongside them.
    pub async fn run_stage(&self, stage: &StageDefinition, input: &BatchInput) -> StageOutcome {
        let artifacts = match self.generate_with_retry(stage, input).await {
            Ok(artifacts) => artifacts,
            Err(error) => {
                warn!(
                    stage = stage.name,
                    error = %error,
                    "Stage generation failed"
                );
                return StageOutcome {
                    stage: stage.name.to_string(),
                    units_completed: stage.units,
                    artifacts: Vec::new(),
                    product_ids: Vec::new(),
                    error: Some(StageError {
                        stage: stage.name.to_string(),
                        error: error.to_string(),
                    }),
                };
            }
        };

        let mut product_ids = Vec::new();
        let mut error = None;

        if let Some(product_kind) = stage.product_kind {
            let request = RegistrationRequest {
                artifacts: artifacts.clone(),
                metadata: ProductMetadata {
                    artist: input.artist.clone(),
                    title: input.title.clone(),
                    description: input.description.clone(),
                    product_kind: product_kind.to_string(),
                },
            };
            match self.registrar.register(request).await {
                Ok(registered) => {
                    debug!(
                        stage = stage.name,
                        product_ids = ?registered.product_ids,
                        "Registered products for stage"
                    );
                    product_ids = registered.product_ids;
                }
                Err(registration_error) => {
                    warn!(
                        stage = stage.name,
                        error = %registration_error,
                        "Product registration failed; keeping generated artifacts"
                    );
                    error = Some(StageError {
                        stage: stage.name.to_string(),
                        error: registration_error.to_string(),
                    });
                }
            }
        }

        StageOutcome {
            stage: stage.name.to_string(),
            units_completed: stage.units,
            artifacts,
            product_ids,
            error,
        }
    }

    /// Call the gateway under the stage's retry policy.
    ///
    /// An `Ok` response with no artifacts counts as unusable and is
    /// retried like a failure. A successful retry is indistinguishable
    /// from a first-attempt success to the caller.
    async fn generate_with_retry(
        &self,
        stage: &StageDefinition,
        input: &BatchInput,
    ) -> anyhow::Result<Vec<GeneratedArtifact>> {
        let request = GenerationRequest {
            source_image_ref: input.source_image_ref.clone(),
            stage: stage.name.to_string(),
            style_prompt: stage.style_prompt.to_string(),
            variant_count: stage.generation.variant_count(),
        };

        let mut last_error: Option<anyhow::Error> = None;
        for attempt in 1..=stage.retry.max_attempts {
            if attempt > 1 {
                sleep(stage.retry.backoff).await;
            }
            match self.gateway.generate(request.clone()).await {
                Ok(artifacts) if !artifacts.is_empty() => {
                    if attempt > 1 {
                        info!(
                            stage = stage.name,
                            attempt,
                            "Generation succeeded after retry"
                        );
                    }
                    return Ok(artifacts);
                }
                Ok(_) => {
                    warn!(
                        stage = stage.name,
                        attempt,
                        max_attempts = stage.retry.max_attempts,
                        "Gateway returned no usable artifact"
                    );
                    last_error = Some(anyhow::anyhow!("gateway returned no usable artifact"));
                }
                Err(gateway_error) => {
                    warn!(
                        stage = stage.name,
                        attempt,
                        max_attempts = stage.retry.max_attempts,
                        error = %gateway_error,
                        "Gateway call failed"
                    );
                    last_error = Some(gateway_error);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| anyhow::anyhow!("generation produced no result")))
    }
}
