//! # Pipeline Definition
//!
//! The fixed, ordered stage list for merchandise generation. Stages execute
//! strictly in declared order; none depends on another's artifacts, so the
//! sequencing exists to produce a single monotonically increasing progress
//! counter for poll consumers.

use std::time::Duration;

use crate::config::PipelineConfig;
use crate::constants::{stages, EXPECTED_STYLE_VARIANTS};

/// Retry behavior for one stage's generation call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first.
    pub max_attempts: u32,
    /// Fixed wait between attempts.
    pub backoff: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, backoff: Duration) -> Self {
        Self {
            max_attempts,
            backoff,
        }
    }

    /// No retries: one attempt, fail on the first error.
    pub fn single_attempt() -> Self {
        Self {
            max_attempts: 1,
            backoff: Duration::ZERO,
        }
    }

    pub fn is_retryable(&self) -> bool {
        self.max_attempts > 1
    }
}

/// How a stage calls the generation gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationMode {
    /// One call producing one artifact.
    Single,
    /// One call expected to return a fixed number of variant artifacts.
    /// The stage advances by that many units atomically when the call
    /// returns.
    FanOut { expected_variants: u32 },
}

impl GenerationMode {
    pub fn variant_count(&self) -> u32 {
        match self {
            Self::Single => 1,
            Self::FanOut { expected_variants } => *expected_variants,
        }
    }
}

/// One ordered step of the pipeline.
#[derive(Debug, Clone)]
pub struct StageDefinition {
    pub name: &'static str,
    /// Human-readable text written to the batch record before the stage
    /// starts; poll consumers display it as "what's happening now".
    pub progress_label: &'static str,
    /// Style instructions forwarded to the gateway verbatim.
    pub style_prompt: &'static str,
    /// Units this stage contributes to the batch total.
    pub units: u32,
    pub generation: GenerationMode,
    /// Merchandise kind to register from the artifacts; `None` skips the
    /// registrar call entirely.
    pub product_kind: Option<&'static str>,
    pub retry: RetryPolicy,
}

/// The merchandise pipeline in its declared execution order.
pub fn merchandise_pipeline(config: &PipelineConfig) -> Vec<StageDefinition> {
    vec![
        StageDefinition {
            name: stages::STYLE_VARIANTS,
            progress_label: "Generating 7 style variants...",
            style_prompt: "reinterpret the cover art in seven distinct art styles",
            units: EXPECTED_STYLE_VARIANTS,
            generation: GenerationMode::FanOut {
                expected_variants: EXPECTED_STYLE_VARIANTS,
            },
            product_kind: Some("print_collection"),
            retry: RetryPolicy::single_attempt(),
        },
        StageDefinition {
            name: stages::POSTER,
            progress_label: "Rendering poster artwork...",
            style_prompt: "large-format poster composition with title treatment",
            units: 1,
            generation: GenerationMode::Single,
            product_kind: Some("poster"),
            retry: RetryPolicy::single_attempt(),
        },
        StageDefinition {
            name: stages::APPAREL,
            progress_label: "Creating apparel mockup...",
            style_prompt: "screen-print friendly apparel graphic",
            units: 1,
            generation: GenerationMode::Single,
            product_kind: Some("apparel"),
            retry: RetryPolicy::single_attempt(),
        },
        StageDefinition {
            name: stages::CANVAS,
            progress_label: "Rendering gallery canvas...",
            style_prompt: "gallery-wrapped canvas render with depth preview",
            units: 1,
            generation: GenerationMode::Single,
            product_kind: Some("canvas"),
            retry: RetryPolicy::new(config.retry_max_attempts, config.retry_backoff),
        },
        StageDefinition {
            name: stages::PROMO_BANNER,
            progress_label: "Composing promotional banner...",
            style_prompt: "wide promotional banner for storefront placement",
            units: 1,
            generation: GenerationMode::Single,
            product_kind: None,
            retry: RetryPolicy::single_attempt(),
        },
    ]
}

/// Sum of all stage units. Constant for a given pipeline definition.
pub fn total_units(stages: &[StageDefinition]) -> u32 {
    stages.iter().map(|stage| stage.units).sum()
}
