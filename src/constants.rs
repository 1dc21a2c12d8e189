//! # System Constants
//!
//! Central definitions for stage names, lifecycle event names, and pipeline
//! defaults shared across the orchestration components.

/// Stage names for the merchandise pipeline, in declared execution order.
pub mod stages {
    /// Fan-out stage producing the set of artistic style variants.
    pub const STYLE_VARIANTS: &str = "style_variants";
    /// Poster render stage.
    pub const POSTER: &str = "poster";
    /// Apparel mockup stage.
    pub const APPAREL: &str = "apparel";
    /// Canvas print render stage (retry-enabled).
    pub const CANVAS: &str = "canvas";
    /// Promotional banner stage (generation only, no product registration).
    pub const PROMO_BANNER: &str = "promo_banner";
}

/// Lifecycle event names published by the orchestrator.
pub mod events {
    pub const BATCH_STARTED: &str = "batch.started";
    pub const STAGE_STARTED: &str = "batch.stage_started";
    pub const STAGE_COMPLETED: &str = "batch.stage_completed";
    pub const BATCH_FINALIZED: &str = "batch.finalized";
}

/// Tag used for the synthetic error entry written when a batch fails outside
/// any stage boundary. Distinct from every stage name so consumers can tell
/// a fatal orchestration failure apart from per-stage failures.
pub const ORCHESTRATION_ERROR_TAG: &str = "orchestration";

/// Number of style variants the fan-out stage expects per batch.
pub const EXPECTED_STYLE_VARIANTS: u32 = 7;

/// Default maximum attempts for retry-enabled stages.
pub const DEFAULT_RETRY_MAX_ATTEMPTS: u32 = 3;

/// Default backoff between retry attempts, in seconds.
pub const DEFAULT_RETRY_BACKOFF_SECONDS: u64 = 5;

/// Default capacity of the lifecycle event channel.
pub const DEFAULT_EVENT_CHANNEL_CAPACITY: usize = 1000;
