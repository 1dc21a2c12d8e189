//! Shared test harness: mock collaborators with call tracking and a flaky
//! store wrapper for simulating record storage outages.

#![allow(dead_code)]

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use merchgen_core::{
    BatchJob, BatchOrchestrator, BatchState, BatchStore, GeneratedArtifact, GenerationGateway,
    GenerationRequest, InMemoryBatchStore, InMemoryQueueStore, PipelineConfig, ProductRegistrar,
    RegisteredProducts, RegistrationRequest, StageError, StoreError,
};

/// Scripted gateway behavior for one stage.
#[derive(Debug, Clone, Copy)]
pub enum GatewayBehavior {
    /// Return the requested number of artifacts.
    Succeed,
    /// Fail every call.
    FailAlways,
    /// Fail the first `n` calls for the stage, then succeed.
    FailTimes(u32),
    /// Return `Ok` with an empty artifact list.
    ReturnEmpty,
}

/// Mock generation gateway tracking every request it receives.
pub struct MockGenerationGateway {
    requests: Mutex<Vec<GenerationRequest>>,
    behaviors: Mutex<HashMap<String, GatewayBehavior>>,
}

impl MockGenerationGateway {
    pub fn new() -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            behaviors: Mutex::new(HashMap::new()),
        }
    }

    pub fn set_behavior(&self, stage: &str, behavior: GatewayBehavior) {
        self.behaviors.lock().insert(stage.to_string(), behavior);
    }

    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().clone()
    }

    pub fn calls_for_stage(&self, stage: &str) -> usize {
        self.requests
            .lock()
            .iter()
            .filter(|request| request.stage == stage)
            .count()
    }

    pub fn total_calls(&self) -> usize {
        self.requests.lock().len()
    }
}

#[async_trait]
impl GenerationGateway for MockGenerationGateway {
    async fn generate(
        &self,
        request: GenerationRequest,
    ) -> anyhow::Result<Vec<GeneratedArtifact>> {
        let call_number = {
            let mut requests = self.requests.lock();
            requests.push(request.clone());
            requests
                .iter()
                .filter(|seen| seen.stage == request.stage)
                .count() as u32
        };

        let behavior = self
            .behaviors
            .lock()
            .get(&request.stage)
            .copied()
            .unwrap_or(GatewayBehavior::Succeed);

        match behavior {
            GatewayBehavior::Succeed => {}
            GatewayBehavior::FailAlways => anyhow::bail!("gateway unavailable"),
            GatewayBehavior::FailTimes(failures) if call_number <= failures => {
                anyhow::bail!("gateway timeout on attempt {call_number}")
            }
            GatewayBehavior::FailTimes(_) => {}
            GatewayBehavior::ReturnEmpty => return Ok(Vec::new()),
        }

        Ok((0..request.variant_count)
            .map(|index| GeneratedArtifact {
                artifact_ref: format!("artifacts/{}/{index}.png", request.stage),
                label: Some(format!("{} variant {index}", request.stage)),
            })
            .collect())
    }
}

/// Mock product registrar minting sequential product identifiers.
pub struct MockProductRegistrar {
    requests: Mutex<Vec<RegistrationRequest>>,
    failing_kinds: Mutex<HashSet<String>>,
    next_id: Mutex<u32>,
}

impl MockProductRegistrar {
    pub fn new() -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            failing_kinds: Mutex::new(HashSet::new()),
            next_id: Mutex::new(1),
        }
    }

    pub fn fail_kind(&self, product_kind: &str) {
        self.failing_kinds.lock().insert(product_kind.to_string());
    }

    pub fn registered_kinds(&self) -> Vec<String> {
        self.requests
            .lock()
            .iter()
            .map(|request| request.metadata.product_kind.clone())
            .collect()
    }
}

#[async_trait]
impl ProductRegistrar for MockProductRegistrar {
    async fn register(
        &self,
        request: RegistrationRequest,
    ) -> anyhow::Result<RegisteredProducts> {
        let kind = request.metadata.product_kind.clone();
        self.requests.lock().push(request);
        if self.failing_kinds.lock().contains(&kind) {
            anyhow::bail!("registrar rejected {kind}");
        }
        let mut next_id = self.next_id.lock();
        let product_id = format!("prod-{kind}-{}", *next_id);
        *next_id += 1;
        Ok(RegisteredProducts {
            product_ids: vec![product_id],
        })
    }
}

/// Batch store wrapper that can simulate the record storage going offline
/// for progress writes while leaving reads and terminal writes working.
pub struct FlakyBatchStore {
    inner: InMemoryBatchStore,
    fail_progress_writes: AtomicBool,
}

impl FlakyBatchStore {
    pub fn new() -> Self {
        Self {
            inner: InMemoryBatchStore::new(),
            fail_progress_writes: AtomicBool::new(false),
        }
    }

    pub fn set_fail_progress_writes(&self, fail: bool) {
        self.fail_progress_writes.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl BatchStore for FlakyBatchStore {
    async fn insert(&self, job: BatchJob) -> Result<(), StoreError> {
        self.inner.insert(job).await
    }

    async fn upsert(&self, job: BatchJob) -> Result<(), StoreError> {
        self.inner.upsert(job).await
    }

    async fn fetch(&self, id: &str) -> Result<Option<BatchJob>, StoreError> {
        self.inner.fetch(id).await
    }

    async fn record_progress(
        &self,
        id: &str,
        description: &str,
        completed_units: u32,
    ) -> Result<(), StoreError> {
        if self.fail_progress_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("record storage offline".to_string()));
        }
        self.inner.record_progress(id, description, completed_units).await
    }

    async fn merge_stage_outcome(
        &self,
        id: &str,
        stage: &str,
        artifacts: Vec<GeneratedArtifact>,
        product_ids: Vec<String>,
        error: Option<StageError>,
    ) -> Result<(), StoreError> {
        self.inner
            .merge_stage_outcome(id, stage, artifacts, product_ids, error)
            .await
    }

    async fn finalize(
        &self,
        id: &str,
        status: BatchState,
        synthetic_error: Option<StageError>,
    ) -> Result<(), StoreError> {
        self.inner.finalize(id, status, synthetic_error).await
    }
}

/// Fully wired orchestrator over mocks and in-memory stores.
pub struct Harness {
    pub orchestrator: BatchOrchestrator,
    pub gateway: Arc<MockGenerationGateway>,
    pub registrar: Arc<MockProductRegistrar>,
    pub batch_store: Arc<InMemoryBatchStore>,
    pub queue_store: Arc<InMemoryQueueStore>,
}

/// Short backoff so retry scenarios run in milliseconds.
pub fn fast_config() -> PipelineConfig {
    PipelineConfig {
        retry_backoff: Duration::from_millis(5),
        ..PipelineConfig::default()
    }
}

pub fn harness() -> Harness {
    let gateway = Arc::new(MockGenerationGateway::new());
    let registrar = Arc::new(MockProductRegistrar::new());
    let batch_store = Arc::new(InMemoryBatchStore::new());
    let queue_store = Arc::new(InMemoryQueueStore::new());
    let orchestrator = BatchOrchestrator::new(
        batch_store.clone(),
        queue_store.clone(),
        gateway.clone(),
        registrar.clone(),
        &fast_config(),
    );
    Harness {
        orchestrator,
        gateway,
        registrar,
        batch_store,
        queue_store,
    }
}

pub fn sample_input() -> merchgen_core::BatchInput {
    merchgen_core::BatchInput {
        source_image_ref: "scans/abbey-road-front.jpg".to_string(),
        artist: Some("The Beatles".to_string()),
        title: Some("Abbey Road".to_string()),
        description: Some("1969 UK first pressing, gatefold sleeve".to_string()),
    }
}

/// Poll until the batch reaches a terminal status.
pub async fn wait_for_terminal(orchestrator: &BatchOrchestrator, batch_id: &str) -> BatchJob {
    for _ in 0..1000 {
        if let Ok(job) = orchestrator.get_status(batch_id).await {
            if job.is_terminal() {
                return job;
            }
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("batch {batch_id} did not reach a terminal status in time");
}
