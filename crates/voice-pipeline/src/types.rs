use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Orchestrator tuning knobs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Minimum cosine similarity to accept a classification.
    pub threshold: f32,
    /// How long one blocking queue poll waits before re-checking shutdown.
    pub poll_timeout_ms: u64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            threshold: 0.7,
            poll_timeout_ms: 100,
        }
    }
}

/// Lifecycle of one pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Idle,
    Listening,
    ShuttingDown,
    Stopped,
}

/// Per-run diagnostic counters.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PipelineStats {
    pub chunks: u64,
    pub utterances: u64,
    pub rejections: u64,
    pub dispatched: u64,
}

/// Cooperative stop signal shared between the orchestrator and whoever
/// supervises it. Requesting shutdown is sticky.
#[derive(Clone, Debug, Default)]
pub struct ShutdownFlag(Arc<AtomicBool>);

impl ShutdownFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_requested(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}
