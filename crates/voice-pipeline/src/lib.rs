//! voice-pipeline: the consumer loop tying capture, recognition, intent
//! classification and command routing together
//!
//! Exactly two lines of execution exist in the core: the capture producer
//! owned by the audio backend, and this orchestrator, which drains the chunk
//! queue and runs the front end, classifier and router sequentially.

mod types;
pub use types::{PipelineConfig, PipelineState, PipelineStats, ShutdownFlag};

mod error;
pub use error::{PipelineError, Result};

mod orchestrator;
pub use orchestrator::Orchestrator;
