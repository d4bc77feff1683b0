//! audio-capture: fixed-size audio chunk sources feeding a bounded handoff queue
//!
//! Two capture backends produce the same contract: a local microphone (feature
//! `audio`, via cpal) and a UDP listener for a companion streaming app. Both
//! push whole chunks onto a single bounded FIFO queue consumed by the pipeline
//! loop. The default `mock` backend enqueues scripted chunks so flows are
//! testable on any host.

mod types;
pub use types::{AudioChunk, CaptureConfig};

mod error;
pub use error::{CaptureError, Result};

mod queue;
pub use queue::{chunk_queue, ChunkReceiver, ChunkSender};

mod traits;
pub use traits::CaptureSource;

mod udp;
pub use udp::UdpCapture;

#[cfg(feature = "audio")]
mod mic;
#[cfg(feature = "audio")]
pub use mic::MicCapture;

#[cfg(feature = "mock")]
mod mock;
#[cfg(feature = "mock")]
pub use mock::MockCapture;
