//! speech-frontend: the speech-to-text boundary of the voice pipeline
//!
//! The engine itself is external; this crate fixes its input/output contract
//! (one fixed-size chunk in, one structured transcription out) and provides a
//! scripted mock backend so the rest of the pipeline is testable without an
//! acoustic model.

mod types;
pub use types::{RecognizerConfig, Transcription};

mod traits;
pub use traits::SpeechFrontEnd;

#[cfg(feature = "mock")]
mod mock;
#[cfg(feature = "mock")]
pub use mock::MockRecognizer;

pub mod plugin;
