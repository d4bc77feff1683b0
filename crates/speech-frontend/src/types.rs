use serde::{Deserialize, Serialize};

/// Configuration handed to a recognizer backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecognizerConfig {
    /// Path or identifier of the acoustic model, backend specific.
    pub model: Option<String>,
    pub sample_rate_hz: u32,
    /// Samples per chunk the backend will be fed.
    pub block_size: usize,
}

impl Default for RecognizerConfig {
    fn default() -> Self {
        Self {
            model: None,
            sample_rate_hz: 16_000,
            block_size: 8_000,
        }
    }
}

/// Structured output of one recognition call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcription {
    /// Tokens accepted as part of the utterance, in recognition order.
    pub words: Vec<String>,
    /// Numeric entity extracted from the utterance, if any.
    pub number: Option<i64>,
    /// Tokens detected but discarded (filler or out-of-grammar words).
    pub omitted: Vec<String>,
}

impl Transcription {
    /// True when the front end heard nothing usable at all.
    pub fn is_silence(&self) -> bool {
        self.words.is_empty() && self.omitted.is_empty()
    }

    /// Recognized words joined with single spaces, preserving recognition order.
    pub fn sentence(&self) -> String {
        self.words.join(" ")
    }
}
