use serde::{Deserialize, Serialize};

/// Configuration shared by all capture backends.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureConfig {
    /// Sample rate of the captured audio.
    pub sample_rate_hz: u32,
    /// Samples per chunk. Every chunk handed to the consumer has exactly this length.
    pub block_size: usize,
    /// Maximum number of chunks buffered between producer and consumer.
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,
}

fn default_queue_capacity() -> usize {
    64
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            sample_rate_hz: 16_000,
            block_size: 8_000,
            queue_capacity: default_queue_capacity(),
        }
    }
}

/// One fixed-size block of mono S16LE samples. Immutable once captured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioChunk {
    samples: Vec<i16>,
}

impl AudioChunk {
    pub fn new(samples: Vec<i16>) -> Self {
        Self { samples }
    }

    /// Decode a little-endian S16 byte payload. The caller is responsible for
    /// checking the payload length; a trailing odd byte is ignored.
    pub fn from_le_bytes(bytes: &[u8]) -> Self {
        let samples = bytes
            .chunks_exact(2)
            .map(|b| i16::from_le_bytes([b[0], b[1]]))
            .collect();
        Self { samples }
    }

    pub fn samples(&self) -> &[i16] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}
