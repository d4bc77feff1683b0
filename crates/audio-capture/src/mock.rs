use crate::{AudioChunk, CaptureConfig, CaptureSource, ChunkReceiver, Result};

/// Scripted capture backend: enqueues a fixed set of chunks on `start`.
pub struct MockCapture {
    chunks: Vec<AudioChunk>,
    tx: Option<crate::ChunkSender>,
}

impl MockCapture {
    pub fn new(chunks: Vec<AudioChunk>, cfg: &CaptureConfig) -> (Self, ChunkReceiver) {
        let (tx, rx) = crate::chunk_queue(cfg.queue_capacity.max(chunks.len()));
        (
            Self {
                chunks,
                tx: Some(tx),
            },
            rx,
        )
    }

    /// A chunk of silence at the configured block size.
    pub fn silence(cfg: &CaptureConfig) -> AudioChunk {
        AudioChunk::new(vec![0; cfg.block_size])
    }
}

impl CaptureSource for MockCapture {
    fn start(&mut self) -> Result<()> {
        if let Some(tx) = &self.tx {
            for chunk in self.chunks.drain(..) {
                tx.push(chunk);
            }
        }
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        // Dropping the sender guarantees no further enqueues.
        self.tx = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn replays_scripted_chunks_in_order() {
        let cfg = CaptureConfig {
            block_size: 2,
            ..CaptureConfig::default()
        };
        let chunks = vec![
            AudioChunk::new(vec![1, 1]),
            AudioChunk::new(vec![2, 2]),
            AudioChunk::new(vec![3, 3]),
        ];
        let (mut capture, rx) = MockCapture::new(chunks.clone(), &cfg);
        capture.start().unwrap();
        for expected in chunks {
            assert_eq!(rx.next_chunk(Duration::from_millis(50)), Some(expected));
        }
        capture.stop().unwrap();
        assert_eq!(rx.next_chunk(Duration::from_millis(10)), None);
    }
}
