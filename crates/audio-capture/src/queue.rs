use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError, SyncSender, TrySendError};
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

use crate::AudioChunk;

/// Create the bounded handoff queue between a capture thread and the pipeline
/// loop. Strict FIFO with a single producer and a single consumer. When the
/// queue is full the newest chunk is dropped at the producer so a device
/// callback never blocks.
pub fn chunk_queue(capacity: usize) -> (ChunkSender, ChunkReceiver) {
    let (tx, rx) = mpsc::sync_channel(capacity);
    let dropped = Arc::new(AtomicU64::new(0));
    (
        ChunkSender {
            tx,
            dropped: dropped.clone(),
        },
        ChunkReceiver { rx, dropped },
    )
}

/// Producer half, held by the capture backend.
#[derive(Clone)]
pub struct ChunkSender {
    tx: SyncSender<AudioChunk>,
    dropped: Arc<AtomicU64>,
}

impl ChunkSender {
    /// Enqueue one chunk. Returns false when the chunk was dropped, either
    /// because the queue was full or because the consumer went away.
    pub fn push(&self, chunk: AudioChunk) -> bool {
        match self.tx.try_send(chunk) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                let total = self.dropped.fetch_add(1, Ordering::Relaxed) + 1;
                warn!("chunk queue full, dropping newest chunk (total dropped: {total})");
                false
            }
            Err(TrySendError::Disconnected(_)) => false,
        }
    }
}

/// Consumer half, held by the pipeline loop.
pub struct ChunkReceiver {
    rx: mpsc::Receiver<AudioChunk>,
    dropped: Arc<AtomicU64>,
}

impl ChunkReceiver {
    /// Block for up to `timeout` waiting for the next chunk in capture order.
    pub fn next_chunk(&self, timeout: Duration) -> Option<AudioChunk> {
        match self.rx.recv_timeout(timeout) {
            Ok(chunk) => Some(chunk),
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => None,
        }
    }

    /// Discard everything currently buffered. Returns the number discarded.
    pub fn drain(&self) -> usize {
        let mut discarded = 0;
        while self.rx.try_recv().is_ok() {
            discarded += 1;
        }
        discarded
    }

    /// Chunks dropped at the producer because the queue was full.
    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    fn chunk(value: i16) -> AudioChunk {
        AudioChunk::new(vec![value; 4])
    }

    #[test]
    fn preserves_fifo_order_across_threads() {
        let (tx, rx) = chunk_queue(16);
        let producer = thread::spawn(move || {
            for i in 0..10 {
                assert!(tx.push(chunk(i)));
            }
        });
        producer.join().unwrap();
        for i in 0..10 {
            let got = rx.next_chunk(Duration::from_secs(1)).unwrap();
            assert_eq!(got, chunk(i));
        }
    }

    #[test]
    fn drops_newest_when_full() {
        let (tx, rx) = chunk_queue(2);
        assert!(tx.push(chunk(1)));
        assert!(tx.push(chunk(2)));
        assert!(!tx.push(chunk(3)));
        assert_eq!(rx.dropped(), 1);
        // The two oldest chunks survive, in order.
        assert_eq!(rx.next_chunk(Duration::from_millis(10)), Some(chunk(1)));
        assert_eq!(rx.next_chunk(Duration::from_millis(10)), Some(chunk(2)));
        assert_eq!(rx.next_chunk(Duration::from_millis(10)), None);
    }

    #[test]
    fn drain_discards_buffered_chunks() {
        let (tx, rx) = chunk_queue(8);
        for i in 0..5 {
            tx.push(chunk(i));
        }
        assert_eq!(rx.drain(), 5);
        assert_eq!(rx.next_chunk(Duration::from_millis(10)), None);
    }

    #[test]
    fn next_chunk_times_out_when_empty() {
        let (_tx, rx) = chunk_queue(4);
        assert_eq!(rx.next_chunk(Duration::from_millis(10)), None);
    }
}
