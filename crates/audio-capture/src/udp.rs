use std::net::{SocketAddr, UdpSocket};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, info};

use crate::{
    AudioChunk, CaptureConfig, CaptureError, CaptureSource, ChunkReceiver, ChunkSender, Result,
};

/// Receives raw S16LE mono audio datagrams from a companion streaming app.
///
/// Only datagrams of exactly `block_size * 2` bytes become chunks; any other
/// size is counted and dropped before it can violate the front end's
/// fixed-chunk-size assumption.
pub struct UdpCapture {
    socket: UdpSocket,
    tx: ChunkSender,
    block_bytes: usize,
    closing: Arc<AtomicBool>,
    discarded: Arc<AtomicU64>,
    worker: Option<JoinHandle<()>>,
}

impl UdpCapture {
    /// Bind the listening socket. A bind failure is fatal for the run.
    pub fn bind(addr: &str, cfg: &CaptureConfig) -> Result<(Self, ChunkReceiver)> {
        let socket = UdpSocket::bind(addr).map_err(|e| CaptureError::Bind {
            addr: addr.to_string(),
            source: e,
        })?;
        // Short read timeout so the receive thread observes the closing flag.
        socket.set_read_timeout(Some(Duration::from_millis(200)))?;
        let (tx, rx) = crate::chunk_queue(cfg.queue_capacity);
        info!("udp capture listening on {}", socket.local_addr()?);
        Ok((
            Self {
                socket,
                tx,
                block_bytes: cfg.block_size * 2,
                closing: Arc::new(AtomicBool::new(false)),
                discarded: Arc::new(AtomicU64::new(0)),
                worker: None,
            },
            rx,
        ))
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.socket.local_addr()?)
    }

    /// Datagrams discarded for having the wrong payload size.
    pub fn discarded(&self) -> u64 {
        self.discarded.load(Ordering::Relaxed)
    }
}

impl CaptureSource for UdpCapture {
    fn start(&mut self) -> Result<()> {
        if self.worker.is_some() {
            return Ok(());
        }
        let socket = self.socket.try_clone()?;
        let tx = self.tx.clone();
        let closing = self.closing.clone();
        let discarded = self.discarded.clone();
        let block_bytes = self.block_bytes;
        self.worker = Some(thread::spawn(move || {
            // Oversized datagrams truncate into this buffer and still read as
            // a wrong length, so they are dropped like undersized ones.
            let mut buf = vec![0u8; block_bytes.max(1) * 2];
            while !closing.load(Ordering::Relaxed) {
                let received = match socket.recv(&mut buf) {
                    Ok(n) => n,
                    Err(e)
                        if matches!(
                            e.kind(),
                            std::io::ErrorKind::WouldBlock | std::io::ErrorKind::TimedOut
                        ) =>
                    {
                        continue;
                    }
                    Err(e) => {
                        debug!("udp recv error: {e}");
                        continue;
                    }
                };
                if received != block_bytes {
                    let total = discarded.fetch_add(1, Ordering::Relaxed) + 1;
                    debug!(
                        "dropping {received}-byte datagram, want {block_bytes} (total dropped: {total})"
                    );
                    continue;
                }
                tx.push(AudioChunk::from_le_bytes(&buf[..received]));
            }
        }));
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        self.closing.store(true, Ordering::Relaxed);
        if let Some(worker) = self.worker.take() {
            worker
                .join()
                .map_err(|_| CaptureError::Device("udp receive thread panicked".to_string()))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> CaptureConfig {
        CaptureConfig {
            sample_rate_hz: 16_000,
            block_size: 4,
            queue_capacity: 16,
        }
    }

    #[test]
    fn enqueues_exact_size_and_drops_the_rest() {
        let cfg = test_config();
        let (mut capture, rx) = UdpCapture::bind("127.0.0.1:0", &cfg).unwrap();
        let addr = capture.local_addr().unwrap();
        capture.start().unwrap();

        let sender = UdpSocket::bind("127.0.0.1:0").unwrap();
        // One byte short, one byte long, then exact.
        sender.send_to(&[0u8; 7], addr).unwrap();
        sender.send_to(&[0u8; 9], addr).unwrap();
        let payload: Vec<u8> = [1i16, -2, 3, -4]
            .iter()
            .flat_map(|s| s.to_le_bytes())
            .collect();
        sender.send_to(&payload, addr).unwrap();

        let chunk = rx.next_chunk(Duration::from_secs(2)).unwrap();
        assert_eq!(chunk.samples(), &[1, -2, 3, -4]);
        // Nothing else made it through.
        assert_eq!(rx.next_chunk(Duration::from_millis(50)), None);
        assert_eq!(capture.discarded(), 2);

        capture.stop().unwrap();
    }

    #[test]
    fn stop_joins_worker_and_halts_enqueues() {
        let cfg = test_config();
        let (mut capture, rx) = UdpCapture::bind("127.0.0.1:0", &cfg).unwrap();
        let addr = capture.local_addr().unwrap();
        capture.start().unwrap();
        capture.stop().unwrap();

        let sender = UdpSocket::bind("127.0.0.1:0").unwrap();
        let payload = vec![0u8; 8];
        sender.send_to(&payload, addr).unwrap();
        assert_eq!(rx.next_chunk(Duration::from_millis(300)), None);
        // Stop is idempotent.
        capture.stop().unwrap();
    }

    #[test]
    fn bind_failure_is_fatal() {
        let cfg = test_config();
        let err = UdpCapture::bind("256.0.0.1:0", &cfg).err().unwrap();
        assert!(matches!(err, CaptureError::Bind { .. }));
    }
}
