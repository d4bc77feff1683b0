use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use tracing::{info, warn};

use crate::{
    AudioChunk, CaptureConfig, CaptureError, CaptureSource, ChunkReceiver, ChunkSender, Result,
};

/// Local microphone capture via cpal. The device callback re-blocks whatever
/// the driver delivers into chunks of exactly `block_size` samples.
pub struct MicCapture {
    stream: Option<cpal::Stream>,
}

impl MicCapture {
    /// Open the default input device. Device or stream setup failures are
    /// fatal for the run; no chunks will ever arrive.
    pub fn open(cfg: &CaptureConfig) -> Result<(Self, ChunkReceiver)> {
        let host = cpal::default_host();
        let device = host
            .default_input_device()
            .ok_or_else(|| CaptureError::Device("no default input device".to_string()))?;
        let supported = device
            .default_input_config()
            .map_err(|e| CaptureError::Device(format!("input config: {e}")))?;
        let channels = supported.channels();
        info!(
            "mic capture: {} ch {} Hz device, blocking into {}-sample chunks",
            channels,
            supported.sample_rate().0,
            cfg.block_size
        );

        let (tx, rx) = crate::chunk_queue(cfg.queue_capacity);
        let err_fn = |err: cpal::StreamError| warn!("input stream error: {err}");
        let stream = match supported.sample_format() {
            cpal::SampleFormat::I16 => build_stream::<i16>(
                &device,
                &supported.into(),
                channels,
                cfg.block_size,
                tx,
                err_fn,
                |s| s,
            )?,
            cpal::SampleFormat::U16 => build_stream::<u16>(
                &device,
                &supported.into(),
                channels,
                cfg.block_size,
                tx,
                err_fn,
                |s| (s as i32 - 32768) as i16,
            )?,
            cpal::SampleFormat::F32 => build_stream::<f32>(
                &device,
                &supported.into(),
                channels,
                cfg.block_size,
                tx,
                err_fn,
                |s| (s.clamp(-1.0, 1.0) * 32767.0) as i16,
            )?,
            other => {
                return Err(CaptureError::Device(format!(
                    "unsupported sample format: {other:?}"
                )))
            }
        };
        Ok((
            Self {
                stream: Some(stream),
            },
            rx,
        ))
    }
}

fn build_stream<T: cpal::SizedSample + Copy + Send + 'static>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    channels: u16,
    block_size: usize,
    tx: ChunkSender,
    err_fn: impl Fn(cpal::StreamError) + Send + 'static,
    convert: impl Fn(T) -> i16 + Send + 'static,
) -> Result<cpal::Stream> {
    let mut pending = Vec::<i16>::with_capacity(block_size * 2);
    let stream = device
        .build_input_stream(
            config,
            move |data: &[T], _| {
                // First channel only, for mono.
                for frame in data.chunks_exact(channels as usize) {
                    pending.push(convert(frame[0]));
                }
                while pending.len() >= block_size {
                    let rest = pending.split_off(block_size);
                    let block = std::mem::replace(&mut pending, rest);
                    tx.push(AudioChunk::new(block));
                }
            },
            err_fn,
            None,
        )
        .map_err(|e| CaptureError::Device(format!("build input stream: {e}")))?;
    Ok(stream)
}

impl CaptureSource for MicCapture {
    fn start(&mut self) -> Result<()> {
        match &self.stream {
            Some(stream) => stream
                .play()
                .map_err(|e| CaptureError::Device(format!("stream play: {e}"))),
            None => Err(CaptureError::Device("capture already stopped".to_string())),
        }
    }

    fn stop(&mut self) -> Result<()> {
        if let Some(stream) = self.stream.take() {
            stream
                .pause()
                .map_err(|e| CaptureError::Device(format!("stream pause: {e}")))?;
        }
        Ok(())
    }
}
