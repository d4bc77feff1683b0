//! voicectl: operate a robot by voice or text
//!
//! `run` wires the full pipeline (capture -> speech -> intent -> router);
//! `listen` runs the speech server alone; `classify` and `route` exercise the
//! text and robot boundaries from stdin.

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::io::{self, BufRead};
use std::time::Instant;
use tokio::task;
use tracing::{info, warn};

use audio_capture::{CaptureConfig, CaptureSource, ChunkReceiver, MockCapture, UdpCapture};
use command_router::{CommandRouter, LogSink};
use intent_classifier::plugin::{new_encoder, EncoderKind};
use intent_classifier::IntentClassifier;
use speech_frontend::plugin::{new_recognizer, RecognizerKind};
use speech_frontend::{RecognizerConfig, SpeechFrontEnd, Transcription};
use voice_pipeline::{Orchestrator, PipelineConfig, PipelineStats, ShutdownFlag};

#[derive(Parser)]
#[command(name = "voicectl")]
#[command(about = "Voice-command robot pipeline", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CaptureMode {
    /// Scripted chunks, no hardware needed
    Mock,
    /// Local microphone (requires the `audio` build feature)
    Mic,
    /// UDP datagrams from a companion streaming app
    Udp,
}

#[derive(Args, Debug, Clone)]
struct CaptureArgs {
    /// Audio source to capture from
    #[arg(long, value_enum, default_value_t = CaptureMode::Mock)]
    capture: CaptureMode,

    /// Listen address for udp capture
    #[arg(long, default_value = "0.0.0.0:50005")]
    listen: String,

    /// Sample rate in Hz
    #[arg(long, default_value_t = 16_000)]
    sample_rate: u32,

    /// Samples per chunk
    #[arg(long, default_value_t = 8_000)]
    block_size: usize,

    /// Recognizer backend
    #[arg(long, default_value = "mock")]
    recognizer: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Full pipeline: capture, recognize, classify, dispatch
    Run {
        #[command(flatten)]
        capture: CaptureArgs,

        /// Minimum similarity to accept a classification
        #[arg(long, default_value_t = 0.7)]
        threshold: f32,
    },
    /// Speech server only: log transcriptions, no classification
    Listen {
        #[command(flatten)]
        capture: CaptureArgs,
    },
    /// Text server: classify utterances from stdin (or --text once)
    Classify {
        /// Classify this sentence and exit
        #[arg(long)]
        text: Option<String>,

        #[arg(long, default_value_t = 0.7)]
        threshold: f32,
    },
    /// Robot server: forward "<index>[,<number>]" messages from stdin
    Route,
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_tracing();
    let cli = Cli::parse();
    match cli.command {
        Commands::Run { capture, threshold } => run_app(capture, threshold).await,
        Commands::Listen { capture } => listen_app(capture).await,
        Commands::Classify { text, threshold } => classify_app(text, threshold),
        Commands::Route => route_app(),
    }
}

async fn run_app(args: CaptureArgs, threshold: f32) -> Result<()> {
    let flag = ShutdownFlag::new();
    let worker_flag = flag.clone();
    let mut worker = task::spawn_blocking(move || run_pipeline(args, threshold, worker_flag));
    let stats = tokio::select! {
        finished = &mut worker => finished??,
        _ = tokio::signal::ctrl_c() => {
            info!("interrupt received, shutting down");
            flag.request();
            worker.await??
        }
    };
    info!("run stats: {}", serde_json::to_string(&stats)?);
    Ok(())
}

/// Build and drive the whole pipeline on one blocking thread. Capture
/// backends are constructed here because a live audio stream must stay on the
/// thread that owns it.
fn run_pipeline(args: CaptureArgs, threshold: f32, flag: ShutdownFlag) -> Result<PipelineStats> {
    let cfg = capture_config(&args);
    let (capture, queue) = build_capture(&args, &cfg)?;
    let recognizer = build_recognizer(&args, &cfg)?;
    let classifier = IntentClassifier::new(new_encoder(EncoderKind::HashedBow)?)?;
    let router = CommandRouter::new()?;
    let mut orchestrator = Orchestrator::new(
        PipelineConfig {
            threshold,
            ..PipelineConfig::default()
        },
        capture,
        queue,
        recognizer,
        classifier,
        router,
        LogSink,
    );
    orchestrator.set_shutdown_flag(flag);
    Ok(orchestrator.run()?)
}

async fn listen_app(args: CaptureArgs) -> Result<()> {
    let flag = ShutdownFlag::new();
    let worker_flag = flag.clone();
    let mut worker = task::spawn_blocking(move || run_listen(args, worker_flag));
    tokio::select! {
        finished = &mut worker => finished??,
        _ = tokio::signal::ctrl_c() => {
            info!("interrupt received, closing capture");
            flag.request();
            worker.await??;
        }
    }
    Ok(())
}

/// The speech server: capture and transcribe, nothing downstream.
fn run_listen(args: CaptureArgs, flag: ShutdownFlag) -> Result<()> {
    let cfg = capture_config(&args);
    let (mut capture, queue) = build_capture(&args, &cfg)?;
    let mut recognizer = build_recognizer(&args, &cfg)?;
    capture.start()?;
    info!("speech server online");
    while !flag.is_requested() {
        let Some(chunk) = queue.next_chunk(std::time::Duration::from_millis(100)) else {
            continue;
        };
        let transcription = recognizer.transcribe(&chunk);
        log_transcription(&transcription);
    }
    capture.stop()?;
    queue.drain();
    info!("speech server closed");
    Ok(())
}

fn classify_app(text: Option<String>, threshold: f32) -> Result<()> {
    let classifier = IntentClassifier::new(new_encoder(EncoderKind::HashedBow)?)?;
    if let Some(sentence) = text {
        classify_one(&classifier, &sentence, threshold);
        return Ok(());
    }
    info!("text server online, reading utterances from stdin");
    for line in io::stdin().lock().lines() {
        let line = line?;
        let sentence = line.trim();
        if sentence.is_empty() {
            continue;
        }
        classify_one(&classifier, sentence, threshold);
    }
    Ok(())
}

fn classify_one<E: intent_classifier::TextEncoder>(
    classifier: &IntentClassifier<E>,
    sentence: &str,
    threshold: f32,
) {
    let started = Instant::now();
    let outcome = classifier.classify(sentence, threshold);
    let elapsed = started.elapsed();
    match outcome {
        Some(hit) => info!(
            "{sentence:?} -> {:?} (id {}, similarity {:.3}) in {elapsed:?}",
            hit.command,
            hit.command.index(),
            hit.score
        ),
        None => warn!("{sentence:?} -> no confident match ({elapsed:?})"),
    }
}

fn route_app() -> Result<()> {
    let router = CommandRouter::new()?;
    let mut sink = LogSink;
    info!("robot server online, reading 'index[,number]' messages from stdin");
    for line in io::stdin().lock().lines() {
        let line = line?;
        let message = line.trim();
        if message.is_empty() {
            continue;
        }
        if let Err(e) = router.deliver(message) {
            warn!("bad command message {message:?}: {e}");
            continue;
        }
        router.forward(&mut sink);
    }
    info!(
        "robot server closing; counters:\n{}",
        router.metrics().encode_text()
    );
    Ok(())
}

fn capture_config(args: &CaptureArgs) -> CaptureConfig {
    CaptureConfig {
        sample_rate_hz: args.sample_rate,
        block_size: args.block_size,
        ..CaptureConfig::default()
    }
}

fn build_capture(
    args: &CaptureArgs,
    cfg: &CaptureConfig,
) -> Result<(Box<dyn CaptureSource>, ChunkReceiver)> {
    match args.capture {
        CaptureMode::Mock => {
            let chunks = vec![MockCapture::silence(cfg); 3];
            let (capture, queue) = MockCapture::new(chunks, cfg);
            Ok((Box::new(capture), queue))
        }
        CaptureMode::Udp => {
            let (capture, queue) = UdpCapture::bind(&args.listen, cfg)?;
            Ok((Box::new(capture), queue))
        }
        CaptureMode::Mic => {
            #[cfg(feature = "audio")]
            {
                let (capture, queue) = audio_capture::MicCapture::open(cfg)?;
                Ok((Box::new(capture), queue))
            }
            #[cfg(not(feature = "audio"))]
            {
                anyhow::bail!("mic capture requires building with the `audio` feature")
            }
        }
    }
}

fn build_recognizer(
    args: &CaptureArgs,
    cfg: &CaptureConfig,
) -> Result<Box<dyn SpeechFrontEnd + Send>> {
    let kind = match args.recognizer.as_str() {
        "mock" => RecognizerKind::Mock,
        "vosk" => RecognizerKind::Vosk,
        "whisper_cpp" => RecognizerKind::WhisperCpp,
        other => anyhow::bail!("unknown recognizer backend: {other}"),
    };
    new_recognizer(
        kind,
        RecognizerConfig {
            model: None,
            sample_rate_hz: cfg.sample_rate_hz,
            block_size: cfg.block_size,
        },
    )
    .map_err(anyhow::Error::msg)
}

fn log_transcription(transcription: &Transcription) {
    if transcription.is_silence() {
        return;
    }
    info!("recognized words: {}", transcription.sentence());
    if !transcription.omitted.is_empty() {
        info!("omitted words: {}", transcription.omitted.join(" "));
    }
    if let Some(number) = transcription.number {
        info!("recognized number: {number}");
    }
}

fn setup_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}
