use std::time::Duration;

use tracing::{info, warn};

use audio_capture::{CaptureSource, ChunkReceiver};
use command_router::{CommandRouter, CommandSink};
use intent_classifier::{IntentClassifier, TextEncoder};
use speech_frontend::SpeechFrontEnd;

use crate::{PipelineConfig, PipelineState, PipelineStats, Result, ShutdownFlag};

/// The control loop: drains the chunk queue, runs the speech front end, and
/// hands confidently classified utterances to the command router.
///
/// States run `Idle -> Listening -> ShuttingDown -> Stopped`; the loop blocks
/// on the queue with a bounded timeout so the cooperative shutdown flag is
/// observed between iterations.
pub struct Orchestrator<C, F, E, S> {
    config: PipelineConfig,
    capture: C,
    queue: ChunkReceiver,
    front_end: F,
    classifier: IntentClassifier<E>,
    router: CommandRouter,
    sink: S,
    state: PipelineState,
    shutdown: ShutdownFlag,
    stats: PipelineStats,
}

impl<C, F, E, S> Orchestrator<C, F, E, S>
where
    C: CaptureSource,
    F: SpeechFrontEnd,
    E: TextEncoder,
    S: CommandSink,
{
    pub fn new(
        config: PipelineConfig,
        capture: C,
        queue: ChunkReceiver,
        front_end: F,
        classifier: IntentClassifier<E>,
        router: CommandRouter,
        sink: S,
    ) -> Self {
        Self {
            config,
            capture,
            queue,
            front_end,
            classifier,
            router,
            sink,
            state: PipelineState::Idle,
            shutdown: ShutdownFlag::new(),
            stats: PipelineStats::default(),
        }
    }

    /// Handle to request a cooperative stop from another thread.
    pub fn shutdown_flag(&self) -> ShutdownFlag {
        self.shutdown.clone()
    }

    /// Share a supervisor-owned shutdown flag instead of the built-in one.
    pub fn set_shutdown_flag(&mut self, flag: ShutdownFlag) {
        self.shutdown = flag;
    }

    pub fn state(&self) -> PipelineState {
        self.state
    }

    /// Run until shutdown is requested. Startup failures (capture cannot
    /// start) are fatal; everything after entering `Listening` is local to
    /// one iteration and never terminates the loop.
    pub fn run(&mut self) -> Result<PipelineStats> {
        self.capture.start()?;
        self.state = PipelineState::Listening;
        info!("pipeline listening");
        let poll = Duration::from_millis(self.config.poll_timeout_ms);
        while !self.shutdown.is_requested() {
            let Some(chunk) = self.queue.next_chunk(poll) else {
                continue;
            };
            self.stats.chunks += 1;
            let transcription = self.front_end.transcribe(&chunk);
            if transcription.is_silence() {
                continue;
            }
            let sentence = transcription.sentence();
            info!("recognized words: {sentence}");
            if !transcription.omitted.is_empty() {
                info!("omitted words: {}", transcription.omitted.join(" "));
            }
            if let Some(number) = transcription.number {
                info!("recognized number: {number}");
            }
            self.stats.utterances += 1;
            match self.classifier.classify(&sentence, self.config.threshold) {
                Some(classification) => {
                    info!(
                        "classified {sentence:?} as {:?} (similarity {:.3})",
                        classification.command, classification.score
                    );
                    self.router
                        .dispatch(classification, transcription.number, &mut self.sink);
                    self.stats.dispatched += 1;
                }
                None => {
                    self.stats.rejections += 1;
                    warn!("couldn't classify {sentence:?} to any command");
                }
            }
        }
        self.finish()
    }

    fn finish(&mut self) -> Result<PipelineStats> {
        self.state = PipelineState::ShuttingDown;
        info!("pipeline shutting down");
        self.capture.stop()?;
        // Anything still buffered was captured before stop; discard rather
        // than classify post-shutdown.
        let discarded = self.queue.drain();
        if discarded > 0 {
            info!("discarded {discarded} buffered chunks on shutdown");
        }
        self.state = PipelineState::Stopped;
        info!(
            "pipeline stopped: {} chunks, {} utterances, {} dispatched, {} rejected",
            self.stats.chunks, self.stats.utterances, self.stats.dispatched, self.stats.rejections
        );
        Ok(self.stats.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use std::thread;

    use audio_capture::{AudioChunk, CaptureConfig, MockCapture};
    use command_router::CommandRequest;
    use intent_classifier::{HashedBowEncoder, RobotCommand};
    use speech_frontend::{MockRecognizer, Transcription};

    #[derive(Clone, Default)]
    struct SharedSink(Arc<Mutex<Vec<CommandRequest>>>);

    impl CommandSink for SharedSink {
        fn accept(&mut self, request: CommandRequest) {
            if let Ok(mut accepted) = self.0.lock() {
                accepted.push(request);
            }
        }
    }

    fn words(s: &str) -> Vec<String> {
        s.split(' ').map(str::to_string).collect()
    }

    fn capture_config() -> CaptureConfig {
        CaptureConfig {
            block_size: 4,
            ..CaptureConfig::default()
        }
    }

    fn orchestrator_with(
        script: Vec<Transcription>,
        chunks: usize,
    ) -> (
        Orchestrator<MockCapture, MockRecognizer, HashedBowEncoder, SharedSink>,
        Arc<Mutex<Vec<CommandRequest>>>,
    ) {
        let cfg = capture_config();
        let chunks = (0..chunks as i16)
            .map(|i| AudioChunk::new(vec![i; cfg.block_size]))
            .collect();
        let (capture, queue) = MockCapture::new(chunks, &cfg);
        let classifier = IntentClassifier::new(HashedBowEncoder::default()).unwrap();
        let router = CommandRouter::new().unwrap();
        let sink = SharedSink::default();
        let accepted = sink.0.clone();
        let orchestrator = Orchestrator::new(
            PipelineConfig {
                poll_timeout_ms: 10,
                ..PipelineConfig::default()
            },
            capture,
            queue,
            MockRecognizer::scripted(script),
            classifier,
            router,
            sink,
        );
        (orchestrator, accepted)
    }

    #[test]
    fn dispatches_recognized_commands_in_capture_order() {
        let script = vec![
            Transcription {
                words: words("open tool"),
                number: None,
                omitted: vec![],
            },
            Transcription {
                words: words("move up"),
                number: Some(2),
                omitted: words("please"),
            },
            Transcription {
                words: words("pepperoni pizza"),
                number: None,
                omitted: vec![],
            },
        ];
        let (mut orchestrator, accepted) = orchestrator_with(script, 3);
        let flag = orchestrator.shutdown_flag();
        let worker = thread::spawn(move || orchestrator.run());
        thread::sleep(Duration::from_millis(300));
        flag.request();
        let stats = worker.join().unwrap().unwrap();

        let accepted = accepted.lock().unwrap();
        assert_eq!(
            *accepted,
            vec![
                CommandRequest::new(RobotCommand::OpenTool, None),
                CommandRequest::new(RobotCommand::MoveUp, Some(2)),
            ]
        );
        assert_eq!(stats.chunks, 3);
        assert_eq!(stats.utterances, 3);
        assert_eq!(stats.dispatched, 2);
        assert_eq!(stats.rejections, 1);
    }

    #[test]
    fn silent_chunks_are_consumed_without_classification() {
        let (mut orchestrator, accepted) = orchestrator_with(vec![], 2);
        let flag = orchestrator.shutdown_flag();
        let worker = thread::spawn(move || orchestrator.run());
        thread::sleep(Duration::from_millis(200));
        flag.request();
        let stats = worker.join().unwrap().unwrap();
        assert_eq!(stats.chunks, 2);
        assert_eq!(stats.utterances, 0);
        assert!(accepted.lock().unwrap().is_empty());
    }

    #[test]
    fn shutdown_discards_buffered_chunks_unprocessed() {
        let script = vec![Transcription {
            words: words("home"),
            number: None,
            omitted: vec![],
        }];
        let (mut orchestrator, accepted) = orchestrator_with(script, 4);
        // Stop before the loop gets a chance to consume anything.
        orchestrator.shutdown_flag().request();
        let stats = orchestrator.run().unwrap();
        assert_eq!(orchestrator.state(), PipelineState::Stopped);
        assert_eq!(stats.chunks, 0);
        assert_eq!(stats.dispatched, 0);
        assert!(accepted.lock().unwrap().is_empty());
    }

    #[test]
    fn omitted_only_utterances_are_rejected_not_dispatched() {
        let script = vec![Transcription {
            words: vec![],
            number: None,
            omitted: words("uh hmm"),
        }];
        let (mut orchestrator, accepted) = orchestrator_with(script, 1);
        let flag = orchestrator.shutdown_flag();
        let worker = thread::spawn(move || orchestrator.run());
        thread::sleep(Duration::from_millis(200));
        flag.request();
        let stats = worker.join().unwrap().unwrap();
        assert_eq!(stats.utterances, 1);
        assert_eq!(stats.rejections, 1);
        assert!(accepted.lock().unwrap().is_empty());
    }
}
