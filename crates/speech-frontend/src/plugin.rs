use tracing::debug;

#[cfg(feature = "mock")]
use crate::MockRecognizer;
use crate::{RecognizerConfig, SpeechFrontEnd};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum RecognizerKind {
    Mock,
    Vosk,
    WhisperCpp,
}

pub fn new_recognizer(
    kind: RecognizerKind,
    cfg: RecognizerConfig,
) -> Result<Box<dyn SpeechFrontEnd + Send>, String> {
    match kind {
        RecognizerKind::Mock => {
            #[cfg(feature = "mock")]
            {
                debug!(
                    "mock recognizer selected ({} Hz, {}-sample chunks)",
                    cfg.sample_rate_hz, cfg.block_size
                );
                Ok(Box::new(MockRecognizer::new(cfg)))
            }
            #[cfg(not(feature = "mock"))]
            {
                let _ = cfg;
                Err("mock feature not enabled".into())
            }
        }
        RecognizerKind::Vosk => Err("vosk backend not yet integrated".into()),
        RecognizerKind::WhisperCpp => Err("whisper_cpp backend not yet integrated".into()),
    }
}
