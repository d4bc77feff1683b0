use std::collections::VecDeque;

use audio_capture::AudioChunk;

use crate::{RecognizerConfig, SpeechFrontEnd, Transcription};

/// Scripted recognizer: returns queued transcriptions one per chunk, then
/// silence forever.
pub struct MockRecognizer {
    script: VecDeque<Transcription>,
}

impl MockRecognizer {
    /// A canned script of a few vocabulary utterances, handy for demos.
    pub fn new(_cfg: RecognizerConfig) -> Self {
        let words = |s: &str| s.split(' ').map(str::to_string).collect::<Vec<_>>();
        Self::scripted(vec![
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
                words: words("home"),
                number: None,
                omitted: vec![],
            },
        ])
    }

    pub fn scripted(script: Vec<Transcription>) -> Self {
        Self {
            script: script.into(),
        }
    }
}

impl SpeechFrontEnd for MockRecognizer {
    fn transcribe(&mut self, _chunk: &AudioChunk) -> Transcription {
        self.script.pop_front().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replays_script_then_goes_silent() {
        let mut rec = MockRecognizer::scripted(vec![Transcription {
            words: vec!["stop".to_string(), "robot".to_string()],
            number: None,
            omitted: vec![],
        }]);
        let chunk = AudioChunk::new(vec![0; 8]);
        assert_eq!(rec.transcribe(&chunk).sentence(), "stop robot");
        assert!(rec.transcribe(&chunk).is_silence());
        assert!(rec.transcribe(&chunk).is_silence());
    }
}
