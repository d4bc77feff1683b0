use audio_capture::AudioChunk;

use crate::Transcription;

/// Boundary to the speech-recognition engine.
///
/// Called once per captured chunk, in capture order. A backend may keep
/// internal rolling state across calls. Never fails for a well-formed chunk;
/// an empty recognition is simply an empty `Transcription`.
pub trait SpeechFrontEnd {
    fn transcribe(&mut self, chunk: &AudioChunk) -> Transcription;
}

impl<T: SpeechFrontEnd + ?Sized> SpeechFrontEnd for Box<T> {
    fn transcribe(&mut self, chunk: &AudioChunk) -> Transcription {
        (**self).transcribe(chunk)
    }
}
