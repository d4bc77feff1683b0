#[cfg(feature = "mock")]
use crate::HashedBowEncoder;
use crate::{ClassifierError, Result, TextEncoder};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum EncoderKind {
    HashedBow,
    SentenceTransformer,
}

/// Build an encoder backend. Model-load failures are fatal here, at
/// construction time, never per call.
pub fn new_encoder(kind: EncoderKind) -> Result<Box<dyn TextEncoder + Send + Sync>> {
    match kind {
        EncoderKind::HashedBow => {
            #[cfg(feature = "mock")]
            {
                Ok(Box::new(HashedBowEncoder::default()))
            }
            #[cfg(not(feature = "mock"))]
            {
                Err(ClassifierError::BackendUnavailable("mock feature not enabled"))
            }
        }
        EncoderKind::SentenceTransformer => Err(ClassifierError::BackendUnavailable(
            "sentence_transformer backend not yet integrated",
        )),
    }
}
