use thiserror::Error;

pub type Result<T, E = ClassifierError> = core::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("encoder backend not available: {0}")]
    BackendUnavailable(&'static str),
    #[error("encoder produced a {got}-dim vector, expected {want}")]
    DimensionMismatch { want: usize, got: usize },
}
