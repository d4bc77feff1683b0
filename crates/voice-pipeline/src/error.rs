use thiserror::Error;

pub type Result<T, E = PipelineError> = core::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("capture error: {0}")]
    Capture(#[from] audio_capture::CaptureError),
    #[error("router error: {0}")]
    Router(#[from] command_router::RouterError),
    #[error("classifier error: {0}")]
    Classifier(#[from] intent_classifier::ClassifierError),
}
