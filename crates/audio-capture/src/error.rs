use thiserror::Error;

pub type Result<T, E = CaptureError> = core::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("audio device error: {0}")]
    Device(String),
    #[error("socket bind failed on {addr}: {source}")]
    Bind {
        addr: String,
        source: std::io::Error,
    },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
