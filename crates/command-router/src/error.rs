use thiserror::Error;

pub type Result<T, E = RouterError> = core::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum RouterError {
    #[error("invalid command parameter: {0:?}")]
    InvalidParameter(String),
    #[error("metrics init error: {0}")]
    Metrics(String),
}
