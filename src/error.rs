use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum QueryError {
    #[error("brightness capability is unavailable: {0}")]
    CapabilityUnavailable(String),
    #[error("brightness query was rejected with status {0}")]
    Rejected(i32),
    #[error("failed to enumerate display services, status {0}")]
    Registry(i32),
    #[error("brightness fraction {0} is outside of [0, 1]")]
    OutOfRange(f32),
    #[error("brightness queries aren't supported on this platform")]
    Unsupported,
}
