use thiserror::Error;

pub type RunwayResult<T> = Result<T, RunwayError>;

#[derive(Debug, Error)]
pub enum RunwayError {
    #[error("invalid plot geometry: width={width}")]
    InvalidGeometry { width: f64 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}
