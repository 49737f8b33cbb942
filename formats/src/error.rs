use thiserror::Error;

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("Invalid latitude {0}")]
    InvalidLatitude(f64),
    #[error("Invalid longitude {0}")]
    InvalidLongitude(f64),
    #[error("Invalid track {0}")]
    InvalidTrack(f64),
    #[error("Missing field {0}")]
    MissingField(&'static str),
    #[error("Degenerate box {width}x{height}")]
    DegenerateBox { width: f64, height: f64 },
    #[error("Invalid confidence {0}")]
    InvalidConfidence(f64),
    #[error("Bad JSON: {0}")]
    Json(#[from] serde_json::Error),
}
