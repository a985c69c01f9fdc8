#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RateError {
    #[error("Missing query parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Invalid date format: '{input}' does not match {expected}")]
    InvalidDateFormat { input: String, expected: String },
    #[error("Missing configuration: {0} is not set")]
    MissingConfiguration(&'static str),
    #[error("Upstream request failed: {0}")]
    UpstreamRequestFailed(String),
    #[error("Could not decode upstream response: {0}")]
    ResponseDecodeFailed(String),
    #[error("Error parsing upstream payload: {0}")]
    MalformedPayload(String),
}

impl RateError {
    /// HTTP status the error is reported with.
    pub fn status_code(&self) -> u16 {
        match self {
            RateError::MissingParameter(_) | RateError::InvalidDateFormat { .. } => 400,
            _ => 500,
        }
    }
}
