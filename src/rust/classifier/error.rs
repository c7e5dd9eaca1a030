use std::fmt;

/// Per-request failures reported back to the caller.
///
/// Neither variant is fatal: the predictor stays usable after returning one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PredictError {
    /// The submitted text was empty or whitespace-only
    ValidationError(String),
    /// The vectorizer or classifier failed while processing the text
    InferenceError(String),
}

impl PredictError {
    /// True for input rejections, which are shown as warnings rather than errors.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::ValidationError(_))
    }

    /// The underlying message without the category prefix.
    pub fn message(&self) -> &str {
        match self {
            Self::ValidationError(msg) | Self::InferenceError(msg) => msg,
        }
    }
}

impl fmt::Display for PredictError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            Self::InferenceError(msg) => write!(f, "Inference error: {}", msg),
        }
    }
}

impl std::error::Error for PredictError {}

impl From<anyhow::Error> for PredictError {
    fn from(err: anyhow::Error) -> Self {
        // `{:#}` keeps the whole context chain on one line
        PredictError::InferenceError(format!("{:#}", err))
    }
}
