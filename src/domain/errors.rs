/// Boundary errors. The chart core itself never fails; these are raised
/// only where external input enters (candle ingest, JSON, DOM access).
#[derive(Debug, Clone, PartialEq)]
pub enum AppError {
    ValidationError(String),
    ParseError(String),
    RenderingError(String),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::ValidationError(msg) => write!(f, "Validation Error: {}", msg),
            AppError::ParseError(msg) => write!(f, "Parse Error: {}", msg),
            AppError::RenderingError(msg) => write!(f, "Rendering Error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::ParseError(err.to_string())
    }
}

pub type ValidationResult<T> = Result<T, AppError>;
pub type RenderingResult<T> = Result<T, AppError>;
