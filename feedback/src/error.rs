use thiserror::Error;
use std::path::PathBuf;

/// Result type alias for feedback operations
pub type Result<T> = std::result::Result<T, FeedbackError>;

/// Error types raised at the boundaries of the feedback crate.
///
/// The transforms themselves (filtering, aggregation, selection) are total;
/// these errors only come from loading data and building stores or surveys.
#[derive(Debug, Error)]
pub enum FeedbackError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("CSV parse error: {0}")]
    CsvParse(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Data file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    #[error("Duplicate response id '{id}' in scope '{scope}'")]
    DuplicateResponseId { id: String, scope: String },

    #[error("Response '{id}' has score {score} outside the survey scale {min}-{max}")]
    ScoreOutOfRange {
        id: String,
        score: f64,
        min: u32,
        max: u32,
    },

    #[error("Invalid score scale {min}-{max}: minimum must be below maximum")]
    InvalidScale { min: u32, max: u32 },

    #[error("Scope '{scope}' not found")]
    UnknownScope { scope: String },

    #[error("Aspect error: {message}")]
    Aspect { message: String },

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
}

impl FeedbackError {
    /// Create a new invalid configuration error
    pub fn invalid_config<S: Into<String>>(message: S) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create a new aspect error
    pub fn aspect<S: Into<String>>(message: S) -> Self {
        Self::Aspect {
            message: message.into(),
        }
    }

    /// Create a new unknown scope error
    pub fn unknown_scope<S: Into<String>>(scope: S) -> Self {
        Self::UnknownScope {
            scope: scope.into(),
        }
    }
}
