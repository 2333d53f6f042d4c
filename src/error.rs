use thiserror::Error;

#[derive(Error, Debug)]
pub enum BoardError {
    #[error("assessment '{0}' not found")]
    AssessmentNotFound(String),

    #[error("invalid status '{0}'")]
    InvalidStatus(String),

    #[error("invalid priority '{0}'")]
    InvalidPriority(String),

    #[error("invalid risk level '{0}'")]
    InvalidRiskLevel(String),

    // Drag session errors
    #[error("a drag is already in progress for assessment '{0}'")]
    DragInProgress(String),

    #[error("no drag is in progress")]
    NoActiveDrag,

    // Repository errors
    #[error("update rejected for '{id}': {reason}")]
    UpdateRejected { id: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, BoardError>;
