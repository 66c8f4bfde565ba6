use thiserror::Error;

#[derive(Error, Debug)]
pub enum FxError {
    #[error("Invalid configuration: {field} {reason}")]
    Config { field: &'static str, reason: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown event: {0}")]
    UnknownEvent(String),
}

impl FxError {
    pub(crate) fn config(field: &'static str, reason: impl Into<String>) -> Self {
        FxError::Config {
            field,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, FxError>;
