use algoviz_core::ModelError;
use algoviz_runtime::{ConfigError, SessionError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("playback stopped at step {step} before the run finished")]
    Incomplete { step: usize },
}

impl From<SessionError> for CliError {
    fn from(error: SessionError) -> Self {
        match error {
            SessionError::Model(error) => Self::Model(error),
            SessionError::Config(error) => Self::Config(error),
        }
    }
}

impl CliError {
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidArgument { .. } => 2,
            Self::Config(_) => 3,
            _ => 1,
        }
    }

    #[must_use]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::CliError;
    use algoviz_core::ModelError;
    use algoviz_runtime::{ConfigError, SessionError};

    #[test]
    fn invalid_argument_exits_with_usage_code() {
        let error = CliError::invalid("no values");
        assert_eq!(error.exit_code(), 2);
        assert_eq!(error.to_string(), "invalid argument: no values");
    }

    #[test]
    fn session_errors_are_flattened() {
        let error = CliError::from(SessionError::Config(ConfigError::Validation(vec![
            "history.max_depth must be > 0".into(),
        ])));
        assert!(matches!(error, CliError::Config(_)));
        assert_eq!(error.exit_code(), 3);

        let error = CliError::from(SessionError::Model(ModelError::InvalidRange { min: 9, max: 1 }));
        assert!(matches!(error, CliError::Model(_)));
        assert_eq!(error.exit_code(), 1);
    }
}
