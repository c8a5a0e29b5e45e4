use thiserror::Error;

#[derive(Debug, Error)]
pub enum NutriError {
    #[error("{0}")]
    Validation(String),

    #[error("Could not reach the plan service: {message}")]
    Transport {
        status: Option<u16>,
        message: String,
    },

    #[error("Plan service error: {0}")]
    Domain(String),

    #[error("Malformed plan response: {0}")]
    InvalidResponse(String),

    #[error("No saved plan found.")]
    NothingSaved,

    #[error("Saved plan does not match current inputs. Generate a new plan.")]
    SignatureMismatch,

    #[error("Saved plan is unreadable: {0}")]
    CorruptSave(String),

    #[error("No plan has been generated yet")]
    NoPlan,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl NutriError {
    /// Build a transport error for a non-success HTTP status.
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        NutriError::Transport {
            status: Some(status),
            message: message.into(),
        }
    }

    /// Errors that end the interactive session. Everything else is reported
    /// and the user picks another action.
    pub fn is_fatal(&self) -> bool {
        matches!(self, NutriError::Prompt(_) | NutriError::Io(_))
    }
}

pub type Result<T> = std::result::Result<T, NutriError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_terminal_failures_are_fatal() {
        assert!(!NutriError::Validation("Height must be positive".into()).is_fatal());
        assert!(!NutriError::InvalidInput("abc is not a number".into()).is_fatal());
        assert!(!NutriError::status(500, "Server error: 500").is_fatal());
        assert!(!NutriError::SignatureMismatch.is_fatal());

        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed");
        assert!(NutriError::Io(io).is_fatal());
        assert!(NutriError::from(dialoguer::Error::IO(std::io::Error::other("tty"))).is_fatal());
    }
}
