use thiserror::Error as ThisError;
use uniffi::Error;

use crate::error::KeyPointsError;

#[derive(Debug, ThisError, Error)]
pub enum FormcueError {
    #[error("generation failed with status {status}: {message}")]
    GenerationFailed { status: u16, message: String },
    #[error("transport error: {message}")]
    Transport { message: String },
    #[error("invalid request: {message}")]
    InvalidRequest { message: String },
    #[error("error: {message}")]
    Common { message: String },
}

impl From<KeyPointsError> for FormcueError {
    fn from(e: KeyPointsError) -> Self {
        match e {
            KeyPointsError::GenerationFailed { status, body } => {
                FormcueError::GenerationFailed { status, message: body }
            }
            KeyPointsError::Transport(message) => FormcueError::Transport { message },
            KeyPointsError::InvalidContext(message) | KeyPointsError::Config(message) => {
                FormcueError::InvalidRequest { message }
            }
            other => FormcueError::with_display(other),
        }
    }
}

impl FormcueError {
    pub fn with_display<D: std::fmt::Display>(d: D) -> Self {
        FormcueError::Common {
            message: d.to_string(),
        }
    }
}
