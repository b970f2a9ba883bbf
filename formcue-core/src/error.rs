use thiserror::Error;

pub type Result<T> = std::result::Result<T, KeyPointsError>;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum KeyPointsError {
    /// The provider answered with a non-success HTTP status.
    #[error("generation failed with status {status}: {body}")]
    GenerationFailed { status: u16, body: String },

    /// The request never produced a response (DNS, connect, timeout, SDK failure).
    #[error("transport error: {0}")]
    Transport(String),

    /// A success status whose body is not a chat completion.
    #[error("malformed completion response: {0}")]
    MalformedResponse(String),

    #[error("invalid exercise context: {0}")]
    InvalidContext(String),

    #[error("configuration error: {0}")]
    Config(String),

    /// Local machinery failed (runtime startup, task join).
    #[error("internal error: {0}")]
    Internal(String),
}

impl KeyPointsError {
    pub fn transport<D: std::fmt::Display>(d: D) -> Self {
        KeyPointsError::Transport(d.to_string())
    }

    /// HTTP status of a provider rejection, if that is what this error is.
    pub fn status(&self) -> Option<u16> {
        match self {
            KeyPointsError::GenerationFailed { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for KeyPointsError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            KeyPointsError::MalformedResponse(e.to_string())
        } else {
            KeyPointsError::Transport(e.to_string())
        }
    }
}
