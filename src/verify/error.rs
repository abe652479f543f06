use thiserror::Error;

/// Errors raised by the verification form controller.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("code field {0} is out of range")]
    FieldOutOfRange(usize),
    #[error("a verification attempt is already in flight")]
    AlreadySubmitting,
    #[error("the page already navigated away")]
    NavigatedAway,
}

/// Transport-level failures talking to the verification backend.
#[derive(Debug, Error)]
pub enum EndpointError {
    #[error("invalid verification endpoint URL: {0}")]
    InvalidUrl(String),
    #[error("failed to build HTTP client: {0}")]
    Client(String),
    #[error("verification request timed out")]
    Timeout,
    #[error("unable to reach the verification endpoint: {0}")]
    Network(String),
}

impl From<reqwest::Error> for EndpointError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Network(err.to_string())
        }
    }
}
