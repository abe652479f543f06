use reqwest::StatusCode;

pub const MSG_USER_NOT_FOUND: &str = "User not found";
pub const MSG_INVALID_CODE: &str = "Invalid or expired verification code";
pub const MSG_SERVER_ERROR: &str = "Server error, try again later";

/// Result of a verification submission, derived only from the HTTP status.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmissionOutcome {
    NotFound,
    InvalidOrExpired,
    ServerError,
    Success,
    Unhandled,
}

impl SubmissionOutcome {
    #[must_use]
    pub fn from_status(status: StatusCode) -> Self {
        match status {
            StatusCode::NOT_FOUND => Self::NotFound,
            StatusCode::BAD_REQUEST => Self::InvalidOrExpired,
            StatusCode::INTERNAL_SERVER_ERROR => Self::ServerError,
            status if status.is_success() => Self::Success,
            _ => Self::Unhandled,
        }
    }

    /// Inline alert text, `None` when the outcome shows nothing.
    #[must_use]
    pub const fn message(self) -> Option<&'static str> {
        match self {
            Self::NotFound => Some(MSG_USER_NOT_FOUND),
            Self::InvalidOrExpired => Some(MSG_INVALID_CODE),
            Self::ServerError => Some(MSG_SERVER_ERROR),
            Self::Success | Self::Unhandled => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::InvalidOrExpired => "invalid_or_expired",
            Self::ServerError => "server_error",
            Self::Success => "success",
            Self::Unhandled => "unhandled",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mapped_statuses() {
        assert_eq!(
            SubmissionOutcome::from_status(StatusCode::NOT_FOUND),
            SubmissionOutcome::NotFound
        );
        assert_eq!(
            SubmissionOutcome::from_status(StatusCode::BAD_REQUEST),
            SubmissionOutcome::InvalidOrExpired
        );
        assert_eq!(
            SubmissionOutcome::from_status(StatusCode::INTERNAL_SERVER_ERROR),
            SubmissionOutcome::ServerError
        );
    }

    #[test]
    fn any_2xx_is_success() {
        for status in [StatusCode::OK, StatusCode::CREATED, StatusCode::NO_CONTENT] {
            assert_eq!(
                SubmissionOutcome::from_status(status),
                SubmissionOutcome::Success
            );
        }
    }

    #[test]
    fn unmapped_statuses_are_unhandled() {
        for status in [
            StatusCode::UNAUTHORIZED,
            StatusCode::FORBIDDEN,
            StatusCode::TOO_MANY_REQUESTS,
            StatusCode::BAD_GATEWAY,
            StatusCode::SERVICE_UNAVAILABLE,
            StatusCode::FOUND,
        ] {
            assert_eq!(
                SubmissionOutcome::from_status(status),
                SubmissionOutcome::Unhandled,
                "status {status}"
            );
        }
    }

    #[test]
    fn messages_are_exact() {
        assert_eq!(SubmissionOutcome::NotFound.message(), Some("User not found"));
        assert_eq!(
            SubmissionOutcome::InvalidOrExpired.message(),
            Some("Invalid or expired verification code")
        );
        assert_eq!(
            SubmissionOutcome::ServerError.message(),
            Some("Server error, try again later")
        );
        assert_eq!(SubmissionOutcome::Success.message(), None);
        assert_eq!(SubmissionOutcome::Unhandled.message(), None);
    }
}
