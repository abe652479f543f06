//! # Mailcode (Email Verification Front)
//!
//! `mailcode` serves the email verification page of the application. A user who
//! signed up receives a six digit code by email, types it into six single
//! character inputs, and the page forwards `{code, email}` to the verification
//! backend.
//!
//! ## Session gate
//!
//! The page is only meant for users without a session. The identity service owns
//! the session; `mailcode` only reads it and sends signed-in users (or requests
//! without an `email` query parameter) back to `/`.
//!
//! ## Verification outcome
//!
//! Only the HTTP status of the backend call is inspected:
//!
//! - `404` shows "User not found"
//! - `400` shows "Invalid or expired verification code"
//! - `500` and transport failures show "Server error, try again later"
//! - `2xx` navigates to `/`
//! - any other status leaves the page untouched
//!
//! The core lives in [`verify`] and has no HTTP framework underneath; [`web`]
//! hosts it behind axum.

pub mod cli;
pub mod verify;
pub mod web;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_git_commit_hash_format() {
        if GIT_COMMIT_HASH == "unknown" {
            // Acceptable in non-git build environments
            return;
        }
        assert!(
            GIT_COMMIT_HASH.chars().all(|c| c.is_ascii_hexdigit()),
            "GIT_COMMIT_HASH should be a hex string, got: {GIT_COMMIT_HASH}"
        );
        assert!(
            GIT_COMMIT_HASH.len() >= 7,
            "GIT_COMMIT_HASH should be at least 7 characters long, got: {GIT_COMMIT_HASH}"
        );
    }

    #[test]
    fn test_app_user_agent_format() {
        assert!(APP_USER_AGENT.starts_with(env!("CARGO_PKG_NAME")));
        assert!(APP_USER_AGENT.contains(env!("CARGO_PKG_VERSION")));
    }
}
