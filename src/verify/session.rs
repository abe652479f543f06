//! Read-only view of the identity provider's session. The provider owns the
//! data; this crate never creates or mutates a session.

use serde_json::Value;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SessionStatus {
    #[default]
    Loading,
    Authenticated,
    Unauthenticated,
}

impl SessionStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::Authenticated => "authenticated",
            Self::Unauthenticated => "unauthenticated",
        }
    }
}

/// Capability the gate uses to read session state.
pub trait SessionProvider {
    fn status(&self) -> SessionStatus;

    /// True when session data is present alongside an authenticated status.
    fn has_session(&self) -> bool;
}

/// Snapshot of `{status, session}` as reported by the identity service.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SessionState {
    pub status: SessionStatus,
    pub session: Option<Value>,
}

impl SessionState {
    #[must_use]
    pub fn loading() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn unauthenticated() -> Self {
        Self {
            status: SessionStatus::Unauthenticated,
            session: None,
        }
    }

    #[must_use]
    pub fn authenticated(session: Value) -> Self {
        Self {
            status: SessionStatus::Authenticated,
            session: Some(session),
        }
    }
}

impl SessionProvider for SessionState {
    fn status(&self) -> SessionStatus {
        self.status
    }

    fn has_session(&self) -> bool {
        self.status == SessionStatus::Authenticated && self.session.is_some()
    }
}
