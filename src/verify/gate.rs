use super::navigator::{Navigator, ROOT_PATH};
use super::session::SessionProvider;
use tracing::debug;

/// What the page should do after reading the session and the query string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GateDecision {
    Redirect(&'static str),
    Render { email: String },
}

/// Routing guard in front of the verification form.
pub struct SessionGate;

impl SessionGate {
    /// Signed-in users and requests without an `email` go back to the root.
    /// A session that is still loading is treated like a signed-out one.
    #[must_use]
    pub fn check<S: SessionProvider + ?Sized>(session: &S, email: Option<&str>) -> GateDecision {
        if session.has_session() {
            debug!("session present, leaving verification page");
            return GateDecision::Redirect(ROOT_PATH);
        }

        match email {
            Some(email) if !email.is_empty() => GateDecision::Render {
                email: email.to_string(),
            },
            _ => {
                debug!("missing email query parameter, leaving verification page");
                GateDecision::Redirect(ROOT_PATH)
            }
        }
    }

    /// Runs [`SessionGate::check`] and performs the navigation when redirecting.
    /// Returns the resolved email when the form should be rendered.
    pub fn enforce<S, N>(session: &S, email: Option<&str>, navigator: &mut N) -> Option<String>
    where
        S: SessionProvider + ?Sized,
        N: Navigator + ?Sized,
    {
        match Self::check(session, email) {
            GateDecision::Redirect(path) => {
                navigator.navigate_to(path);
                None
            }
            GateDecision::Render { email } => Some(email),
        }
    }
}
