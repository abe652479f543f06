//! Framework-free core of the verification page: the six code slots, the
//! submission payload, the status mapping, and the session gate. Session state
//! and navigation are injected through [`SessionProvider`] and [`Navigator`] so
//! the controller runs the same under axum and in tests.

pub mod code;
pub mod endpoint;
pub mod error;
pub mod form;
pub mod gate;
pub mod navigator;
pub mod outcome;
pub mod payload;
pub mod session;

pub use self::code::{CODE_LENGTH, CodeFields};
pub use self::endpoint::{HttpVerificationEndpoint, VERIFY_EMAIL_PATH, VerificationEndpoint};
pub use self::error::{EndpointError, FormError};
pub use self::form::{FormPhase, VerificationForm};
pub use self::gate::{GateDecision, SessionGate};
pub use self::navigator::{Navigator, ROOT_PATH, Redirector};
pub use self::outcome::SubmissionOutcome;
pub use self::payload::VerificationPayload;
pub use self::session::{SessionProvider, SessionState, SessionStatus};
