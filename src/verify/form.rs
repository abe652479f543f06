//! Controller behind the six-input verification form.
//!
//! `Idle -> Submitting -> {ErrorDisplayed, NavigatingAway, Idle}`. A failed
//! attempt keeps the typed fields and the alert; the user can resubmit from
//! `ErrorDisplayed`. Only one attempt may be in flight at a time.

use super::code::CodeFields;
use super::endpoint::VerificationEndpoint;
use super::error::{EndpointError, FormError};
use super::navigator::{Navigator, ROOT_PATH};
use super::outcome::SubmissionOutcome;
use super::payload::VerificationPayload;
use reqwest::StatusCode;
use tracing::{error, info, warn};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FormPhase {
    #[default]
    Idle,
    Submitting,
    ErrorDisplayed,
    NavigatingAway,
}

#[derive(Clone, Debug)]
pub struct VerificationForm {
    email: String,
    fields: CodeFields,
    message: Option<String>,
    phase: FormPhase,
}

impl VerificationForm {
    #[must_use]
    pub fn new(email: impl Into<String>) -> Self {
        Self::with_fields(email, CodeFields::new())
    }

    #[must_use]
    pub fn with_fields(email: impl Into<String>, fields: CodeFields) -> Self {
        Self {
            email: email.into(),
            fields,
            message: None,
            phase: FormPhase::Idle,
        }
    }

    /// Edits one code input. The alert, if any, stays on screen.
    ///
    /// # Errors
    /// Returns [`FormError::FieldOutOfRange`] for an index past the last input.
    pub fn set_field(&mut self, index: usize, value: &str) -> Result<(), FormError> {
        self.fields.set(index, value)
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    #[must_use]
    pub fn fields(&self) -> &CodeFields {
        &self.fields
    }

    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    #[must_use]
    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    /// Enters `Submitting` and builds the payload from the current fields.
    ///
    /// # Errors
    /// Refuses while an attempt is in flight or after a successful verification.
    pub fn begin_submit(&mut self) -> Result<VerificationPayload, FormError> {
        match self.phase {
            FormPhase::Submitting => return Err(FormError::AlreadySubmitting),
            FormPhase::NavigatingAway => return Err(FormError::NavigatedAway),
            FormPhase::Idle | FormPhase::ErrorDisplayed => {}
        }

        self.phase = FormPhase::Submitting;

        Ok(VerificationPayload::new(&self.fields, &self.email))
    }

    /// Applies the endpoint result and leaves `Submitting`.
    ///
    /// Transport failures are reported like a server error so the user is
    /// never left without feedback.
    pub fn settle<N>(
        &mut self,
        result: Result<StatusCode, EndpointError>,
        navigator: &mut N,
    ) -> SubmissionOutcome
    where
        N: Navigator + ?Sized,
    {
        let outcome = match result {
            Ok(status) => SubmissionOutcome::from_status(status),
            Err(err) => {
                error!("Verification request failed: {err}");
                SubmissionOutcome::ServerError
            }
        };

        match outcome {
            SubmissionOutcome::Success => {
                info!("Email verified");
                self.phase = FormPhase::NavigatingAway;
                navigator.navigate_to(ROOT_PATH);
            }
            SubmissionOutcome::Unhandled => {
                warn!("Unhandled verification status, page left unchanged");
                self.phase = if self.message.is_some() {
                    FormPhase::ErrorDisplayed
                } else {
                    FormPhase::Idle
                };
            }
            SubmissionOutcome::NotFound
            | SubmissionOutcome::InvalidOrExpired
            | SubmissionOutcome::ServerError => {
                self.message = outcome.message().map(str::to_string);
                self.phase = FormPhase::ErrorDisplayed;
            }
        }

        outcome
    }

    /// Submits the current fields and applies the result.
    ///
    /// # Errors
    /// Returns the [`begin_submit`](Self::begin_submit) refusal; endpoint
    /// failures are mapped to an outcome instead.
    pub async fn submit<E, N>(
        &mut self,
        endpoint: &E,
        navigator: &mut N,
    ) -> Result<SubmissionOutcome, FormError>
    where
        E: VerificationEndpoint + ?Sized,
        N: Navigator + ?Sized,
    {
        let payload = self.begin_submit()?;
        let result = endpoint.verify(&payload).await;

        Ok(self.settle(result, navigator))
    }
}
