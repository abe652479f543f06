//! Email verification page: render the form, forward the code, map the result.

use crate::verify::{CodeFields, Redirector, SessionGate, VerificationForm, ROOT_PATH};
use crate::web::{page, session::session_cookie, AppState};
use axum::{
    extract::{Extension, Form, RawQuery},
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, error, instrument, warn};
use url::form_urlencoded;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Default, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct VerifyEmailQuery {
    /// Address the code was sent to
    pub email: Option<String>,
}

impl VerifyEmailQuery {
    /// Reads the query string leniently: the first `email` wins and
    /// repeated or unknown keys are ignored.
    #[must_use]
    pub fn from_raw(raw: Option<&str>) -> Self {
        let email = raw.and_then(|query| {
            form_urlencoded::parse(query.as_bytes())
                .find(|(key, _)| key == "email")
                .map(|(_, value)| value.into_owned())
        });

        Self { email }
    }
}

/// The six code inputs as posted by the page.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CodeForm {
    #[serde(default)]
    pub code0: String,
    #[serde(default)]
    pub code1: String,
    #[serde(default)]
    pub code2: String,
    #[serde(default)]
    pub code3: String,
    #[serde(default)]
    pub code4: String,
    #[serde(default)]
    pub code5: String,
}

impl CodeForm {
    #[must_use]
    pub fn fields(&self) -> CodeFields {
        CodeFields::from_values([
            &self.code0,
            &self.code1,
            &self.code2,
            &self.code3,
            &self.code4,
            &self.code5,
        ])
    }
}

#[utoipa::path(
    get,
    path = "/verify-email",
    params(VerifyEmailQuery),
    responses(
        (status = 200, description = "Verification form", body = String, content_type = "text/html"),
        (status = 303, description = "Signed in or missing email, redirect to /"),
        (status = 500, description = "Page failed to render")
    ),
    tag = "verify"
)]
#[instrument(skip_all)]
pub async fn verify_email_page(
    headers: HeaderMap,
    RawQuery(raw_query): RawQuery,
    Extension(state): Extension<Arc<AppState>>,
) -> Response {
    let query = VerifyEmailQuery::from_raw(raw_query.as_deref());
    let session = state
        .identity
        .resolve(session_cookie(&headers).as_ref())
        .await;

    let mut redirector = Redirector::new();
    let Some(email) = SessionGate::enforce(&session, query.email.as_deref(), &mut redirector)
    else {
        return redirect(redirector);
    };

    let form = VerificationForm::new(email);

    page_response(StatusCode::OK, &form, &state)
}

#[utoipa::path(
    post,
    path = "/verify-email",
    params(VerifyEmailQuery),
    request_body(content = CodeForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Form re-rendered with the mapped message", body = String, content_type = "text/html"),
        (status = 303, description = "Verified, signed in or missing email, redirect to /"),
        (status = 409, description = "A verification for this email is already in flight", body = String, content_type = "text/html"),
        (status = 500, description = "Page failed to render")
    ),
    tag = "verify"
)]
#[instrument(skip_all)]
pub async fn submit_verification(
    headers: HeaderMap,
    RawQuery(raw_query): RawQuery,
    Extension(state): Extension<Arc<AppState>>,
    Form(code): Form<CodeForm>,
) -> Response {
    let query = VerifyEmailQuery::from_raw(raw_query.as_deref());
    let session = state
        .identity
        .resolve(session_cookie(&headers).as_ref())
        .await;

    let mut redirector = Redirector::new();
    let Some(email) = SessionGate::enforce(&session, query.email.as_deref(), &mut redirector)
    else {
        return redirect(redirector);
    };

    let fields = code.fields();
    if !fields.is_complete() {
        // Forwarded as typed; the backend decides.
        debug!("submitting incomplete code");
    }

    let mut form = VerificationForm::with_fields(email, fields);

    let Some(_slot) = state.in_flight.try_acquire(form.email()) else {
        warn!("Verification already in flight, ignoring duplicate submission");
        return page_response(StatusCode::CONFLICT, &form, &state);
    };

    match form.submit(&state.endpoint, &mut redirector).await {
        Ok(outcome) => debug!("verification outcome: {}", outcome.as_str()),
        Err(err) => warn!("Verification not submitted: {err}"),
    }

    if redirector.location().is_some() {
        return redirect(redirector);
    }

    page_response(StatusCode::OK, &form, &state)
}

fn page_response(status: StatusCode, form: &VerificationForm, state: &AppState) -> Response {
    match page::render(form, state.resend_url.as_deref()) {
        Ok(html) => (status, Html(html)).into_response(),
        Err(err) => {
            error!("Failed to render verification page: {err}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

fn redirect(redirector: Redirector) -> Response {
    let location = redirector
        .into_location()
        .unwrap_or_else(|| ROOT_PATH.to_string());

    Redirect::to(&location).into_response()
}
