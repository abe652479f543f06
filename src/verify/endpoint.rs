//! Client for the verification backend. Only the response status is read; the
//! body is ignored. The payload carries a one-time code and is never logged.

use super::error::EndpointError;
use super::payload::VerificationPayload;
use crate::APP_USER_AGENT;
use reqwest::{Client, StatusCode};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

/// Path of the verification endpoint, relative to the API base URL.
pub const VERIFY_EMAIL_PATH: &str = "/api/auth/verify-email";

/// Default request timeout applied to upstream calls.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Backend that checks a `{code, email}` pair and answers with a status code.
pub trait VerificationEndpoint {
    fn verify(
        &self,
        payload: &VerificationPayload,
    ) -> impl Future<Output = Result<StatusCode, EndpointError>> + Send;
}

/// `POST {base}/api/auth/verify-email` over reqwest.
#[derive(Clone, Debug)]
pub struct HttpVerificationEndpoint {
    client: Client,
    url: Url,
}

impl HttpVerificationEndpoint {
    /// # Errors
    /// Returns an error if the base URL is invalid or the HTTP client cannot be built.
    pub fn new(api_base_url: &str, timeout: Duration) -> Result<Self, EndpointError> {
        let url = build_url(api_base_url, VERIFY_EMAIL_PATH)?;
        let client = Client::builder()
            .user_agent(APP_USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|err| EndpointError::Client(err.to_string()))?;

        Ok(Self { client, url })
    }

    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }
}

impl VerificationEndpoint for HttpVerificationEndpoint {
    #[instrument(skip_all, fields(url = %self.url))]
    async fn verify(&self, payload: &VerificationPayload) -> Result<StatusCode, EndpointError> {
        // `.json()` sets `Content-Type: application/json`.
        let response = self
            .client
            .post(self.url.clone())
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        debug!("verification endpoint answered {status}");

        Ok(status)
    }
}

/// Joins a base URL and an absolute path, tolerating trailing slashes on the base.
///
/// # Errors
/// Returns [`EndpointError::InvalidUrl`] when the result is not a valid URL.
pub fn build_url(base_url: &str, path: &str) -> Result<Url, EndpointError> {
    let base = base_url.trim().trim_end_matches('/');
    let joined = format!("{}/{}", base, path.trim().trim_start_matches('/'));

    Url::parse(&joined).map_err(|err| EndpointError::InvalidUrl(format!("{joined}: {err}")))
}
