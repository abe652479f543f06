//! Session lookup against the identity service. The incoming `Cookie` header is
//! forwarded as-is to `GET {identity}/api/auth/session`; it is kept in a
//! `SecretString` and never logged.

use crate::verify::endpoint::build_url;
use crate::verify::{EndpointError, SessionState};
use crate::APP_USER_AGENT;
use axum::http::{header::COOKIE, HeaderMap};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, instrument, warn};
use url::Url;

pub const SESSION_PATH: &str = "/api/auth/session";

#[derive(Clone, Debug)]
pub struct IdentitySession {
    client: Client,
    url: Url,
}

impl IdentitySession {
    /// # Errors
    /// Returns an error if the base URL is invalid or the HTTP client cannot be built.
    pub fn new(identity_base_url: &str, timeout: Duration) -> Result<Self, EndpointError> {
        let url = build_url(identity_base_url, SESSION_PATH)?;
        let client = Client::builder()
            .user_agent(APP_USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|err| EndpointError::Client(err.to_string()))?;

        Ok(Self { client, url })
    }

    /// Resolves the caller's session. Without a cookie there is nothing to look
    /// up. When the identity service cannot answer, the state stays `Loading`.
    #[instrument(skip_all, fields(url = %self.url))]
    pub async fn resolve(&self, cookie: Option<&SecretString>) -> SessionState {
        let Some(cookie) = cookie else {
            return SessionState::unauthenticated();
        };

        let response = match self
            .client
            .get(self.url.clone())
            .header(COOKIE, cookie.expose_secret())
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) => {
                warn!("Failed to reach identity service: {err}");
                return SessionState::loading();
            }
        };

        if !response.status().is_success() {
            warn!("Identity service answered {}", response.status());
            return SessionState::loading();
        }

        match response.json::<Value>().await {
            Ok(body) => {
                let state = session_from_body(body);
                debug!("session status: {}", state.status.as_str());
                state
            }
            Err(err) => {
                warn!("Failed to decode session response: {err}");
                SessionState::loading()
            }
        }
    }
}

/// A body carrying a non-null `user` is a session; `{}` or `null` is not.
fn session_from_body(body: Value) -> SessionState {
    let has_user = body.get("user").is_some_and(|user| !user.is_null());
    if has_user {
        SessionState::authenticated(body)
    } else {
        SessionState::unauthenticated()
    }
}

/// Extracts the raw `Cookie` header of the incoming request.
#[must_use]
pub fn session_cookie(headers: &HeaderMap) -> Option<SecretString> {
    headers
        .get(COOKIE)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.trim().is_empty())
        .map(|value| SecretString::from(value.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::verify::SessionStatus;
    use axum::http::HeaderValue;
    use serde_json::json;
    use std::net::TcpListener;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn can_bind_localhost() -> bool {
        TcpListener::bind("127.0.0.1:0").is_ok()
    }

    fn cookie() -> SecretString {
        SecretString::from("next-auth.session-token=abc".to_string())
    }

    #[test]
    fn body_with_user_is_authenticated() {
        let state = session_from_body(json!({"user": {"email": "a@b.c"}, "expires": "never"}));
        assert_eq!(state.status, SessionStatus::Authenticated);
    }

    #[test]
    fn empty_or_null_body_is_unauthenticated() {
        assert_eq!(
            session_from_body(json!({})).status,
            SessionStatus::Unauthenticated
        );
        assert_eq!(
            session_from_body(Value::Null).status,
            SessionStatus::Unauthenticated
        );
        assert_eq!(
            session_from_body(json!({"user": null})).status,
            SessionStatus::Unauthenticated
        );
    }

    #[test]
    fn session_cookie_ignores_blank_headers() {
        let mut headers = HeaderMap::new();
        assert!(session_cookie(&headers).is_none());

        headers.insert(COOKIE, HeaderValue::from_static("  "));
        assert!(session_cookie(&headers).is_none());

        headers.insert(COOKIE, HeaderValue::from_static("a=b"));
        assert_eq!(session_cookie(&headers).unwrap().expose_secret(), "a=b");
    }

    #[tokio::test]
    async fn resolve_without_cookie_skips_lookup() {
        // Nothing listens here; a request would fail and yield Loading.
        let identity = IdentitySession::new("http://127.0.0.1:9", Duration::from_secs(1)).unwrap();
        let state = identity.resolve(None).await;
        assert_eq!(state.status, SessionStatus::Unauthenticated);
    }

    #[tokio::test]
    async fn resolve_forwards_cookie() {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return;
        }
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(SESSION_PATH))
            .and(header("cookie", "next-auth.session-token=abc"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"user": {"email": "a@b.c"}})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let identity = IdentitySession::new(&server.uri(), Duration::from_secs(5)).unwrap();
        let state = identity.resolve(Some(&cookie())).await;

        assert_eq!(state.status, SessionStatus::Authenticated);
    }

    #[tokio::test]
    async fn resolve_failure_stays_loading() {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return;
        }
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(SESSION_PATH))
            .respond_with(ResponseTemplate::new(502))
            .mount(&server)
            .await;

        let identity = IdentitySession::new(&server.uri(), Duration::from_secs(5)).unwrap();
        let state = identity.resolve(Some(&cookie())).await;

        assert_eq!(state.status, SessionStatus::Loading);
    }
}
