use crate::verify::{endpoint::DEFAULT_TIMEOUT, HttpVerificationEndpoint};
use anyhow::{Context, Result};
use axum::{
    body::Body,
    extract::{Extension, MatchedPath},
    http::{HeaderName, HeaderValue, Request},
    routing::get,
    Router,
};
use std::{sync::Arc, time::Duration};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    request_id::PropagateRequestIdLayer, set_header::SetRequestHeaderLayer, trace::TraceLayer,
};
use tracing::{info, info_span, Span};
use ulid::Ulid;
use utoipa_swagger_ui::SwaggerUi;

pub mod handlers;
pub mod inflight;
mod openapi;
pub mod page;
pub mod session;

pub use openapi::openapi;

use self::handlers::{health, root, verify_email};
use self::inflight::InFlight;
use self::session::IdentitySession;

/// Upstream locations and page options for the web front.
#[derive(Clone, Debug)]
pub struct WebConfig {
    api_base_url: String,
    identity_base_url: Option<String>,
    request_timeout: Duration,
    resend_url: Option<String>,
}

impl WebConfig {
    #[must_use]
    pub fn new(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            identity_base_url: None,
            request_timeout: DEFAULT_TIMEOUT,
            resend_url: None,
        }
    }

    #[must_use]
    pub fn with_identity_base_url(mut self, url: Option<String>) -> Self {
        self.identity_base_url = url;
        self
    }

    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_resend_url(mut self, url: Option<String>) -> Self {
        self.resend_url = url;
        self
    }

    #[must_use]
    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    /// Identity service base, falling back to the API base.
    #[must_use]
    pub fn identity_base_url(&self) -> &str {
        self.identity_base_url
            .as_deref()
            .unwrap_or(&self.api_base_url)
    }

    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    #[must_use]
    pub fn resend_url(&self) -> Option<&str> {
        self.resend_url.as_deref()
    }
}

/// Shared by every request through an `Extension` layer.
#[derive(Debug)]
pub struct AppState {
    pub endpoint: HttpVerificationEndpoint,
    pub identity: IdentitySession,
    pub in_flight: InFlight,
    pub resend_url: Option<String>,
}

impl AppState {
    /// # Errors
    /// Returns an error if an upstream URL is invalid or an HTTP client cannot be built.
    pub fn new(config: &WebConfig) -> Result<Self> {
        let endpoint =
            HttpVerificationEndpoint::new(config.api_base_url(), config.request_timeout())
                .context("Failed to build verification endpoint client")?;
        let identity = IdentitySession::new(config.identity_base_url(), config.request_timeout())
            .context("Failed to build identity session client")?;

        Ok(Self {
            endpoint,
            identity,
            in_flight: InFlight::new(),
            resend_url: config.resend_url().map(str::to_string),
        })
    }
}

/// Build the router with every route and layer.
#[must_use]
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root::root))
        .route("/health", get(health::health).options(health::health))
        .route(
            "/verify-email",
            get(verify_email::verify_email_page).post(verify_email::submit_verification),
        )
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi()))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestHeaderLayer::if_not_present(
                    HeaderName::from_static("x-request-id"),
                    |_req: &_| HeaderValue::from_str(Ulid::new().to_string().as_str()).ok(),
                ))
                .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
                    "x-request-id",
                )))
                .layer(TraceLayer::new_for_http().make_span_with(make_span))
                .layer(Extension(state)),
        )
}

/// Start the server
/// # Errors
/// Return error if failed to start the server
pub async fn new(port: u16, config: &WebConfig) -> Result<()> {
    let state = Arc::new(AppState::new(config)?);

    info!(
        "Verification endpoint: {}, identity service: {}",
        state.endpoint.url(),
        config.identity_base_url()
    );

    let app = router(state);

    let listener = TcpListener::bind(format!("::0:{port}")).await?;

    info!("Listening on [::]:{}", port);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(async {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("Gracefully shutdown");
            }
        })
        .await?;

    Ok(())
}

fn make_span(request: &Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|val| val.to_str().ok())
        .unwrap_or("none");
    let matched_path = request
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| request.uri().path(), MatchedPath::as_str);

    info_span!(
        "http.request",
        http.method = %request.method(),
        http.route = matched_path,
        request_id
    )
}
