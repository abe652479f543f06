use crate::{cli::telemetry, web};
use anyhow::Result;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, PartialEq, Eq)]
pub struct Args {
    pub port: u16,
    pub api_base_url: String,
    pub identity_base_url: Option<String>,
    pub request_timeout_seconds: u64,
    pub resend_url: Option<String>,
}

impl Args {
    #[must_use]
    pub fn web_config(&self) -> web::WebConfig {
        web::WebConfig::new(self.api_base_url.clone())
            .with_identity_base_url(self.identity_base_url.clone())
            .with_request_timeout(Duration::from_secs(self.request_timeout_seconds))
            .with_resend_url(self.resend_url.clone())
    }
}

/// Execute the server action.
/// # Errors
/// Returns an error if the upstream clients cannot be built or the server fails to start.
pub async fn execute(args: Args) -> Result<()> {
    debug!("Server args: {:?}", args);

    let config = args.web_config();
    let result = web::new(args.port, &config).await;

    telemetry::shutdown_tracer();

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn web_config_carries_args() {
        let args = Args {
            port: 8080,
            api_base_url: "https://api.example.com".to_string(),
            identity_base_url: None,
            request_timeout_seconds: 3,
            resend_url: Some("https://example.com/resend".to_string()),
        };

        let config = args.web_config();
        assert_eq!(config.api_base_url(), "https://api.example.com");
        assert_eq!(config.identity_base_url(), "https://api.example.com");
        assert_eq!(config.request_timeout(), Duration::from_secs(3));
        assert_eq!(config.resend_url(), Some("https://example.com/resend"));
    }
}
