use anyhow::{Context, Result};
use clap::{Arg, ArgMatches, Command};
use url::Url;

pub const ARG_API_BASE_URL: &str = "api-base-url";
pub const ARG_IDENTITY_BASE_URL: &str = "identity-base-url";
pub const ARG_REQUEST_TIMEOUT_SECONDS: &str = "request-timeout-seconds";
pub const ARG_RESEND_URL: &str = "resend-url";

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_API_BASE_URL)
                .long(ARG_API_BASE_URL)
                .help("Base URL of the backend serving /api/auth/verify-email")
                .env("MAILCODE_API_BASE_URL")
                .required(true),
        )
        .arg(
            Arg::new(ARG_IDENTITY_BASE_URL)
                .long(ARG_IDENTITY_BASE_URL)
                .help("Base URL of the identity service serving /api/auth/session (default: api base URL)")
                .env("MAILCODE_IDENTITY_BASE_URL"),
        )
        .arg(
            Arg::new(ARG_REQUEST_TIMEOUT_SECONDS)
                .long(ARG_REQUEST_TIMEOUT_SECONDS)
                .help("Timeout for upstream requests in seconds")
                .env("MAILCODE_REQUEST_TIMEOUT_SECONDS")
                .default_value("10")
                .value_parser(clap::value_parser!(u64).range(1..)),
        )
        .arg(
            Arg::new(ARG_RESEND_URL)
                .long(ARG_RESEND_URL)
                .help("Link offered to users who did not receive a code")
                .env("MAILCODE_RESEND_URL"),
        )
}

#[derive(Debug)]
pub struct Options {
    pub api_base_url: String,
    pub identity_base_url: Option<String>,
    pub request_timeout_seconds: u64,
    pub resend_url: Option<String>,
}

impl Options {
    /// # Errors
    /// Returns an error if the API base URL is missing or any URL fails to parse.
    pub fn parse(matches: &ArgMatches) -> Result<Self> {
        let api_base_url = matches
            .get_one::<String>(ARG_API_BASE_URL)
            .cloned()
            .context("missing required argument: --api-base-url")?;
        validate_url(&api_base_url).context("invalid MAILCODE_API_BASE_URL")?;

        let identity_base_url = matches.get_one::<String>(ARG_IDENTITY_BASE_URL).cloned();
        if let Some(url) = &identity_base_url {
            validate_url(url).context("invalid MAILCODE_IDENTITY_BASE_URL")?;
        }

        let resend_url = matches.get_one::<String>(ARG_RESEND_URL).cloned();
        if let Some(url) = &resend_url {
            validate_url(url).context("invalid MAILCODE_RESEND_URL")?;
        }

        Ok(Self {
            api_base_url,
            identity_base_url,
            request_timeout_seconds: matches
                .get_one::<u64>(ARG_REQUEST_TIMEOUT_SECONDS)
                .copied()
                .unwrap_or(10),
            resend_url,
        })
    }
}

fn validate_url(value: &str) -> Result<()> {
    let url = Url::parse(value).with_context(|| format!("Invalid URL: {value}"))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        scheme => anyhow::bail!("Unsupported URL scheme {scheme}: {value}"),
    }
}
