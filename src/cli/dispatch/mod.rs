//! Maps validated CLI arguments to the action the binary runs.

use crate::cli::actions::{server::Args, Action};
use crate::cli::commands::upstream;
use anyhow::Result;

/// Map validated CLI matches to a server action.
///
/// # Errors
/// Returns an error if required arguments are missing or a URL is invalid.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let port = matches.get_one::<u16>("port").copied().unwrap_or(8080);

    let upstream = upstream::Options::parse(matches)?;

    Ok(Action::Server(Args {
        port,
        api_base_url: upstream.api_base_url,
        identity_base_url: upstream.identity_base_url,
        request_timeout_seconds: upstream.request_timeout_seconds,
        resend_url: upstream.resend_url,
    }))
}
