use anyhow::anyhow;
use talent_core::Effect;
use tracing::warn;

use crate::{app_config::AppConfig, auth};

pub mod config;
pub mod login;
pub mod profile;
pub mod save;
pub mod search;
pub mod shell;
pub mod shortlist;

/// Map what is left of an effect after printing to the exit status of a
/// one-shot command
pub fn finish(effect: Effect, config: &AppConfig) -> anyhow::Result<()> {
    match effect {
        Effect::Updated => Ok(()),
        Effect::Notice(message) => Err(anyhow!(message)),
        Effect::RedirectToLogin => Err(session_expired(config)),
        Effect::TransportFailure(reason) => Err(anyhow!(
            "Could not reach {}: {}",
            config.api_url,
            reason
        )),
    }
}

/// Forget the stored token and point the user at the login page
pub fn session_expired(config: &AppConfig) -> anyhow::Error {
    if config.token_override.is_none() {
        if let Err(e) = auth::clear_token(&config.token_path) {
            warn!(error = %e, "Could not remove the stored token");
        }
    }

    let login_url = config.login_url();
    if config.open_browser {
        if let Err(e) = webbrowser::open(&login_url) {
            warn!(error = %e, "Could not open a browser");
        }
    }

    anyhow!(
        "Not logged in or session expired. Sign in at {} and run `talent login`",
        login_url
    )
}
