use talent_core::{Effect, Outcome, TalentApi};
use tracing::warn;

use crate::{app_config::AppConfig, commands::finish};

/// Toggle one candidate outside of any result set
pub async fn save_cmd(
    api: &dyn TalentApi,
    config: &AppConfig,
    candidate_id: &str,
) -> Result<(), anyhow::Error> {
    let effect = match api.toggle_save(candidate_id).await {
        Outcome::Ok(response) => {
            println!(
                "{} ({})",
                response.message.as_deref().unwrap_or("Saved state updated"),
                candidate_id
            );
            Effect::Updated
        }
        Outcome::Rejected { message, .. } => Effect::Notice(message),
        Outcome::Unauthorized => Effect::RedirectToLogin,
        Outcome::TransportFailure(reason) => {
            warn!(candidate_id, %reason, "Toggle failed in transport");
            Effect::TransportFailure(reason)
        }
    };

    finish(effect, config)
}
