use anyhow::{anyhow, bail, Context};
use talent_core::Outcome;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::{
    app_config::AppConfig,
    auth::{clear_token, save_token_securely},
    web_client::HttpClient,
};

pub async fn login_cmd(config: &AppConfig) -> Result<(), anyhow::Error> {
    let token = match &config.token_override {
        Some(token) => token.clone(),
        None => read_token().await?,
    };

    let client = HttpClient::from_config(config, Some(token.clone()))?;

    match client.verify_token().await {
        Outcome::Ok(()) => {}
        Outcome::Unauthorized => bail!("The API at {} rejected this token", config.api_url),
        Outcome::Rejected { message, .. } => return Err(anyhow!(message)),
        Outcome::TransportFailure(reason) => {
            eprintln!(
                "Could not verify the token against {} ({}). Saving it anyway.",
                config.api_url, reason
            );
        }
    }

    save_token_securely(&config.token_path, &token)?;
    println!("Logged in. Token stored for profile: {}", config.profile_name);

    Ok(())
}

pub fn logout_cmd(config: &AppConfig) -> Result<(), anyhow::Error> {
    if clear_token(&config.token_path)? {
        println!("Logged out of profile: {}", config.profile_name);
    } else {
        println!("No stored token for profile: {}", config.profile_name);
    }

    Ok(())
}

async fn read_token() -> anyhow::Result<String> {
    eprintln!("Paste your API token and press Enter:");

    let mut line = String::new();
    BufReader::new(tokio::io::stdin())
        .read_line(&mut line)
        .await
        .context("Failed to read token from stdin")?;

    let token = line.trim();
    if token.is_empty() {
        bail!("No token given");
    }

    Ok(token.to_string())
}
