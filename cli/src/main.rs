#![deny(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

use std::sync::Arc;

use args::{CliArgs, Command};
use clap::{CommandFactory, Parser};
use commands::{
    config::config_cmd,
    login::{login_cmd, logout_cmd},
    profile::profile_cmd,
    save::save_cmd,
    search::search_cmd,
    shell::shell_cmd,
    shortlist::shortlist_cmd,
};
use profile::{get_profile_config_path, resolve_profile_name, Profile};
use talent_core::{SearchMode, TalentApi};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::{app_config::AppConfig, web_client::HttpClient};

mod app_config;
mod args;
mod auth;
mod commands;
mod formatters;
mod profile;
mod web_client;

#[cfg(test)]
mod test;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let args = CliArgs::parse();

    setup_tracing(args.config.verbose);

    let Some(command) = args.command else {
        CliArgs::command().print_help()?;
        return Ok(());
    };

    let profile_name = resolve_profile_name(&args.config.profile);
    let profile_path = get_profile_config_path(&profile_name);
    let profile = Profile::from_path(&profile_path)?;
    let config = AppConfig::from_args(args.config, &profile_name, profile_path, profile.as_ref());

    match command {
        Command::Config => config_cmd(&config)?,
        Command::Login => login_cmd(&config).await?,
        Command::Logout => logout_cmd(&config)?,
        Command::Profile { command } => profile_cmd(command)?,
        Command::Completions { shell } => {
            clap_complete::generate(
                shell,
                &mut CliArgs::command(),
                "talent",
                &mut std::io::stdout(),
            );
        }
        Command::Search(args) => {
            let form = args.form(config.global_search);
            search_cmd(api(&config)?, &config, SearchMode::Structured, form, args.output).await?
        }
        Command::Ai(args) => {
            let form = args.form(config.global_search);
            search_cmd(api(&config)?, &config, SearchMode::Ai, form, args.output).await?
        }
        Command::Save(args) => save_cmd(api(&config)?.as_ref(), &config, &args.id).await?,
        Command::Shortlist(args) => shortlist_cmd(api(&config)?, &config, args).await?,
        Command::Shell(args) => shell_cmd(api(&config)?, &config, args.output).await?,
    }

    Ok(())
}

/// HTTP client for the configured API, authenticated when a token is known
fn api(config: &AppConfig) -> anyhow::Result<Arc<dyn TalentApi>> {
    let token = auth::load_token(config)?;
    if token.is_none() {
        tracing::debug!("No token available, requests go out unauthenticated");
    }

    Ok(Arc::new(HttpClient::from_config(config, token)?))
}

fn setup_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("talent=debug,talent_core=debug")
    } else {
        EnvFilter::try_from_env("TALENT_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}
