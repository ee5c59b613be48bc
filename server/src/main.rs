#![deny(clippy::expect_used, clippy::unwrap_used, clippy::panic)]
#![warn(clippy::expect_used)]

use std::path::PathBuf;

use dotenvy::dotenv;
use talent_server::{catalog, serve, AppState, ApplicationError, StubConfig};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), ApplicationError> {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

async fn run() -> Result<(), ApplicationError> {
    setup_tracing();

    let (address, config, catalog_path) = setup_env()?;

    let catalog = match catalog_path {
        Some(path) => {
            info!("Loading candidate catalog from {:?}", path);
            catalog::load(&path)?
        }
        None => catalog::seed(),
    };
    info!(
        "Serving {} candidates for {} organizations",
        catalog.len(),
        config.tokens.len()
    );

    let app_state = AppState::new(&config, catalog);

    info!("Starting server on {}", address);
    let listener = TcpListener::bind(address)
        .await
        .map_err(ApplicationError::from)?;

    serve(listener, app_state).await
}

fn setup_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "{crate_name}=debug,tower_http=debug",
                    crate_name = env!("CARGO_CRATE_NAME")
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn setup_env() -> Result<(String, StubConfig, Option<PathBuf>), ApplicationError> {
    dotenv().ok();

    let defaults = StubConfig::default();

    let host = std::env::var("TALENT_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port = std::env::var("TALENT_PORT")
        .map_err(|e| ApplicationError::EnvError(e, "TALENT_PORT".to_string()))?;

    let tokens = match std::env::var("TALENT_TOKENS") {
        Ok(list) => list
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect(),
        Err(_) => defaults.tokens,
    };
    if tokens.is_empty() {
        return Err(ApplicationError::InvalidEnv(
            "TALENT_TOKENS".to_string(),
            "no tokens given".to_string(),
        ));
    }

    let free_searches = match std::env::var("TALENT_FREE_SEARCHES") {
        Ok(value) => value.parse::<u32>().map_err(|_| {
            ApplicationError::InvalidEnv("TALENT_FREE_SEARCHES".to_string(), value.clone())
        })?,
        Err(_) => defaults.free_searches,
    };

    let catalog_path = std::env::var("TALENT_CANDIDATES").ok().map(PathBuf::from);

    Ok((
        format!("{}:{}", host, port),
        StubConfig {
            tokens,
            free_searches,
        },
        catalog_path,
    ))
}
