use anyhow::{Context, Result};
use cloud_course_site::config::Config;
use cloud_course_site::i18n::{DictionaryLoader, DictionaryValidator, Language};
use cloud_course_site::server::{self, AppState};
use std::time::Duration;
use tracing::{error, info, warn};

const SESSION_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("cloud_course_site=info".parse()?),
        )
        .init();

    info!("Starting course site");

    // Load configuration from environment
    let config = Config::from_env()?;

    // Step 1: Check every dictionary against the default language
    check_dictionaries(&DictionaryLoader::new(config.lang_dir.clone()));

    // Step 2: Build shared state and start the session sweeper
    let port = config.port;
    let state = AppState::new(config);
    server::spawn_session_sweeper(state.sessions.clone(), SESSION_SWEEP_INTERVAL);

    // Step 3: Serve until ctrl-c
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port))
        .await
        .with_context(|| format!("Failed to bind port {}", port))?;
    info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, server::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

/// Log key-parity findings for each enabled language. Problems are reported,
/// never fatal: missing keys render as the key itself.
fn check_dictionaries(loader: &DictionaryLoader) {
    let default = Language::default_language();
    let reference = match loader.try_load(default) {
        Ok(dictionary) => dictionary,
        Err(e) => {
            error!("Default dictionary unavailable: {}", e);
            return;
        }
    };

    for language in Language::all().into_iter().filter(|l| *l != default) {
        let candidate = match loader.try_load(language) {
            Ok(dictionary) => dictionary,
            Err(e) => {
                warn!("Dictionary for {} unavailable: {}", language, e);
                continue;
            }
        };

        let report = DictionaryValidator::compare(&reference, &candidate);
        for message in &report.errors {
            error!("[{}] {}", language, message);
        }
        for message in &report.warnings {
            warn!("[{}] {}", language, message);
        }
        if report.is_clean() {
            info!("Dictionary for {} matches {}", language, default);
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
