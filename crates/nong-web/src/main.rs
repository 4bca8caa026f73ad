use std::net::SocketAddr;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use nong_config::Config;
use nong_core::AppError;
use nong_core::logging::init_tracing;
use nong_core::state::AppState;
use nong_core::vocabulary::Vocabulary;
use nong_lang_shanghainese::{DialectPrompt, ShanghaineseTranslator};
use nong_speech::SpeechClient;

/// HTTP surface of the Shanghainese learning app
#[derive(Parser, Debug)]
#[command(name = "nong-web", version, about)]
struct Cli {
    /// Listen port, overrides PORT
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = match Config::from_env().map_err(AppError::from) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("ERROR: {e}");
            return ExitCode::FAILURE;
        }
    };

    let default_level = config
        .log_level
        .clone()
        .unwrap_or_else(|| config.web.default_log_level().to_string());
    init_tracing(&default_level);

    match serve(cli, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn serve(cli: Cli, mut config: Config) -> anyhow::Result<()> {
    if let Some(port) = cli.port {
        config.web.port = port;
    }

    if config.web.production && config.web.secret_key_generated {
        tracing::warn!("SECRET_KEY is not set, using an ephemeral key for this process");
    }

    let vocabulary = Vocabulary::load_or_empty(Path::new(&config.storage.vocab_file));

    let audio_dir = config.storage.audio_dir();
    tokio::fs::create_dir_all(&audio_dir)
        .await
        .with_context(|| format!("Failed to create audio directory {}", audio_dir.display()))?;

    let prompt = DialectPrompt::load(config.translator.prompt_file.as_deref())
        .context("Failed to read dialect prompt file")?;
    let translator = ShanghaineseTranslator::new(&config.translator, prompt)?;
    let speech = SpeechClient::from_config(&config.speech, &config.translator)?;

    let addr = config.web.bind_addr();
    let state = AppState::new(config, vocabulary, Arc::new(translator), speech);
    let app = nong_web::create_app(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("HTTP server listening on {}", addr);

    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("Graceful shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("Shutdown requested");
}
