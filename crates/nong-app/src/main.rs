use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, bail};
use clap::Parser;
use nong_config::Config;
use nong_core::AppError;
use nong_core::logging::init_tracing;
use nong_core::progress::ProgressStore;
use nong_core::state::AppState;
use nong_core::vocabulary::Vocabulary;
use nong_lang_shanghainese::{DialectPrompt, ShanghaineseTranslator};
use nong_speech::SpeechClient;
use rand::SeedableRng;
use rand::rngs::StdRng;

pub mod console;
pub mod menu;
pub mod session;

#[cfg(test)]
mod tests;

use self::console::Console;
use self::session::Session;

/// Learn Shanghainese from English & Mandarin
#[derive(Parser, Debug)]
#[command(name = "nong", version, about)]
struct Cli {
    /// Vocabulary file, overrides VOCAB_FILE
    #[arg(long)]
    vocab: Option<PathBuf>,

    /// Progress file, overrides PROGRESS_FILE
    #[arg(long)]
    progress: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = match Config::from_env().map_err(AppError::from) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ ERROR: {e}!");
            eprintln!("Please create a .env file with your API key (see .env.example)");
            return ExitCode::FAILURE;
        }
    };

    init_tracing(config.log_level.as_deref().unwrap_or("warn"));

    match run(cli, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:#}");
            eprintln!("❌ {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli, mut config: Config) -> anyhow::Result<()> {
    if let Some(path) = cli.vocab {
        config.storage.vocab_file = path.display().to_string();
    }
    if let Some(path) = cli.progress {
        config.storage.progress_file = path.display().to_string();
    }

    let vocabulary = Vocabulary::load(Path::new(&config.storage.vocab_file))
        .context("Unable to load vocabulary database")?;
    if vocabulary.is_empty() {
        bail!("Vocabulary database {} has no words", config.storage.vocab_file);
    }

    // Never overwrite a progress file we could not read
    let store = ProgressStore::new(&config.storage.progress_file);
    let progress = store.load().context("Refusing to start")?;

    let prompt = DialectPrompt::load(config.translator.prompt_file.as_deref())
        .context("Failed to read dialect prompt file")?;
    let translator = ShanghaineseTranslator::new(&config.translator, prompt)?;
    let speech = SpeechClient::from_config(&config.speech, &config.translator)?;

    let state = AppState::new(config, vocabulary, Arc::new(translator), speech);
    let console = Console::new(io::stdin().lock(), io::stdout());
    let mut session = Session::new(state, store, progress, console, StdRng::from_os_rng());

    session.run().await
}
