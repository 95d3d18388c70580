use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use lese_config::Config;
use lese_core::{PronunciationAdapter, SentenceIndex, VocabularyAdapter, WordInfoProvider};
use tokio::io::AsyncReadExt;
use tokio::signal;
use tracing_subscriber::EnvFilter;

mod console;
mod controller;
mod events;
mod io;
mod profile;
mod render;
mod services;
mod session;
mod state;
mod status;

#[cfg(test)]
mod tests;

use self::controller::AppController;
use self::profile::ProfileStore;
use self::services::{Services, annotation_engine};
use self::state::AppState;

#[derive(Parser)]
#[command(name = "lese", version, about = "Read Norwegian text with in-place word lookups")]
struct Cli {
    /// Profile to load from the user config directory
    #[arg(long, global = true, default_value = "main")]
    profile: String,

    /// Log as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Print the annotated markup of a text file, or of stdin
    Annotate { file: Option<PathBuf> },
    /// Look up one word
    Lookup {
        word: String,
        /// Pronounce it
        #[arg(long)]
        speak: bool,
        /// Add it to the vocabulary store
        #[arg(long)]
        add: bool,
    },
    /// Read text from the configured source and interact with its words (default)
    Watch,
    /// Create a profile cloned from main
    NewProfile { name: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_logging(cli.log_json);

    let store = ProfileStore::user();
    if let Err(e) = store.init() {
        tracing::warn!("Profiles unavailable in {}: {:#}", store.dir().display(), e);
    }
    let config = store.load(&cli.profile).unwrap_or_else(|e| {
        tracing::warn!("Failed to load profile {}: {:#}", cli.profile, e);
        Config::new()
    });

    match cli.command.unwrap_or(Command::Watch) {
        Command::Annotate { file } => annotate(file).await,
        Command::Lookup { word, speak, add } => lookup(config, &word, speak, add).await,
        Command::Watch => watch(config).await,
        Command::NewProfile { name } => {
            let file = store.add_from_main(&name)?;
            println!("{}", file.display());
            Ok(())
        }
    }
}

fn init_logging(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.with_ansi(atty::is(atty::Stream::Stderr)).init();
    }
}

async fn annotate(file: Option<PathBuf>) -> anyhow::Result<()> {
    let text = match file {
        Some(path) => tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut text = String::new();
            tokio::io::stdin()
                .read_to_string(&mut text)
                .await
                .context("Failed to read stdin")?;
            text
        }
    };

    println!("{}", annotation_engine().annotate(&text));
    Ok(())
}

async fn lookup(config: Config, word: &str, speak: bool, add: bool) -> anyhow::Result<()> {
    let sentences = Arc::new(SentenceIndex::new(config.language.max_indexed_blocks));
    let services = Services::from_config(&config, sentences);

    let info = services.word_info.word_info(word).await;
    println!("{} = {}", word, info.translation);
    if !info.example.is_empty() {
        println!("    \"{}\"", info.example);
    }

    if speak {
        let outcome = services
            .pronunciation
            .speak(word, &services.language_tag)
            .await
            .context("Could not play")?;
        tracing::debug!("Pronunciation: {:?}", outcome);
    }

    if add {
        anyhow::ensure!(info.success, "no translation for '{word}', not adding it");
        let vocabulary = services.vocabulary.context("Anki integration disabled")?;
        let example = (!info.example.is_empty()).then_some(info.example.as_str());
        vocabulary
            .add_word(&info.word, &info.translation, example)
            .await
            .context("Failed to add to vocabulary")?;
        println!("added '{}'", info.word);
    }

    Ok(())
}

async fn watch(config: Config) -> anyhow::Result<()> {
    let state = Arc::new(AppState::new(config));
    let services = {
        let config = state.config.read().await;
        Services::from_config(&config, state.sentences.clone())
    };

    let console_lines = lese_io::lines::stdin_lines(64)?;
    let controller = AppController::new(state);
    let mut tasks = controller.spawn_tasks(services, console_lines).await;

    tokio::select! {
        _ = signal::ctrl_c() => {
            tracing::info!("Shutdown requested");
        }
        _ = controller.cancel_token().cancelled() => {}
        Some(result) = tasks.join_next() => {
            log_task_exit(result);
        }
    }

    controller.shutdown();
    while let Some(result) = tasks.join_next().await {
        log_task_exit(result);
    }

    Ok(())
}

fn log_task_exit(result: Result<anyhow::Result<()>, tokio::task::JoinError>) {
    match result {
        Ok(Ok(())) => {}
        Ok(Err(e)) => tracing::error!("task exited: {:#}", e),
        Err(e) => tracing::error!("task panicked: {e}"),
    }
}
