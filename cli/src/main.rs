//! CLI entrypoint for docchat
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use colored::Colorize;
use docchat_application::{
    ChatTurnUseCase, ConversationLogger, ConversationStore, IngestDocumentUseCase,
    ObservableSessionState,
};
use docchat_infrastructure::{
    ConfigLoader, FileConfig, FileContentResolver, HttpAnalysisGateway, JsonlConversationLogger,
};
use docchat_presentation::{ChatRepl, Cli};
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        return Ok(());
    }

    let config = load_config(&cli)?;

    // Must outlive every log call; dropping it flushes the file writer.
    let _log_guard = init_tracing(cli.verbose, config.logging.file_path().as_deref())?;

    info!("Starting docchat");

    if !config.output.color {
        colored::control::set_override(false);
    }

    let state = Arc::new(build_session_state(&config)?);
    let repl = ChatRepl::new(state)
        .with_progress(config.output.show_progress && !cli.quiet)
        .with_history_path(config.repl.history_path());

    if let Some(document) = &cli.document {
        let opened = repl.open_document(document).await;
        if opened.is_none() && cli.is_one_shot() {
            bail!("Could not analyze {}", document.display());
        }
    }

    // Single question mode
    if cli.is_one_shot() {
        let mut failed = 0;
        for question in &cli.question {
            println!("{} {}", "Q:".bold(), question);
            if !repl.ask(question).await {
                failed += 1;
            }
        }
        if failed > 0 {
            bail!("{} of {} questions failed", failed, cli.question.len());
        }
        return Ok(());
    }

    repl.run().await?;
    Ok(())
}

/// Merge configuration sources, apply CLI overrides and validate.
fn load_config(cli: &Cli) -> Result<FileConfig> {
    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref())
            .map_err(|e| *e)
            .context("Failed to load configuration")?
    };

    if let Some(base_url) = &cli.base_url {
        config.service.base_url = base_url.clone();
    }
    if let Some(top_k) = cli.top_k {
        config.chat.top_k = top_k;
    }

    config.validate().context("Invalid configuration")?;
    Ok(config)
}

/// Initialize logging based on verbosity level.
///
/// `RUST_LOG` wins over `-v` when set. With a log file configured, events are
/// also written there through a non-blocking writer.
fn init_tracing(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let (file_layer, guard) = match log_file {
        Some(path) => {
            if let Some(parent) = path.parent()
                && !parent.as_os_str().is_empty()
            {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Cannot create log directory {}", parent.display()))?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Cannot open log file {}", path.display()))?;
            let (writer, guard) = tracing_appender::non_blocking(file);
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(file_layer)
        .init();

    Ok(guard)
}

/// Wire adapters, store and use cases into the session state.
fn build_session_state(config: &FileConfig) -> Result<ObservableSessionState> {
    let gateway_config = config.service.to_gateway_config()?;
    info!("Analysis service at {}", gateway_config.base_url);
    let gateway = Arc::new(HttpAnalysisGateway::new(gateway_config)?);
    let resolver = Arc::new(FileContentResolver::new());
    let store = Arc::new(ConversationStore::new());

    let mut ingest = IngestDocumentUseCase::new(store.clone(), gateway.clone(), resolver);
    let mut chat = ChatTurnUseCase::new(store.clone(), gateway).with_params(config.chat.to_params());

    if let Some(path) = config.logging.conversation_log_path() {
        match JsonlConversationLogger::new(&path) {
            Some(logger) => {
                info!("Recording conversations to {}", logger.path().display());
                let logger: Arc<dyn ConversationLogger> = Arc::new(logger);
                ingest = ingest.with_conversation_logger(logger.clone());
                chat = chat.with_conversation_logger(logger);
            }
            None => warn!("Conversation log disabled"),
        }
    }

    Ok(ObservableSessionState::new(store, ingest, chat))
}
