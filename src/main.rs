use draughts_core::engine::config::EngineConfig;
use draughts_core::engine::search::AlphaBetaEngine;
use protocol::{ProtocolError, ProtocolReader};
use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Arc;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

mod protocol;

#[derive(Error, Debug)]
enum AgentError {
    #[error("Could not read config {path}: {source}")]
    ConfigFile { path: String, source: io::Error },

    #[error("Invalid config: {0}")]
    ConfigJson(#[from] serde_json::Error),

    #[error(transparent)]
    Engine(#[from] draughts_core::error::EngineError),

    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    #[error("Failed to write move: {0}")]
    Output(#[from] io::Error),
}

fn main() -> ExitCode {
    // stdout carries moves, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn load_config(path: Option<String>) -> Result<EngineConfig, AgentError> {
    let Some(path) = path else {
        return Ok(EngineConfig::default());
    };
    let json = std::fs::read_to_string(&path)
        .map_err(|source| AgentError::ConfigFile { path: path.clone(), source })?;
    let config = EngineConfig::load_from_json(&json)?;
    config.validate()?;
    tracing::info!("Loaded config from {path}");
    Ok(config)
}

fn run() -> Result<(), AgentError> {
    let config = load_config(std::env::args().nth(1))?;
    let mut engine = AlphaBetaEngine::new(Arc::new(config));
    let limit = engine.config().turn_limit();
    tracing::info!("Searching with {limit:?}");

    let mut reader = ProtocolReader::new(io::stdin().lock())?;
    tracing::info!("My color is {}", reader.color().symbol());

    let mut out = io::stdout().lock();
    while let Some(turn) = reader.next_turn()? {
        tracing::debug!(board = ?turn.position.board.to_rows(), moves = ?turn.moves, "Turn received");
        let outcome = engine.search_strings(&turn.position, &turn.moves, limit)?;
        writeln!(out, "{}", outcome.mv)?;
        out.flush()?;
    }

    tracing::info!("Input closed, exiting");
    Ok(())
}
