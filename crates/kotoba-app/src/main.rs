use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use kotoba_config::Config;
use kotoba_core::types::AppEvent;
use tokio::signal;
use tracing_subscriber::EnvFilter;

mod controller;
mod events;
mod state;
mod ui;

#[cfg(test)]
mod tests;

use self::controller::{AppController, join_all};
use self::state::AppState;

/// Japanese dictionary lookup for kana, romaji and Chinese characters
#[derive(Parser, Debug)]
#[command(name = "kotoba", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
    /// JSON config profile
    #[arg(long, env = "KOTOBA_CONFIG")]
    config: Option<PathBuf>,
    /// Emit logs as JSON lines
    #[arg(long)]
    log_json: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Staged search: exact, prefix, then fault-tolerant matches
    Search { query: String },
    /// Single ranked lookup
    Quick { query: String },
    /// Manage saved words
    #[command(subcommand)]
    Fav(FavCommand),
}

#[derive(Subcommand, Debug)]
enum FavCommand {
    /// Save the first result of a staged search
    Add { query: String },
    List,
    Remove { word: String, definition: String },
}

impl Command {
    fn into_events(self) -> Vec<AppEvent> {
        match self {
            Command::Search { query } => vec![AppEvent::Query(query)],
            Command::Quick { query } => vec![AppEvent::QuickQuery(query)],
            Command::Fav(FavCommand::Add { query }) => {
                vec![AppEvent::Query(query), AppEvent::AddFavorite(1)]
            }
            Command::Fav(FavCommand::List) => vec![AppEvent::ListFavorites],
            Command::Fav(FavCommand::Remove { word, definition }) => {
                vec![AppEvent::RemoveFavorite { word, definition }]
            }
        }
    }
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => Config::new(),
    };

    init_tracing(cli.log_json || config.log_json);
    tracing::info!("Starting kotoba");

    let state = Arc::new(AppState::new(config)?);
    let controller = AppController::new(state);

    if let Some(command) = cli.command {
        return controller.run_once(command.into_events()).await;
    }

    let tasks = controller.spawn_tasks();

    tokio::select! {
        result = join_all(tasks) => result,
        _ = signal::ctrl_c() => {
            tracing::info!("Shutdown requested");
            controller.shutdown();
            Ok(())
        }
    }
}
