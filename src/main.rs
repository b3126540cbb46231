use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Serialize;

use aerotv::config::{ConfigError, ShellConfig};
use aerotv::replay::{self, ReplayError};
use aerotv::services::favorites::FavoritesStore;
use aerotv::services::history::HistoryStore;
use aerotv::services::settings::{Settings, SettingsStore};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Replay(#[from] ReplayError),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "aerotv", about = "Remote-driven browser shell: scenario replay and store inspection")]
struct Cli {
    /// Directory holding settings, favorites and history.
    #[arg(long, env = "AEROTV_DATA_DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Drive the shell through a scenario file and print the final report.
    Replay { scenario: PathBuf },
    /// Print the saved settings.
    Settings,
    /// Print the saved favorites.
    Favorites,
    /// Print the browsing history, newest first.
    History,
}

fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let mut config = ShellConfig::from_env()?;
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }
    tracing::debug!(data_dir = %config.data_dir.display(), "config loaded");

    match cli.command {
        Command::Replay { scenario } => {
            let scenario = replay::load_scenario(&scenario)?;
            let report = replay::run(&config, scenario);
            print_json(&report)
        }
        Command::Settings => {
            let store = SettingsStore::open(&config.data_dir, Settings::with_homepage(config.homepage.clone()));
            print_json(store.get())
        }
        Command::Favorites => print_json(FavoritesStore::open(&config.data_dir).list()),
        Command::History => print_json(HistoryStore::open(&config.data_dir).list()),
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
