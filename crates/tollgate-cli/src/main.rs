mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tollgate_prefs::PrefStore;

/// Default identifier for this app itself; never blocked.
const SELF_PACKAGE: &str = "com.tollgate.app";

#[derive(Parser)]
#[command(name = "tollgate")]
#[command(about = "Foreground app blocker with a wait-to-unlock overlay", long_about = None)]
struct Cli {
    /// Preference file path (defaults to the platform data dir)
    #[arg(long, global = true)]
    prefs: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Enforce the blocklist against foreground events read from stdin
    Run {
        /// Package identifier reported for this app itself
        #[arg(long, default_value = SELF_PACKAGE)]
        self_package: String,
    },
    /// Show the resolved preferences
    Prefs,
    /// Explain what a foreground switch to PACKAGE would do
    Check {
        /// Application identifier to evaluate
        package: String,
        /// Package identifier reported for this app itself
        #[arg(long, default_value = SELF_PACKAGE)]
        self_package: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .init();

    let cli = Cli::parse();
    let store = match cli.prefs {
        Some(path) => PrefStore::new(path),
        None => PrefStore::open_default()?,
    };

    match cli.command {
        Commands::Run { self_package } => commands::run::execute(store, self_package).await,
        Commands::Prefs => commands::prefs::show(&store),
        Commands::Check {
            package,
            self_package,
        } => commands::prefs::check(&store, &package, &self_package),
    }
}
