use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(name = "brc")]
#[command(about = "Brainrot collection calculator", long_about = None)]
struct Cli {
    /// Config overlays in merge order, applied on top of the built-in defaults
    #[arg(long = "config", global = true)]
    config_paths: Vec<String>,

    /// Dataset file (overrides BRC_STORE_PATH and store.path)
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    /// Fail instead of warn when a config key is not consumed
    #[arg(long = "strict-config", global = true, default_value_t = false)]
    strict_config: bool,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge one or more collector snapshots into the dataset
    Import {
        /// Snapshot JSON files, merged in the order given
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Drop one owner. Guardrail: refuses unless --yes is provided.
    Remove {
        #[arg(long)]
        owner_id: i64,

        /// Confirm the removal
        #[arg(long, default_value_t = false)]
        yes: bool,
    },

    /// Delete the whole dataset. Guardrail: refuses unless --yes is provided.
    Clear {
        /// Confirm the reset
        #[arg(long, default_value_t = false)]
        yes: bool,
    },

    /// Print global totals
    Stats,

    /// Print owners ranked by generation
    List {
        /// Also print every entity under its owner
        #[arg(long, default_value_t = false)]
        entities: bool,
    },

    /// Write the dataset as JSON
    Export {
        /// Output file (default: <exports.dir>/brainrot_full_database_<millis>.json)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Compute layered config hash + print canonical JSON
    ConfigHash {
        /// Overlays in merge order, on top of the built-in defaults
        #[arg(required = true)]
        paths: Vec<String>,
    },
}

fn main() -> Result<()> {
    // Load .env.local if present (dev convenience). Silent when missing.
    let _ = dotenvy::from_filename(".env.local");

    init_tracing();

    let cli = Cli::parse();

    if let Commands::ConfigHash { paths } = &cli.cmd {
        return commands::config_hash(paths);
    }

    let ws = commands::Workspace::load(&cli.config_paths, cli.store.as_deref(), cli.strict_config)?;

    match cli.cmd {
        Commands::Import { files } => commands::import::import(&ws, &files),
        Commands::Remove { owner_id, yes } => commands::import::remove(&ws, owner_id, yes),
        Commands::Clear { yes } => commands::import::clear(&ws, yes),
        Commands::Stats => commands::report::stats(&ws),
        Commands::List { entities } => commands::report::list(&ws, entities),
        Commands::Export { out } => commands::export::export(&ws, out),
        Commands::ConfigHash { .. } => Ok(()),
    }
}

/// stdout carries command output; logs go to stderr.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();
}
