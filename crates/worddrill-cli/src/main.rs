//! worddrill CLI — terminal vocabulary drills.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use worddrill_core::drill::DrillMode;
use worddrill_core::model::DatasetKind;

mod commands;

use commands::SourceArgs;

#[derive(Parser)]
#[command(name = "worddrill", version, about = "German vocabulary drills from a spreadsheet")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive practice session
    Practice {
        /// Drill mode: gender, translation, person, typing
        #[arg(long, default_value = "gender")]
        mode: DrillMode,

        #[command(flatten)]
        source: SourceArgs,

        /// Seed for item selection (repeatable sessions)
        #[arg(long)]
        seed: Option<u64>,

        /// Write a JSON session summary here on exit
        #[arg(long)]
        summary: Option<PathBuf>,
    },

    /// Ingest a dataset and print what was decoded
    Inspect {
        /// Dataset layout: nouns, verbs, verb-persons
        #[arg(long, default_value = "nouns")]
        kind: DatasetKind,

        #[command(flatten)]
        source: SourceArgs,

        /// Show at most this many records
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Create a starter worddrill.toml
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("worddrill=warn")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Practice {
            mode,
            source,
            seed,
            summary,
        } => commands::practice::execute(mode, source, seed, summary).await,
        Commands::Inspect {
            kind,
            source,
            limit,
        } => commands::inspect::execute(kind, source, limit).await,
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
