//! elasconf CLI - Main entry point

use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "elasconf")]
#[command(version)]
#[command(about = "Resolve values from layered rule documents", long_about = None)]
struct Cli {
    /// Rule document (YAML) to load
    #[arg(short, long)]
    rules: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the value of the most specific configuration matching the query
    Get {
        /// Query constraints (ATTR=VALUE)
        pairs: Vec<String>,

        /// Also print which stored configuration answered
        #[arg(long)]
        explain: bool,
    },

    /// Check whether the query matches a stored configuration
    Contains {
        /// Query constraints (ATTR=VALUE)
        pairs: Vec<String>,

        /// Require the query to be a stored configuration itself
        #[arg(long)]
        exact: bool,
    },

    /// Print every value stored at or below the query
    All {
        /// Query constraints (ATTR=VALUE)
        pairs: Vec<String>,
    },

    /// Print every distinct value stored at or below the query
    Bag {
        /// Query constraints (ATTR=VALUE)
        pairs: Vec<String>,
    },

    /// List the stored configurations
    List,
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "elasconf=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let store = commands::load_store(&cli.rules)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Get { pairs, explain } => {
            commands::query::get(&store, &pairs, explain, &mut out)?
        }
        Commands::Contains { pairs, exact } => {
            commands::query::contains(&store, &pairs, exact, &mut out)?
        }
        Commands::All { pairs } => commands::aggregate::all(&store, &pairs, &mut out)?,
        Commands::Bag { pairs } => commands::aggregate::bag(&store, &pairs, &mut out)?,
        Commands::List => commands::list::execute(&store, &mut out)?,
    }

    out.flush()?;
    Ok(())
}
