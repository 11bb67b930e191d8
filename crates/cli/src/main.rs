//! LitLens CLI, the main entry point.
//!
//! Commands:
//! - `serve`: start the web UI
//! - `ask`: one chat turn from the terminal
//! - `compare`: compare two papers
//! - `extract`: print the tagged PDF context without calling a model
//! - `config`: show the effective configuration

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "litlens",
    about = "LitLens · AI Research Paper Labs",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the web UI
    Serve {
        /// Override the port
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Ask a research question, optionally grounded in local PDFs
    Ask {
        query: String,

        /// PDF to include as context (repeatable, kept in order)
        #[arg(long = "pdf", value_name = "FILE")]
        pdfs: Vec<PathBuf>,
    },

    /// Compare two papers (titles, arXiv links, or topics)
    Compare { paper_a: String, paper_b: String },

    /// Print the tagged text LitLens would send for these PDFs
    Extract {
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Override the character budget
        #[arg(long)]
        max_chars: Option<usize>,
    },

    /// Show the effective configuration (API key redacted)
    Config {
        /// Print only the config file path
        #[arg(long)]
        path: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Serve { port } => commands::serve::run(port).await?,
        Commands::Ask { query, pdfs } => commands::ask::run(query, pdfs).await?,
        Commands::Compare { paper_a, paper_b } => {
            commands::compare::run(paper_a, paper_b).await?
        }
        Commands::Extract { files, max_chars } => commands::extract::run(files, max_chars).await?,
        Commands::Config { path } => commands::config_cmd::run(path)?,
    }

    Ok(())
}
