mod commands;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "fingerprint",
    about = "Generate App Engine deployment config for Ruby apps"
)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write app.yaml (and, for custom runtimes, Dockerfile and .dockerignore)
    GenConfig {
        #[command(flatten)]
        source: SourceArgs,
    },
    /// Show what would be generated without writing anything
    Detect {
        #[command(flatten)]
        source: SourceArgs,
        /// Print the decision as JSON
        #[arg(long)]
        json: bool,
    },
    /// Check the local Ruby and bundler setup
    Doctor {
        /// Application source directory
        #[arg(default_value = ".")]
        source_dir: PathBuf,
    },
}

#[derive(Args)]
pub(crate) struct SourceArgs {
    /// Application source directory
    #[arg(default_value = ".")]
    pub source_dir: PathBuf,
    /// Generate a Dockerfile for a custom runtime
    #[arg(long)]
    pub custom: bool,
    /// Configuration is being generated for a deploy
    #[arg(long)]
    pub deploy: bool,
    /// Path to an existing app.yaml (default: <SOURCE_DIR>/app.yaml)
    #[arg(long, value_name = "APP_YAML")]
    pub config: Option<PathBuf>,
    /// Never prompt; fail instead of guessing when the entrypoint is ambiguous
    #[arg(long)]
    pub no_prompt: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                // arch-lint: allow(no-silent-result-drop) reason="an invalid RUST_LOG falls back to warn"
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::GenConfig { source } => commands::gen_config(&source).await?,
        Commands::Detect { source, json } => commands::detect(&source, json).await?,
        Commands::Doctor { source_dir } => commands::doctor(&source_dir).await?,
    }

    Ok(())
}
