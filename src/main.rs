// file: src/main.rs
// description: commandline application entry point with command handling
// reference: application bootstrap and orchestration

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use deep_search::{Config, DeepSearchServer, Highlighter, MatchMode};
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "deep_search")]
#[command(version = "0.1.0")]
#[command(about = "Mock deep-search backend with text highlighting", long_about = None)]
struct Cli {
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = "config/default.toml"
    )]
    config: PathBuf,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    color: bool,

    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server exposing POST /api/deep-search
    Serve {
        #[arg(short, long, value_name = "PORT")]
        port: Option<u16>,

        /// Override the artificial response delay in milliseconds
        #[arg(long, value_name = "MS")]
        delay_ms: Option<u64>,
    },

    /// Highlight matches of a search term in a text string
    Highlight {
        /// Text to highlight in
        text: String,

        /// Search term; empty leaves the text unchanged
        term: String,

        /// Match the term as an exact substring instead of a pattern
        #[arg(long)]
        literal: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    deep_search::utils::logging::init_logger(cli.color, cli.verbose);

    let config = if cli.config.exists() {
        Config::load(Some(cli.config.as_path())).context("Failed to load configuration")?
    } else {
        warn!(
            "Config file {} not found, using default configuration",
            cli.config.display()
        );
        Config::load(None).unwrap_or_else(|e| {
            warn!("Falling back to built-in defaults: {}", e);
            Config::default_config()
        })
    };

    match cli.command {
        Commands::Serve { port, delay_ms } => {
            cmd_serve(config, port, delay_ms).await?;
        }
        Commands::Highlight {
            text,
            term,
            literal,
        } => {
            cmd_highlight(&text, &term, literal)?;
        }
    }

    Ok(())
}

async fn cmd_serve(mut config: Config, port: Option<u16>, delay_ms: Option<u64>) -> Result<()> {
    if let Some(port) = port {
        config.server.port = port;
    }
    if let Some(delay_ms) = delay_ms {
        config.server.delay_ms = delay_ms;
    }

    info!(
        "Starting deep-search server (delay: {} ms)",
        config.server.delay_ms
    );

    let server = DeepSearchServer::bind(&config)
        .await
        .context("Failed to start server")?;

    let addr = server.local_addr()?;
    eprintln!();
    eprintln!(
        "{}",
        deep_search::utils::logging::format_success(&format!(
            "Deep-search server running at http://{addr}"
        ))
    );
    eprintln!(
        "{}",
        deep_search::utils::logging::format_info("Press Ctrl+C to stop")
    );
    eprintln!();

    server.run().await.context("Server error")?;

    Ok(())
}

fn cmd_highlight(text: &str, term: &str, literal: bool) -> Result<()> {
    let mode = if literal {
        MatchMode::Literal
    } else {
        MatchMode::Pattern
    };

    let highlighter = Highlighter::new(term, mode).context("Invalid search term")?;
    println!("{}", highlighter.highlight(text));

    Ok(())
}
