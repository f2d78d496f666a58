mod cli;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use monday_extract::config::{self, API_KEY_ENV};
use monday_extract::{render, BoardExtractor, MondayExtractor};

use cli::{Command, OutputFormat};

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr; stdout carries the tables
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("monday_extract=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let opts = match cli::parse_args(&args)? {
        Command::Help => {
            cli::print_help();
            return Ok(());
        }
        Command::Extract(opts) => opts,
    };

    let settings = config::load_config()?.resolve(
        opts.api_key,
        std::env::var(API_KEY_ENV).ok(),
        opts.boards,
    )?;

    let extractor = MondayExtractor::new(settings.api_key, settings.board_ids)
        .with_endpoint(settings.endpoint);
    let boards = extractor.extract().await.context("Extraction failed")?;
    tracing::info!(boards = boards.len(), "extraction finished");

    match opts.format {
        OutputFormat::Text => print!("{}", render::to_text(&boards)),
        OutputFormat::Json => println!("{}", render::to_json(&boards)?),
    }

    Ok(())
}
