use anyhow::{ensure, Context};
use bubbletea_rs::Program;
use clap::Parser;
use std::fs::File;
use std::path::Path;
use std::sync::Mutex;
use tracing::info;
use tracing_subscriber::EnvFilter;
use userpager::app::{self, App, Startup};
use userpager::config::Config;

fn init_logging(path: Option<&Path>) -> anyhow::Result<()> {
    // stdout belongs to the terminal UI
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    config.validate()?;
    init_logging(config.log_file.as_deref())?;

    let source = config.source()?;
    info!(source = %source.describe(), per_page = config.per_page, "loading users");
    let fetched = source.fetch().await;

    let startup = Startup::new(fetched, config.per_page, config.max_pages);
    ensure!(app::install(startup), "startup state was already installed");

    let program = Program::<App>::builder()
        .alt_screen(true)
        .signal_handler(true)
        .build()?;
    program.run().await?;
    Ok(())
}
