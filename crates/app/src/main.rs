use anyhow::Context;
use clap::Parser;
use grocer_core::Session;
use grocer_import::{load_from, Source};
use std::io::Write;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod render;

use commands::{execute, Command, Flow, HELP};
use config::AppConfig;

/// Interactive grocery price calculator.
#[derive(Debug, Parser)]
#[command(name = "grocer", version)]
struct Cli {
    /// Config file; defaults to the per-user config.toml if present.
    #[arg(long, env = "GROCER_CONFIG")]
    config: Option<PathBuf>,
    /// URL or path of the price table, overriding the config.
    #[arg(long)]
    source: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref())?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log.filter))
        .context("Invalid log filter")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let source = Source::parse(cli.source.as_deref().unwrap_or(&config.source.location));
    let mut session = Session::new();
    reload(&mut session, &source, &config).await;

    let mut stdout = std::io::stdout();
    writeln!(stdout, "{HELP}")?;

    // ── Input loop ────────────────────────────────────────────────────────────
    // One command runs to completion before the next line is read.
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        write!(stdout, "> ")?;
        stdout.flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                writeln!(stdout, "{e}")?;
                continue;
            }
        };

        match execute(&mut session, command, &mut stdout)? {
            Flow::Continue => {}
            Flow::Reload => reload(&mut session, &source, &config).await,
            Flow::Quit => break,
        }
    }

    Ok(())
}

/// Loads the price table into `session`. On failure the session is left
/// without a catalog and the error is logged.
async fn reload(session: &mut Session, source: &Source, config: &AppConfig) {
    match load_from(source, &config.profile, config.source.timeout()).await {
        Ok(catalog) => {
            let diagnostics = catalog.diagnostics();
            if diagnostics.skipped_rows > 0 {
                tracing::info!("Skipped {} row(s) without an item name", diagnostics.skipped_rows);
            }
            session.install(catalog);
        }
        Err(e) => {
            session.unload();
            tracing::error!("Initialization aborted: {e}");
        }
    }
}
