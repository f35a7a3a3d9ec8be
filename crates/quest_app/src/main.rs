mod app;
mod cli;
mod config;
mod ledger;
mod logging;
mod quota;
mod state;
mod words;

use anyhow::{Context, Result};
use clap::Parser;

use crate::cli::Cli;
use crate::config::QuestConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::initialize(cli.log, cli.log_level);

    let mut config = QuestConfig::load(cli.config.as_deref())?;
    config.apply_cli(&cli);
    config.validate()?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;
    let summary = runtime.block_on(app::run(&config, cli.fresh))?;

    println!(
        "search quest {}: {} pc and {} mobile searches (cursors pc={} mobile={})",
        summary.job_status,
        summary.pc_searches,
        summary.mobile_searches,
        summary.pc_cursor,
        summary.mobile_cursor
    );
    Ok(())
}
