//! Folio - discover single-file UI components, serve each at its own URL
//! and build them into capture-ready pages.

#![allow(dead_code)]

mod cli;
mod component;
mod config;
mod core;
mod embed;
mod logger;
mod utils;

use anyhow::{Context, Result};
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::FolioConfig;

fn main() -> Result<()> {
    // Setup global Ctrl+C handler (before any blocking operations)
    core::setup_shutdown_handler()?;

    let cli = Cli::parse();

    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    let config = FolioConfig::load(&cli)?;

    match &cli.command {
        Commands::Serve { .. } => serve(&config),
        Commands::Build { .. } => cli::build::build_site(&config).map(|_| ()),
        Commands::List { targets, pretty } => cli::list::run_list(&config, *targets, *pretty),
    }
}

/// Scan once, fail fast on collisions, then serve until Ctrl+C.
fn serve(config: &FolioConfig) -> Result<()> {
    // watch before the first scan so no change slips in between
    let watcher = cli::serve::start_watcher(config)?;

    let dir = &config.components.dir;
    let catalog = component::scan(dir, &config.components.extensions)
        .with_context(|| format!("failed to discover components in {}", dir.display()))?;
    // same uniqueness guarantees as a build
    component::generate_targets(&catalog, &config.build.page_extension)?;

    let bound = cli::serve::bind_server(config)?;
    let state = cli::serve::ServeState::from_disk(catalog, config.page.clone());
    bound.run(state, watcher, config)
}
