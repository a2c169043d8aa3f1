//! pkgref - migrate packages.config projects to SDK-style PackageReference projects.

mod cli;
mod config;
mod discover;
mod logger;
mod manifest;
mod pipeline;
mod project;
mod utils;

use anyhow::{Result, bail};
use clap::{ColorChoice, Parser};
use cli::{
    Cli,
    migrate::{self, RunOptions},
};
use config::MigrateConfig;
use utils::plural_count;

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    let config = MigrateConfig::load(&cli)?;
    let options = RunOptions {
        dry_run: cli.dry_run,
        fail_fast: cli.fail_fast,
    };

    let report = migrate::run(&config, options)?;
    if report.has_failures() {
        bail!("{} could not be migrated", plural_count(report.failed_count(), "project"));
    }
    Ok(())
}
