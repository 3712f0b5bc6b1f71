//! Brume - a static site generator for a markdown personal blog.

#![allow(dead_code)]

mod cli;
mod config;
mod content;
mod core;
mod generator;
mod logger;
mod render;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::SiteConfig;

use crate::core::BuildMode;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    let config = SiteConfig::load(&cli)?;

    match &cli.command {
        Commands::Build { .. } => cli::build::build_all(&config, BuildMode::Production),
        Commands::Serve { .. } => cli::serve::serve_site(&config),
    }
}
