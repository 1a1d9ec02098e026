// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Portal frame generator CLI

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use portalframe::cli::{Prompter, Reporter};
use portalframe::{FrameConfig, StructureReport};
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "portalframe")]
#[command(about = "Parametric steel portal frame generator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration file (defaults to ./portalframe.toml when present)
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the frame and report its geometry
    Build {
        /// Rafter angle in degrees
        #[arg(short, long)]
        angle: Option<f64>,

        /// Purlins on the left rafter
        #[arg(short, long)]
        purlins: Option<usize>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the effective configuration as TOML
    Config {
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show version information
    Version,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(&cli) {
        Reporter::report_error(&format!("{err:#}"));
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let config = FrameConfig::load(cli.config.as_deref())?;

    match &cli.command {
        Some(Commands::Build {
            angle,
            purlins,
            json,
        }) => build_command(&config, *angle, *purlins, *json),
        Some(Commands::Config { output }) => config_command(&config, output.as_deref()),
        Some(Commands::Version) => {
            println!("portalframe v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        None => build_command(&config, None, None, false),
    }
}

fn build_command(
    config: &FrameConfig,
    angle: Option<f64>,
    purlins: Option<usize>,
    json: bool,
) -> Result<()> {
    // Prompts go to stderr so stdout carries only the report
    let stdin = io::stdin();
    let mut prompter = Prompter::new(stdin.lock(), io::stderr());

    let angle = match angle.or(config.rafter_angle) {
        Some(angle) => angle,
        None => prompter.ask_angle().context("Failed to read the rafter angle")?,
    };
    let purlins = match purlins.or(config.purlin_count) {
        Some(purlins) => purlins,
        None => prompter
            .ask_purlin_count()
            .context("Failed to read the number of prisms")?,
    };
    debug!(angle, purlins, "parameters resolved");

    let params = config.parameters(angle, purlins);
    let (_solid, report) = StructureReport::generate(&params, &config.layout)
        .context("Failed to build the portal frame")?;

    if json {
        Reporter::write_json(&report, io::stdout().lock()).context("Failed to write report")?;
    } else {
        Reporter::report_structure(&report);
    }
    Ok(())
}

fn config_command(config: &FrameConfig, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            config.save(path)?;
            Reporter::report_info(&format!("Configuration written to {}", path.display()));
        }
        None => print!("{}", config.to_toml()?),
    }
    Ok(())
}
