// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of FluxION.

//! CLI entry point for the FluxION ROI simulator

use anyhow::{Context, Result};
use clap::Parser;
use fluxion_roi::SimulatorConfig;
use fluxion_roi::cli::{Cli, Commands, CsvFormatter, OutputFormat, RunArgs, TableFormatter};
use fluxion_roi::run_simulation;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Logs to stderr, results to stdout
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("fluxion_roi=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run(args) => run_command(args).await,
        Commands::ExampleConfig => {
            print!("{}", SimulatorConfig::example_toml());
            Ok(())
        }
    }
}

async fn run_command(args: RunArgs) -> Result<()> {
    let config = match &args.config {
        Some(path) => SimulatorConfig::from_file(path)?,
        None => SimulatorConfig::default(),
    };
    let request = args.to_request()?;
    info!(
        "Simulating {} with {:?} ({:?})",
        request.region, request.consumption, request.tax
    );

    let result = tokio::select! {
        result = run_simulation(&config, &request) => result?,
        _ = tokio::signal::ctrl_c() => {
            warn!("Interrupted, simulation discarded");
            return Ok(());
        }
    };

    match args.output {
        OutputFormat::Table => print!("{}", TableFormatter::format_result(&result)),
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&result).context("Failed to serialize result")?
        ),
    }

    if let Some(path) = &args.csv_path {
        CsvFormatter::write_projection(&result, path)?;
        info!("Projection written to {}", path.display());
    }

    Ok(())
}
