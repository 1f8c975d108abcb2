//! Modelr CLI - Synthetic Seismic Forward Modeling
//!
//! Command-line interface for running modeling requests.

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use modelr::cli::{commands, Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins; otherwise info, or debug with --verbose
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("Modelr v{}", env!("CARGO_PKG_VERSION"));

    let config = commands::load_config(cli.config.as_deref()).with_context(|| {
        format!(
            "failed to load config from {}",
            cli.config.as_deref().map(|p| p.display().to_string()).unwrap_or_default()
        )
    })?;

    match cli.command {
        Some(cmd) => handle_command(cmd, &config),
        None => {
            println!("Modelr v{}", env!("CARGO_PKG_VERSION"));
            println!("Use --help for available commands");
            Ok(())
        }
    }
}

fn handle_command(cmd: Commands, config: &modelr::ModelingConfig) -> Result<()> {
    match cmd {
        Commands::Run {
            request,
            output,
            format,
        } => commands::run(config, &request, output.as_deref(), format)
            .with_context(|| format!("request {} failed", request.display())),
        Commands::Methods => Ok(commands::list_methods()?),
        Commands::Tuning { request, output } => {
            commands::tuning(config, &request, output.as_deref())
                .with_context(|| format!("tuning analysis of {} failed", request.display()))
        }
    }
}
