//! wavcreate CLI
//!
//! Command-line interface for rendering note files to WAV.

use anyhow::Context;
use clap::Parser;
use env_logger::Env;
use log::{debug, error};

use wavcreate::cli::{commands, Cli, Commands};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).init();

    debug!("wavcreate v{}", env!("CARGO_PKG_VERSION"));

    handle_command(cli.command)
}

fn handle_command(cmd: Commands) -> anyhow::Result<()> {
    let result = match &cmd {
        Commands::Render {
            input,
            output,
            sample_rate,
            config,
        } => commands::render(input, output.as_deref(), *sample_rate, config.as_deref()).map(|_| ()),
        Commands::Inspect { path } => commands::inspect(path).map(|_| ()),
        Commands::Notes { input } => commands::notes(input),
        Commands::Freq { key } => commands::freq(*key),
    };

    result
        .map_err(|e| {
            error!("[{}] {}", e.error_code(), e.recovery_hint());
            e
        })
        .with_context(|| format!("{:?} failed", cmd))
}
