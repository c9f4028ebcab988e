mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod utils;

use crate::cli::{Cli, Commands};
use crate::config::PartialCliConfig;
use crate::error::{CliError, Result};
use clap::Parser;
use tracing::{debug, error, info};

fn main() {
    if let Err(e) = run_app() {
        eprintln!("\n❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn run_app() -> Result<()> {
    let cli = Cli::parse();
    logging::setup_logging(cli.verbose, cli.quiet, cli.log_file.clone())?;

    let (panic_hook, eyre_hook) = color_eyre::config::HookBuilder::default().into_hooks();
    eyre_hook.install().map_err(|e| CliError::Other(e.into()))?;
    std::panic::set_hook(Box::new(move |pi| {
        error!("{}", panic_hook.panic_report(pi));
    }));

    info!("🚀 srw-native CLI v{} starting up.", env!("CARGO_PKG_VERSION"));
    debug!("Full CLI arguments parsed: {:?}", &cli);

    let file_config = PartialCliConfig::load(cli.config.as_deref(), &cli.set_values)?;
    let mut stdout = std::io::stdout().lock();

    let command_result = match cli.command {
        Commands::Inspect(args) => {
            info!("Dispatching to 'inspect' command.");
            commands::inspect::run(args, &file_config, &mut stdout)
        }
        Commands::Sum(args) => {
            info!("Dispatching to 'sum' command.");
            commands::sum::run(args, &file_config, &mut stdout)
        }
        Commands::Scale(args) => {
            info!("Dispatching to 'scale' command.");
            commands::scale::run(args, &mut stdout)
        }
        Commands::Export(args) => {
            info!("Dispatching to 'export' command.");
            commands::export::run(args, &file_config, &mut stdout)
        }
    };

    match &command_result {
        Ok(_) => info!("✅ Command completed successfully."),
        Err(e) => error!("❌ Command failed: {}", e),
    }

    command_result
}
