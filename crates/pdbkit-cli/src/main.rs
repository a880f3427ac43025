mod cli;
mod commands;
mod config;
mod error;
mod logging;

use crate::cli::{Cli, Commands};
use crate::config::PartialConfig;
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
    eyre_hook
        .install()
        .map_err(|e| CliError::Other(anyhow::anyhow!("Failed to install error hooks: {}", e)))?;
    std::panic::set_hook(Box::new(move |pi| {
        error!("{}", panic_hook.panic_report(pi));
    }));

    info!("pdbkit CLI v{} starting up.", env!("CARGO_PKG_VERSION"));
    debug!("Full CLI arguments parsed: {:?}", &cli);

    let settings = PartialConfig::load(cli.config.as_deref())?.merge_with_cli(&cli)?;

    let command_result = match cli.command {
        Commands::Reformat(args) => {
            info!("Dispatching to 'reformat' command.");
            commands::reformat::run(args, &settings)
        }
        Commands::Helices(args) => {
            info!("Dispatching to 'helices' command.");
            commands::helices::run(args)
        }
        Commands::Neighbors(args) => {
            info!("Dispatching to 'neighbors' command.");
            commands::neighbors::run(args, &settings)
        }
        Commands::Contacts(args) => {
            info!("Dispatching to 'contacts' command.");
            commands::contacts::run(args, &settings)
        }
    };

    match &command_result {
        Ok(_) => info!("Command completed successfully."),
        Err(e) => error!("Command failed: {}", e),
    }
    command_result
}
