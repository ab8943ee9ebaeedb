use clap::Parser;
use slotbook::config::{resolve_config_dir, SlotbookConfig};
use slotbook::{logging, BookingCoordinator, Result};
use std::io;

mod args;
mod cli;
use args::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let opts = Cli::parse();
    logging::init(opts.verbose);

    let config_dir = resolve_config_dir(opts.config_dir)?;
    let config = SlotbookConfig::load(&config_dir)?;
    tracing::debug!(dir = %config_dir.display(), ?config, "loaded config");

    let coordinator = BookingCoordinator::from_config(&config)?;

    match opts.command.unwrap_or(Commands::Menu) {
        Commands::Menu => {
            cli::menu::Menu::new(&coordinator, io::stdin().lock(), io::stdout().lock()).run()
        }
        Commands::Serve => cli::serve::run(&coordinator, io::stdin().lock(), io::stdout().lock()),
    }
}
