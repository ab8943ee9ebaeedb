use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "slotbook")]
#[command(about = "Book appointment slots with providers", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory holding config.json (defaults to $SLOTBOOK_CONFIG_DIR, then the platform config dir)
    #[arg(long, global = true)]
    pub config_dir: Option<PathBuf>,

    /// Verbose logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Interactive menu (default)
    #[command(alias = "m")]
    Menu,

    /// Answer JSON requests, one per stdin line, on stdout
    #[command(alias = "s")]
    Serve,
}
