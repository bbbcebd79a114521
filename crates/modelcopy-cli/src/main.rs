//! ModelCopy CLI
//!
//! Runs a copy or a usage link against a JSON snapshot and prints the
//! submitted change-set.

use clap::{Parser, Subcommand};
use modelcopy_core::logging_facility::{self, Profile};

mod commands;
mod config;
mod io;

#[derive(Debug, Parser)]
#[command(name = "modelcopy")]
#[command(about = "ModelCopy - copy and link element definitions", long_about = None)]
struct Cli {
    /// Logging profile: development, production or test
    #[arg(long, global = true, default_value = "production")]
    log_profile: Profile,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Copy an element definition
    Copy(commands::copy::CopyArgs),
    /// Create a usage of one element definition inside another
    Link(commands::link::LinkArgs),
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging_facility::init(cli.log_profile);

    let result = match cli.command {
        Commands::Copy(args) => commands::copy::execute(args).await,
        Commands::Link(args) => commands::link::execute(args).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
