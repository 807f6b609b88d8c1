use anyhow::Result;
use clap::Parser;

use precinctmap::cli::{Cli, Commands};
use precinctmap::commands::{convert, districts};

fn main() -> Result<()> {
    let cli = Cli::parse();
    match &cli.command {
        Commands::Convert(args) => convert::run(&cli, args),
        Commands::Districts(args) => districts::run(&cli, args),
    }
}
