//! schemald CLI: publish content records as schema.org JSON-LD.
//!
//! Reads records from a catalog file and prints one JSON-LD document per
//! record, optionally with the entity references they point to.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli)
}
