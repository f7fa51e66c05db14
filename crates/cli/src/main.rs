//! `varistock` — reconcile persisted product documents from the command line.

mod cli;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    varistock_observability::init();

    let cli = cli::Cli::parse();
    let output = cli.execute()?;
    println!("{output}");
    Ok(())
}
