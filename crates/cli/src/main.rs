use anyhow::{Context, Result};
use clap::Parser;

use menucost_cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    menucost_observability::init(cli.log_format);

    let output = menucost_cli::run(&cli)
        .with_context(|| format!("menucost failed (catalog {})", cli.catalog.display()))?;
    println!("{output}");
    Ok(())
}
