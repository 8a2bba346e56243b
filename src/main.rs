use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = panthyr_credentials::cli::Cli::parse();
    cli.run()
}
