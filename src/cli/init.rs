use crate::cli::CliContext;
use crate::core::credstore::CredentialsStore;
use crate::error::CredentialsError;
use anyhow::{bail, Result};
use clap::Args;

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Extra template key(s), e.g. camera credentials
    #[arg(long = "key", value_name = "KEY")]
    pub extra_keys: Vec<String>,
}

pub fn run(ctx: &CliContext, args: InitArgs) -> Result<()> {
    let config = ctx.config.clone().with_extra_keys(args.extra_keys);
    let store = CredentialsStore::open(config)?;
    match store.create_empty() {
        Ok(()) => {}
        Err(CredentialsError::AlreadyExists { path }) => {
            bail!("{} already exists, refusing to overwrite", path.display())
        }
        Err(e) => return Err(e.into()),
    }

    println!("created {}", store.path().display());
    println!("fill in the following fields:");
    for key in &store.config().template_keys {
        println!("  {}", key);
    }
    Ok(())
}
