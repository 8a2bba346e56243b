//! CLI routing and command dispatch.

use crate::constants;
use crate::core::credstore::CredentialsStore;
use crate::core::paths;
use crate::models::config::{Profile, StoreConfig};
use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

pub mod doctor;
pub mod init;
pub mod show;

/// Shared context passed to all command handlers.
pub struct CliContext {
    pub config: StoreConfig,
}

impl CliContext {
    /// Open the store, failing if the file is not there yet.
    pub fn open_existing(&self) -> Result<CredentialsStore> {
        if !self.config.path.is_file() {
            bail!(
                "credentials file {} not found (run: panthyr-credentials init)",
                self.config.path.display()
            );
        }
        CredentialsStore::open(self.config.clone())
            .with_context(|| format!("load credentials from {}", self.config.path.display()))
    }
}

#[derive(Parser, Debug)]
#[command(name = "panthyr-credentials", version, about = "Station credentials file tool")]
pub struct Cli {
    /// Credentials file (overrides config and profile default)
    #[arg(long, global = true, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Deployment config file (TOML)
    #[arg(long, global = true, value_name = "PATH", env = "PANTHYR_CREDENTIALS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Station profile selecting the default path (panthyr|hypermaq)
    #[arg(long, global = true, conflicts_with = "config")]
    pub profile: Option<Profile>,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        init_logging(self.verbose);

        let mut config = match &self.config {
            Some(path) => StoreConfig::from_toml_file(path)?,
            None => StoreConfig::default(),
        };
        if let Some(profile) = self.profile {
            config = StoreConfig::for_profile(profile);
        }
        config.path = paths::resolve_path(self.file, &config);

        let ctx = CliContext { config };

        match self.command {
            Commands::Init(args) => init::run(&ctx, args),
            Commands::Show(args) => show::run_show(&ctx, args),
            Commands::Get(args) => show::run_get(&ctx, args),
            Commands::Path => show::run_path(&ctx),
            Commands::Doctor(args) => doctor::run(&ctx, args),
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(constants::LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    // a subscriber may already be installed when embedded
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a blank credentials file to fill in
    Init(init::InitArgs),
    /// List all credentials (values masked)
    Show(show::ShowArgs),
    /// Print a single credential value
    Get(show::GetArgs),
    /// Print the resolved credentials file path
    Path,
    /// Check the credentials file (safe, read-only)
    Doctor(doctor::DoctorArgs),
}
