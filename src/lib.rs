//! Credentials file store for Panthyr monitoring stations.
//!
//! Loads the station's INI credentials file (one `[credentials]` section),
//! serves read-only lookups, and scaffolds a blank template when none exists.
//!
//! ## Modules
//! - `cli` — Command-line handlers
//! - `core` — Store, INI codec, path resolution
//! - `models` — Store configuration and deployment profiles
//! - `util` — Filesystem helpers

pub mod cli;
pub mod constants;
pub mod core;
pub mod error;
pub mod models;
pub mod util;

pub use crate::core::credstore::CredentialsStore;
pub use crate::error::{CredentialsError, ErrorKind, Result};
pub use crate::models::config::{Profile, StoreConfig};
