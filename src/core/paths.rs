//! Credentials file path resolution.

use crate::constants;
use crate::models::config::StoreConfig;
use std::env;
use std::path::PathBuf;

/// Resolve the credentials file from CLI arg, env var, or the configured default.
pub fn resolve_path(path_arg: Option<PathBuf>, config: &StoreConfig) -> PathBuf {
    resolve_with_env(path_arg, env::var_os(constants::CRED_LOCATION_ENV).map(PathBuf::from), config)
}

fn resolve_with_env(
    path_arg: Option<PathBuf>,
    env_path: Option<PathBuf>,
    config: &StoreConfig,
) -> PathBuf {
    if let Some(path) = path_arg {
        return path;
    }
    if let Some(path) = env_path.filter(|p| !p.as_os_str().is_empty()) {
        return path;
    }
    config.path.clone()
}
