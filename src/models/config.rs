//! Store configuration: file location and template keys per deployment.

use crate::constants;
use crate::error::{CredentialsError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Known station deployments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    #[default]
    Panthyr,
    Hypermaq,
}

impl Profile {
    pub fn default_path(self) -> &'static str {
        match self {
            Profile::Panthyr => constants::PANTHYR_CRED_LOCATION,
            Profile::Hypermaq => constants::HYPERMAQ_CRED_LOCATION,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Profile::Panthyr => "panthyr",
            Profile::Hypermaq => "hypermaq",
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Profile {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "panthyr" => Ok(Profile::Panthyr),
            "hypermaq" => Ok(Profile::Hypermaq),
            other => Err(format!("unknown profile '{}' (use panthyr|hypermaq)", other)),
        }
    }
}

/// Everything a [`CredentialsStore`](crate::core::credstore::CredentialsStore) needs
/// to locate, read, and scaffold its file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub path: PathBuf,
    /// Keys written, in order, by `create_empty`.
    pub template_keys: Vec<String>,
    /// Write a blank template when `parse` finds no file.
    pub scaffold_on_missing: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::for_profile(Profile::default())
    }
}

impl StoreConfig {
    pub fn for_profile(profile: Profile) -> Self {
        Self {
            path: PathBuf::from(profile.default_path()),
            template_keys: constants::DEFAULT_TEMPLATE_KEYS
                .iter()
                .map(|k| k.to_string())
                .collect(),
            scaffold_on_missing: true,
        }
    }

    /// Default template keys, stored at `path`.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// Append keys to the template, skipping ones already listed.
    pub fn with_extra_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for key in keys {
            let key = key.into().trim().to_lowercase();
            if !key.is_empty() && !self.template_keys.contains(&key) {
                self.template_keys.push(key);
            }
        }
        self
    }

    pub fn with_scaffold_on_missing(mut self, enabled: bool) -> Self {
        self.scaffold_on_missing = enabled;
        self
    }

    /// Load a deployment file (see [`DeploymentFile`]).
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| CredentialsError::Config {
            path: path.to_path_buf(),
            reason: format!("read failed: {}", e),
        })?;
        Self::from_toml_str(&content).map_err(|reason| CredentialsError::Config {
            path: path.to_path_buf(),
            reason,
        })
    }

    pub fn from_toml_str(content: &str) -> std::result::Result<Self, String> {
        let file: DeploymentFile = toml::from_str(content).map_err(|e| e.to_string())?;
        Ok(file.store.into_config())
    }
}

/// On-disk deployment configuration.
///
/// ```toml
/// [store]
/// profile = "hypermaq"
/// extra_keys = ["camera_user", "camera_password"]
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeploymentFile {
    #[serde(default)]
    pub store: StoreSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoreSection {
    #[serde(default)]
    pub profile: Profile,
    #[serde(default)]
    pub path: Option<PathBuf>,
    #[serde(default)]
    pub extra_keys: Vec<String>,
    #[serde(default = "default_scaffold")]
    pub scaffold_on_missing: bool,
}

impl Default for StoreSection {
    fn default() -> Self {
        Self {
            profile: Profile::default(),
            path: None,
            extra_keys: Vec::new(),
            scaffold_on_missing: default_scaffold(),
        }
    }
}

fn default_scaffold() -> bool {
    true
}

impl StoreSection {
    pub fn into_config(self) -> StoreConfig {
        let mut config = StoreConfig::for_profile(self.profile)
            .with_extra_keys(self.extra_keys)
            .with_scaffold_on_missing(self.scaffold_on_missing);
        if let Some(path) = self.path {
            config.path = path;
        }
        config
    }
}
