//! The credentials store: one INI file, one `[credentials]` section.

use crate::constants;
use crate::core::ini;
use crate::error::{CredentialsError, Result};
use crate::models::config::StoreConfig;
use crate::util::fs as cred_fs;
use std::collections::BTreeMap;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
#[cfg(unix)]
use std::os::unix::fs::OpenOptionsExt;
use std::path::Path;
use tracing::{debug, error, info, warn};

/// In-memory view of a station credentials file.
///
/// The file is read once, at construction (if present) or on an explicit
/// [`parse`](Self::parse). Later edits on disk are not picked up automatically.
#[derive(Debug, Clone)]
pub struct CredentialsStore {
    config: StoreConfig,
    credentials: BTreeMap<String, String>,
}

impl CredentialsStore {
    /// Build a store and load the file if it exists.
    ///
    /// A missing file is not an error: the store is simply empty. An existing
    /// file that cannot be read or lacks the `[credentials]` section is.
    pub fn open(config: StoreConfig) -> Result<Self> {
        let mut store = Self {
            config,
            credentials: BTreeMap::new(),
        };
        if store.file_exists() {
            store.parse()?;
        } else {
            debug!(path = %store.path().display(), "credentials file not present");
        }
        Ok(store)
    }

    /// Open the file at `path` with the default template keys.
    pub fn at(path: impl AsRef<Path>) -> Result<Self> {
        Self::open(StoreConfig::at(path.as_ref()))
    }

    pub fn path(&self) -> &Path {
        &self.config.path
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn file_exists(&self) -> bool {
        self.config.path.is_file()
    }

    pub fn len(&self) -> usize {
        self.credentials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.credentials.is_empty()
    }

    /// (Re)load the mapping from disk.
    ///
    /// On failure the current mapping is left untouched. If the file is missing
    /// and `scaffold_on_missing` is set, a blank template is written first; the
    /// call still fails with `NotFound` so the caller knows it must be filled in.
    pub fn parse(&mut self) -> Result<()> {
        let path = self.config.path.clone();
        if !self.file_exists() {
            if self.config.scaffold_on_missing {
                error!(
                    path = %path.display(),
                    "credentials file does not exist, creating a blank one; fill in all fields"
                );
                if let Err(e) = self.create_empty() {
                    warn!(path = %path.display(), error = %e, "could not create blank credentials file");
                }
            } else {
                info!(path = %path.display(), "credentials file does not exist");
            }
            return Err(CredentialsError::NotFound { path });
        }

        let text = fs::read_to_string(&path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => CredentialsError::NotFound { path: path.clone() },
            io::ErrorKind::InvalidData => CredentialsError::InvalidFormat {
                path: path.clone(),
                reason: "file is not valid UTF-8".to_string(),
            },
            _ => CredentialsError::io(&path, e),
        })?;

        let doc = ini::parse_document(&text).map_err(|e| {
            error!(
                path = %path.display(),
                error = %e,
                "header info missing, add a [{}] section to the file",
                constants::CREDENTIALS_SECTION
            );
            CredentialsError::InvalidFormat {
                path: path.clone(),
                reason: e.to_string(),
            }
        })?;

        let section = doc.section(constants::CREDENTIALS_SECTION).ok_or_else(|| {
            error!(path = %path.display(), "no [{}] section in file", constants::CREDENTIALS_SECTION);
            CredentialsError::InvalidFormat {
                path: path.clone(),
                reason: format!("missing [{}] section", constants::CREDENTIALS_SECTION),
            }
        })?;

        info!(path = %path.display(), entries = section.len(), "loaded credentials");
        self.credentials = section;
        Ok(())
    }

    /// Value for `name`, or `None` if the file does not define it.
    /// Names are matched case-insensitively, like the keys in the file.
    pub fn get_credential(&self, name: &str) -> Option<&str> {
        self.credentials
            .get(name)
            .or_else(|| self.credentials.get(&name.to_lowercase()))
            .map(String::as_str)
    }

    pub fn get_all(&self) -> &BTreeMap<String, String> {
        &self.credentials
    }

    /// Write a blank template: the `[credentials]` header and every template
    /// key with an empty value. Never overwrites an existing file.
    pub fn create_empty(&self) -> Result<()> {
        let path = &self.config.path;
        if path.exists() {
            return Err(CredentialsError::AlreadyExists { path: path.clone() });
        }

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| CredentialsError::io(parent, e))?;
        }

        let content = ini::write_section(
            constants::CREDENTIALS_SECTION,
            self.config.template_keys.iter().map(|k| (k.as_str(), "")),
        );

        let mut options = OpenOptions::new();
        options.write(true).create_new(true);
        #[cfg(unix)]
        options.mode(constants::CRED_FILE_MODE);
        let mut file = options
            .open(path)
            .map_err(|e| match e.kind() {
                io::ErrorKind::AlreadyExists => CredentialsError::AlreadyExists { path: path.clone() },
                _ => CredentialsError::io(path, e),
            })?;
        file.write_all(content.as_bytes())
            .and_then(|_| file.flush())
            .map_err(|e| CredentialsError::io(path, e))?;
        drop(file);

        cred_fs::set_permissions(path, constants::CRED_FILE_MODE)?;
        info!(
            path = %path.display(),
            keys = self.config.template_keys.len(),
            "created blank credentials file"
        );
        Ok(())
    }

    /// Template keys the loaded file does not define.
    pub fn missing_keys(&self) -> Vec<&str> {
        self.config
            .template_keys
            .iter()
            .filter(|k| !self.credentials.contains_key(k.as_str()))
            .map(String::as_str)
            .collect()
    }

    /// Template keys the loaded file defines with an empty value.
    pub fn unfilled_keys(&self) -> Vec<&str> {
        self.config
            .template_keys
            .iter()
            .filter(|k| {
                self.credentials
                    .get(k.as_str())
                    .is_some_and(|v| v.trim().is_empty())
            })
            .map(String::as_str)
            .collect()
    }
}
