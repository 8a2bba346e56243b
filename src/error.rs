//! Error types returned by the credentials store.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CredentialsError {
    #[error("credentials file {} does not exist", path.display())]
    NotFound { path: PathBuf },

    #[error("credentials file {} is malformed: {reason}", path.display())]
    InvalidFormat { path: PathBuf, reason: String },

    #[error("credentials file {} already exists", path.display())]
    AlreadyExists { path: PathBuf },

    #[error("i/o error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid store configuration {}: {reason}", path.display())]
    Config { path: PathBuf, reason: String },
}

/// Coarse classification of a [`CredentialsError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    InvalidFormat,
    AlreadyExists,
    Io,
    Config,
}

impl CredentialsError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CredentialsError::NotFound { .. } => ErrorKind::NotFound,
            CredentialsError::InvalidFormat { .. } => ErrorKind::InvalidFormat,
            CredentialsError::AlreadyExists { .. } => ErrorKind::AlreadyExists,
            CredentialsError::Io { .. } => ErrorKind::Io,
            CredentialsError::Config { .. } => ErrorKind::Config,
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CredentialsError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, CredentialsError>;
