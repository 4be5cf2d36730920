use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum QuotaError {
    #[error("opendir({}) failed: {source}", path.display())]
    OpenDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("readdir({}) failed: {source}", path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("lstat({}) failed: {source}", path.display())]
    Stat {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid quota root arguments: {0}")]
    InvalidArgs(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl QuotaError {
    /// Path the failing filesystem call was made on, if any
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            QuotaError::OpenDir { path, .. }
            | QuotaError::ReadDir { path, .. }
            | QuotaError::Stat { path, .. } => Some(path),
            QuotaError::InvalidArgs(_) | QuotaError::Config(_) => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, QuotaError>;
