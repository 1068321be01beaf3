//! Error types for descriptor loading and parameter map generation.

use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// What was being attempted when a file could not be accessed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileAction {
    Read,
    Write,
}

impl fmt::Display for FileAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileAction::Read => f.write_str("read"),
            FileAction::Write => f.write_str("write"),
        }
    }
}

/// Errors that can occur while generating or reading a parameter name map.
#[derive(Debug, Error)]
pub enum ParamgenError {
    #[error("cannot {action} {}: {source}", path.display())]
    FileAccess {
        path: PathBuf,
        action: FileAction,
        #[source]
        source: io::Error,
    },

    #[error("malformed input in {}: {source}", path.display())]
    MalformedInput {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize parameter names: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("invalid config file {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("unknown node: {0}")]
    UnknownNode(String),
}

impl ParamgenError {
    pub(crate) fn read(path: impl Into<PathBuf>, source: io::Error) -> Self {
        ParamgenError::FileAccess {
            path: path.into(),
            action: FileAction::Read,
            source,
        }
    }

    pub(crate) fn write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        ParamgenError::FileAccess {
            path: path.into(),
            action: FileAction::Write,
            source,
        }
    }

    pub(crate) fn malformed(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        ParamgenError::MalformedInput {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, ParamgenError>;
