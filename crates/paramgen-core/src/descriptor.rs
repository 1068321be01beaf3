//! Syntax tree descriptor records.
//!
//! The descriptor is produced by the tree generator and lists every syntax
//! node kind together with its attributes. Only the names are read here;
//! every other field (`base`, `kind`, `type`, `occurrences`, ...) is ignored.

use crate::error::{ParamgenError, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::debug;

/// A single named attribute of a node.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Attribute {
    pub name: String,
}

/// One syntax tree node kind.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Node {
    /// Node name (e.g., "IfElseStatementNode")
    pub name: String,
    /// Attributes in declaration order; absent means none
    #[serde(default)]
    pub attributes: Vec<Attribute>,
}

impl Node {
    /// Attribute names in declaration order.
    pub fn attribute_names(&self) -> impl Iterator<Item = &str> {
        self.attributes.iter().map(|attr| attr.name.as_str())
    }
}

/// Root of a syntax tree descriptor document.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Descriptor {
    pub nodes: Vec<Node>,
}

impl Descriptor {
    /// Load and validate a descriptor from a JSON file.
    ///
    /// Parse failures become [`ParamgenError::MalformedInput`] carrying `path`.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!("reading descriptor {}", path.display());
        let contents = fs::read_to_string(path).map_err(|err| ParamgenError::read(path, err))?;
        serde_json::from_str(&contents).map_err(|err| ParamgenError::malformed(path, err))
    }

    /// Parse a descriptor from an in-memory JSON string.
    ///
    /// There is no path to report here, so the [`serde_json::Error`] is
    /// returned as is; it names the missing field and its line and column.
    pub fn from_json(json: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
