//! Parameter name map: node name to ordered attribute names.
//!
//! The map keeps node names in the order they were first inserted, both in
//! memory and when serialized, so generated files follow descriptor order.

use crate::descriptor::Descriptor;
use crate::error::{ParamgenError, Result};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, warn};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterNameMap {
    entries: Vec<(String, Vec<String>)>,
    index: HashMap<String, usize>,
}

impl ParameterNameMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the map from every node in a descriptor.
    ///
    /// A node name that appears more than once keeps its first position but
    /// takes the attributes of its last occurrence.
    pub fn from_descriptor(descriptor: &Descriptor) -> Self {
        let mut map = Self::new();
        for node in &descriptor.nodes {
            let names = node.attribute_names().map(str::to_string).collect();
            if map.insert(node.name.clone(), names).is_some() {
                warn!("duplicate node {} in descriptor; keeping the last definition", node.name);
            }
        }
        map
    }

    /// Load a previously generated map from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!("reading parameter names {}", path.display());
        let contents = fs::read_to_string(path).map_err(|err| ParamgenError::read(path, err))?;
        contents.parse::<Self>().map_err(|err| ParamgenError::malformed(path, err))
    }

    /// Insert or replace a node's parameter names, returning the previous ones.
    pub fn insert(&mut self, node: String, names: Vec<String>) -> Option<Vec<String>> {
        match self.index.get(&node) {
            Some(&idx) => Some(std::mem::replace(&mut self.entries[idx].1, names)),
            None => {
                self.index.insert(node.clone(), self.entries.len());
                self.entries.push((node, names));
                None
            }
        }
    }

    /// Parameter names of a node, if the node is known.
    pub fn get(&self, node: &str) -> Option<&[String]> {
        self.index
            .get(node)
            .map(|&idx| self.entries[idx].1.as_slice())
    }

    /// Like [`get`](Self::get), but an unknown node is an error.
    pub fn require(&self, node: &str) -> Result<&[String]> {
        self.get(node)
            .ok_or_else(|| ParamgenError::UnknownNode(node.to_string()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(node, names)| (node.as_str(), names.as_slice()))
    }

    pub fn node_names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(node, _)| node.as_str())
    }

    /// Serialize to compact JSON.
    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serialize to indented JSON.
    pub fn to_json_pretty(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Parse a generated map held in memory.
///
/// Fails with the bare [`serde_json::Error`]; [`ParameterNameMap::from_file`]
/// wraps it as [`ParamgenError::MalformedInput`] together with the path.
impl FromStr for ParameterNameMap {
    type Err = serde_json::Error;

    fn from_str(json: &str) -> std::result::Result<Self, Self::Err> {
        serde_json::from_str(json)
    }
}

impl Serialize for ParameterNameMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (node, names) in &self.entries {
            map.serialize_entry(node, names)?;
        }
        map.end()
    }
}

struct ParameterNameMapVisitor;

impl<'de> Visitor<'de> for ParameterNameMapVisitor {
    type Value = ParameterNameMap;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map of node names to lists of parameter names")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<Self::Value, A::Error> {
        let mut map = ParameterNameMap::new();
        while let Some((node, names)) = access.next_entry::<String, Vec<String>>()? {
            map.insert(node, names);
        }
        Ok(map)
    }
}

impl<'de> Deserialize<'de> for ParameterNameMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(ParameterNameMapVisitor)
    }
}
