//! Parameter name generation for syntax tree quoting.
//!
//! The tree generator describes every syntax node kind in a JSON descriptor.
//! The quoter only needs each node's attribute names, in order, to label the
//! arguments of node factory calls. This crate turns the descriptor into that
//! smaller map and reads it back.
//!
//! # Formats
//!
//! Descriptor (input, extra fields ignored):
//! ```json
//! {"nodes": [
//!   {"name": "IfStatement", "attributes": [{"name": "condition"}, {"name": "body"}]},
//!   {"name": "Literal"}
//! ]}
//! ```
//!
//! Parameter name map (output):
//! ```json
//! {"IfStatement": ["condition", "body"], "Literal": []}
//! ```

pub mod config;
pub mod descriptor;
mod error;
mod generate;
mod param_names;

pub use config::{ConfigFile, GenerateConfig, OutputFormat, Settings, Variant};
pub use descriptor::{Attribute, Descriptor, Node};
pub use error::{FileAction, ParamgenError, Result};
pub use generate::{GenerateReport, build_map, generate, render, write_atomic};
pub use param_names::ParameterNameMap;
