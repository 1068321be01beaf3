//! Generation settings.
//!
//! Settings come from three layers, lowest precedence first: the built-in
//! [`Variant`] defaults, an optional `paramgen.toml` file, and explicit
//! overrides (usually CLI flags). Relative paths are resolved against a base
//! directory: the directory holding the config file, or the caller's choice.

use crate::error::{ParamgenError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Descriptor location, relative to the quoter module.
pub const DEFAULT_DESCRIPTOR: &str =
    "../ballerina-treegen/src/main/resources/syntax_tree_descriptor.json";
pub const MAIN_RESOURCE_OUTPUT: &str = "src/main/resources/parameter-names.json";
pub const TEST_RESOURCE_OUTPUT: &str = "src/test/resources/parameter-names.json";

/// JSON layout of generated files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    #[default]
    Compact,
    Pretty,
}

/// Named sets of output destinations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Variant {
    /// Main resources only
    #[default]
    Main,
    /// Main and test resources, with identical content
    MainAndTest,
}

impl Variant {
    pub fn outputs(self) -> &'static [&'static str] {
        match self {
            Variant::Main => &[MAIN_RESOURCE_OUTPUT],
            Variant::MainAndTest => &[MAIN_RESOURCE_OUTPUT, TEST_RESOURCE_OUTPUT],
        }
    }
}

/// Fully resolved input to [`generate`](crate::generate).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateConfig {
    pub descriptor: PathBuf,
    pub outputs: Vec<PathBuf>,
    pub format: OutputFormat,
}

impl GenerateConfig {
    pub fn new(descriptor: impl Into<PathBuf>, outputs: Vec<PathBuf>) -> Self {
        Self {
            descriptor: descriptor.into(),
            outputs,
            format: OutputFormat::default(),
        }
    }

    /// Default paths of a variant, resolved against `base_dir`.
    pub fn for_variant(variant: Variant, base_dir: &Path) -> Self {
        Self::new(
            base_dir.join(DEFAULT_DESCRIPTOR),
            variant.outputs().iter().map(|out| base_dir.join(out)).collect(),
        )
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.outputs.is_empty() {
            return Err(ParamgenError::Config("at least one output path is required".into()));
        }
        Ok(())
    }
}

/// Contents of a `paramgen.toml` file. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub descriptor: Option<PathBuf>,
    pub outputs: Option<Vec<PathBuf>>,
    pub format: Option<OutputFormat>,
    pub variant: Option<Variant>,
}

impl ConfigFile {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|err| ParamgenError::read(path, err))?;
        toml::from_str(&contents).map_err(|source| ParamgenError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Layered settings, resolved into a [`GenerateConfig`] by [`resolve`](Self::resolve).
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub base_dir: Option<PathBuf>,
    pub variant: Option<Variant>,
    pub descriptor: Option<PathBuf>,
    pub outputs: Vec<PathBuf>,
    pub format: Option<OutputFormat>,
}

impl Settings {
    /// Start from a config file; its directory becomes the base directory.
    pub fn from_config_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = ConfigFile::from_file(path)?;
        let base_dir = path
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        Ok(Self {
            base_dir: Some(base_dir),
            variant: file.variant,
            descriptor: file.descriptor,
            outputs: file.outputs.unwrap_or_default(),
            format: file.format,
        })
    }

    /// Apply `overrides` on top of `self`; any value set in `overrides` wins.
    pub fn merge(self, overrides: Settings) -> Settings {
        Settings {
            base_dir: overrides.base_dir.or(self.base_dir),
            variant: overrides.variant.or(self.variant),
            descriptor: overrides.descriptor.or(self.descriptor),
            outputs: if overrides.outputs.is_empty() {
                self.outputs
            } else {
                overrides.outputs
            },
            format: overrides.format.or(self.format),
        }
    }

    pub fn resolve(self) -> Result<GenerateConfig> {
        let base_dir = self.base_dir.unwrap_or_else(|| PathBuf::from("."));
        let defaults = GenerateConfig::for_variant(self.variant.unwrap_or_default(), &base_dir);

        let descriptor = self
            .descriptor
            .map(|path| base_dir.join(path))
            .unwrap_or(defaults.descriptor);
        let outputs = if self.outputs.is_empty() {
            defaults.outputs
        } else {
            self.outputs.into_iter().map(|path| base_dir.join(path)).collect()
        };

        let config = GenerateConfig::new(descriptor, outputs)
            .with_format(self.format.unwrap_or_default());
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_outputs() {
        assert_eq!(Variant::Main.outputs(), [MAIN_RESOURCE_OUTPUT]);
        assert_eq!(
            Variant::MainAndTest.outputs(),
            [MAIN_RESOURCE_OUTPUT, TEST_RESOURCE_OUTPUT]
        );
    }

    #[test]
    fn test_default_settings_resolve_to_main_variant() {
        let config = Settings::default().resolve().unwrap();
        assert_eq!(config.descriptor, Path::new(".").join(DEFAULT_DESCRIPTOR));
        assert_eq!(config.outputs, vec![Path::new(".").join(MAIN_RESOURCE_OUTPUT)]);
        assert_eq!(config.format, OutputFormat::Compact);
    }

    #[test]
    fn test_overrides_win() {
        let file = Settings {
            base_dir: Some(PathBuf::from("quoter")),
            variant: Some(Variant::MainAndTest),
            descriptor: Some(PathBuf::from("file.json")),
            outputs: vec![PathBuf::from("a.json")],
            format: Some(OutputFormat::Pretty),
        };
        let flags = Settings {
            descriptor: Some(PathBuf::from("flag.json")),
            ..Settings::default()
        };
        let config = file.merge(flags).resolve().unwrap();
        assert_eq!(config.descriptor, PathBuf::from("quoter/flag.json"));
        assert_eq!(config.outputs, vec![PathBuf::from("quoter/a.json")]);
        assert_eq!(config.format, OutputFormat::Pretty);
    }

    #[test]
    fn test_absolute_paths_ignore_base_dir() {
        let settings = Settings {
            base_dir: Some(PathBuf::from("quoter")),
            descriptor: Some(PathBuf::from("/abs/descriptor.json")),
            ..Settings::default()
        };
        let config = settings.resolve().unwrap();
        assert_eq!(config.descriptor, PathBuf::from("/abs/descriptor.json"));
    }

    #[test]
    fn test_empty_outputs_rejected() {
        let config = GenerateConfig::new("descriptor.json", vec![]);
        assert!(matches!(config.validate(), Err(ParamgenError::Config(_))));
    }

    #[test]
    fn test_config_file_parse() {
        let file: ConfigFile = toml::from_str(
            r#"
            descriptor = "descriptor.json"
            variant = "main-and-test"
            format = "pretty"
            "#,
        )
        .unwrap();
        assert_eq!(file.variant, Some(Variant::MainAndTest));
        assert_eq!(file.format, Some(OutputFormat::Pretty));
        assert!(file.outputs.is_none());
    }

    #[test]
    fn test_config_file_unknown_key_rejected() {
        assert!(toml::from_str::<ConfigFile>("output = \"x.json\"").is_err());
    }
}
