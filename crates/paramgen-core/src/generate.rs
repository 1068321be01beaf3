//! Descriptor to parameter name map generation.

use crate::config::{GenerateConfig, OutputFormat};
use crate::descriptor::Descriptor;
use crate::error::{ParamgenError, Result};
use crate::param_names::ParameterNameMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// Outcome of a successful generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateReport {
    /// Number of distinct nodes written
    pub nodes: usize,
    /// Files written, in order
    pub written: Vec<PathBuf>,
}

/// Render a map in the requested layout.
pub fn render(map: &ParameterNameMap, format: OutputFormat) -> Result<String> {
    let rendered = match format {
        OutputFormat::Compact => map.to_json()?,
        OutputFormat::Pretty => map.to_json_pretty()?,
    };
    Ok(rendered)
}

/// Read the descriptor and build its parameter name map without writing anything.
pub fn build_map(descriptor_path: &Path) -> Result<ParameterNameMap> {
    let descriptor = Descriptor::from_file(descriptor_path)?;
    Ok(ParameterNameMap::from_descriptor(&descriptor))
}

/// Regenerate every configured output from the descriptor.
///
/// The descriptor is fully parsed before any output is touched. All outputs
/// receive the same bytes; each one is replaced atomically, in order, and
/// the first failure aborts the run.
pub fn generate(config: &GenerateConfig) -> Result<GenerateReport> {
    config.validate()?;

    let map = build_map(&config.descriptor)?;
    let rendered = render(&map, config.format)?;

    let mut written = Vec::with_capacity(config.outputs.len());
    for output in &config.outputs {
        write_atomic(output, rendered.as_bytes())?;
        info!("wrote {} nodes to {}", map.len(), output.display());
        written.push(output.clone());
    }

    Ok(GenerateReport {
        nodes: map.len(),
        written,
    })
}

/// Replace `path` with `contents`, never leaving a half-written file behind.
///
/// The parent directory must already exist. An existing file keeps its
/// permissions; a new one gets the same mode a plain create would.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    debug!("writing {} bytes to {}", contents.len(), path.display());

    let mut tmp = temp_file_in(dir).map_err(|err| ParamgenError::write(path, err))?;
    if let Ok(existing) = fs::metadata(path) {
        tmp.as_file()
            .set_permissions(existing.permissions())
            .map_err(|err| ParamgenError::write(path, err))?;
    }
    tmp.write_all(contents)
        .and_then(|_| tmp.flush())
        .map_err(|err| ParamgenError::write(path, err))?;
    tmp.persist(path)
        .map_err(|err| ParamgenError::write(path, err.error))?;
    Ok(())
}

fn temp_file_in(dir: &Path) -> io::Result<NamedTempFile> {
    let mut builder = tempfile::Builder::new();
    builder.prefix(".parameter-names");
    // rw-rw-rw- reduced by the process umask, as for any newly created file.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(0o666));
    }
    builder.tempfile_in(dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_pretty() {
        let mut map = ParameterNameMap::new();
        map.insert("Literal".into(), vec![]);
        map.insert("Unary".into(), vec!["operator".into(), "operand".into()]);

        let pretty = render(&map, OutputFormat::Pretty).unwrap();
        assert!(pretty.contains('\n'));
        let reparsed: ParameterNameMap = serde_json::from_str(&pretty).unwrap();
        assert_eq!(reparsed, map);
    }

    #[test]
    fn test_generate_requires_outputs() {
        let config = GenerateConfig::new("does-not-matter.json", vec![]);
        assert!(matches!(generate(&config), Err(ParamgenError::Config(_))));
    }

    #[test]
    fn test_write_atomic_missing_parent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.json");
        let err = write_atomic(&path, b"{}").unwrap_err();
        assert!(matches!(err, ParamgenError::FileAccess { .. }));
        assert!(!path.exists());
    }

    #[cfg(unix)]
    fn mode(path: &Path) -> u32 {
        use std::os::unix::fs::PermissionsExt;
        fs::metadata(path).unwrap().permissions().mode() & 0o777
    }

    #[cfg(unix)]
    #[test]
    fn test_write_atomic_keeps_existing_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        for expected in [0o644, 0o640] {
            let path = dir.path().join(format!("out-{:o}.json", expected));
            fs::write(&path, "{}").unwrap();
            fs::set_permissions(&path, fs::Permissions::from_mode(expected)).unwrap();

            write_atomic(&path, b"{\"Literal\":[]}").unwrap();
            assert_eq!(mode(&path), expected, "{}", path.display());
            assert_eq!(fs::read_to_string(&path).unwrap(), "{\"Literal\":[]}");
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_write_atomic_new_file_matches_plain_create() {
        let dir = tempfile::tempdir().unwrap();
        let plain = dir.path().join("plain.json");
        fs::write(&plain, "{}").unwrap();

        let generated = dir.path().join("generated.json");
        write_atomic(&generated, b"{}").unwrap();
        assert_eq!(mode(&generated), mode(&plain));
    }
}
