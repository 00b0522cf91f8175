//! Loading configuration files.
//!
//! Only YAML is supported. A file with an empty document loads as an empty
//! configuration.

use std::fs;
use std::path::Path;

use super::merger::merge_configs;
use super::node::Config;
use crate::error::{Result, VigilError};

/// Load a configuration file from disk.
///
/// # Errors
///
/// Returns `Io` if the file cannot be read, `ConfigParse` if it is not valid
/// YAML, and `ConfigTypeMismatch` if its top level is not a mapping.
pub fn load_config_file(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    parse_config(&content, path)
}

/// Parse configuration text, attributing errors to `path`.
///
/// # Errors
///
/// Same as [`load_config_file`] minus IO errors.
pub fn parse_config(content: &str, path: &Path) -> Result<Config> {
    let value: serde_yaml::Value =
        serde_yaml::from_str(content).map_err(|e| VigilError::ConfigParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
    tracing::debug!("Loaded config from {}", path.display());
    Config::from_value(value)
}

/// Load and merge several configuration files (later overrides earlier).
///
/// # Errors
///
/// Fails on the first file that cannot be loaded.
pub fn load_config_files(paths: &[&Path]) -> Result<Config> {
    let layers = paths
        .iter()
        .map(|path| load_config_file(path).map(|config| config.to_value()))
        .collect::<Result<Vec<_>>>()?;
    Config::from_value(merge_configs(&layers))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn loads_yaml_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("vigil.yml");
        fs::write(&path, "style:\n  active: false\n").unwrap();

        let config = load_config_file(&path).unwrap();
        let style = config.sub_config("style").unwrap();
        assert!(!style.value_or_default("active", true).unwrap());
    }

    #[test]
    fn empty_file_is_empty_config() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("vigil.yml");
        fs::write(&path, "").unwrap();

        assert!(load_config_file(&path).unwrap().is_empty());
    }

    #[test]
    fn missing_file_is_io_error() {
        let temp = TempDir::new().unwrap();
        let err = load_config_file(&temp.path().join("nope.yml")).unwrap_err();
        assert!(matches!(err, VigilError::Io(_)));
    }

    #[test]
    fn parse_error_carries_path() {
        let err = parse_config("a: [", Path::new("conf/vigil.yml")).unwrap_err();
        match err {
            VigilError::ConfigParse { path, .. } => assert_eq!(path, Path::new("conf/vigil.yml")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn later_files_override_earlier() {
        let temp = TempDir::new().unwrap();
        let base = temp.path().join("base.yml");
        let local = temp.path().join("local.yml");
        fs::write(&base, "build:\n  maxIssues: 5\n  excludeCorrectable: true\n").unwrap();
        fs::write(&local, "build:\n  maxIssues: 0\n").unwrap();

        let config = load_config_files(&[base.as_path(), local.as_path()]).unwrap();
        let build = config.sub_config("build").unwrap();
        assert_eq!(build.value_or_default("maxIssues", 99u32).unwrap(), 0);
        assert!(build.value_or_default("excludeCorrectable", false).unwrap());
    }

    #[test]
    fn later_files_can_remove_keys() {
        let temp = TempDir::new().unwrap();
        let base = temp.path().join("base.yml");
        let local = temp.path().join("local.yml");
        fs::write(&base, "style:\n  active: false\nbuild:\n  maxIssues: 5\n").unwrap();
        fs::write(&local, "style: ~\n").unwrap();

        let config = load_config_files(&[base.as_path(), local.as_path()]).unwrap();
        assert!(!config.contains("style"));
        assert!(config.contains("build"));
    }

    #[test]
    fn no_files_is_empty_config() {
        assert!(load_config_files(&[]).unwrap().is_empty());
    }
}
