//! Reading and writing mk's YAML state files.
//!
//! Missing files are not errors: the configuration falls back to defaults and
//! the history starts empty. Parent directories are created on write.

use std::fs::{self, File};
use std::path::Path;

use log::debug;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::{Config, RawConfig};
use crate::error::{Error, Result};

fn get_reader(file_description: &str, path: &str) -> Result<Option<File>> {
    if !Path::new(path).exists() {
        return Ok(None);
    }

    match File::open(path) {
        Ok(reader) => Ok(Some(reader)),
        Err(e) => Err(Error::io_error(file_description, path, e)),
    }
}

fn get_writer(file_description: &str, path: &str) -> Result<File> {
    if let Some(parent) = Path::new(path).parent() {
        fs::create_dir_all(parent).map_err(|e| Error::io_error(file_description, path, e))?;
    }

    File::create(path).map_err(|e| Error::io_error(file_description, path, e))
}

/// Reads a YAML file, returning `None` if it does not exist.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be opened or parsed.
pub fn read_yaml<T: DeserializeOwned>(file_description: &str, path: &str) -> Result<Option<T>> {
    let Some(reader) = get_reader(file_description, path)? else {
        debug!("No {file_description} file at `{path}`");
        return Ok(None);
    };

    serde_yaml::from_reader(reader)
        .map(Some)
        .map_err(|e| Error::yaml_error("reading", file_description, path, e))
}

/// Serializes `value` as YAML to `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be created or serialization fails.
pub fn write_yaml<T: Serialize>(file_description: &str, path: &str, value: &T) -> Result<()> {
    let writer = get_writer(file_description, path)?;

    serde_yaml::to_writer(writer, value)
        .map_err(|e| Error::yaml_error("writing", file_description, path, e))
}

/// Reads the configuration, using defaults for a missing file or missing fields.
///
/// # Errors
///
/// Returns an error if the file exists but is unreadable or not valid YAML.
pub fn get_config(config_path: &str) -> Result<Config> {
    let raw: Option<RawConfig> = read_yaml("config", config_path)?;
    Ok(raw.map(Config::from).unwrap_or_default())
}

/// Whether a configuration file has been saved before.
pub fn config_exists(config_path: &str) -> bool {
    Path::new(config_path).is_file()
}

/// Saves the configuration.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_config(config_path: &str, config: &Config) -> Result<()> {
    write_yaml("config", config_path, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ColorScheme, KeyScheme};
    use crate::i18n::Language;
    use tempfile::tempdir;

    #[test]
    fn test_missing_config_uses_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yml").display().to_string();

        assert!(!config_exists(&path));
        assert_eq!(get_config(&path).unwrap(), Config::default());
    }

    #[test]
    fn test_config_round_trip_creates_parent_directory() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("mk").join("config.yml").display().to_string();

        let mut config = Config {
            language: Language::De,
            color_scheme: ColorScheme::Tritanopia,
            ..Config::default()
        };
        config
            .set_key_scheme(KeyScheme::Custom, Some('k'), Some('j'))
            .unwrap();

        write_config(&path, &config).unwrap();
        assert!(config_exists(&path));
        assert_eq!(get_config(&path).unwrap(), config);
    }

    #[test]
    fn test_partial_config_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yml");
        fs::write(&path, "key_scheme: wasd\n").unwrap();

        let config = get_config(&path.display().to_string()).unwrap();
        assert_eq!(config.key_scheme, KeyScheme::Wasd);
        assert_eq!(config.language, Language::En);
    }

    #[test]
    fn test_invalid_yaml_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yml");
        fs::write(&path, "key_scheme: [unclosed\n").unwrap();

        let result = get_config(&path.display().to_string());
        assert!(matches!(result, Err(Error::Yaml { .. })));
    }
}
