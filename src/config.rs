// Configuration module for placeform
// This module handles loading and parsing configuration from ~/.config/placeform/config.toml

mod types;

pub use types::{Config, EmailConfig, GeocoderConfig};

use std::fs;
use std::path::{Path, PathBuf};

/// Result of loading configuration
pub struct ConfigResult {
    pub config: Config,
    pub warning: Option<String>,
}

/// Loads configuration from ~/.config/placeform/config.toml
/// Returns default configuration if file doesn't exist or on parse errors
pub fn load_config() -> ConfigResult {
    load_config_from(&get_config_path())
}

/// Loads configuration from an explicit path, falling back to defaults
pub fn load_config_from(config_path: &Path) -> ConfigResult {
    log::debug!("Loading config from {:?}", config_path);

    // If file doesn't exist, return defaults silently
    if !config_path.exists() {
        log::debug!("Config file does not exist, using defaults");
        return ConfigResult {
            config: Config::default(),
            warning: None,
        };
    }

    let contents = match fs::read_to_string(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            log::error!("Failed to read config file {:?}: {}", config_path, e);
            return ConfigResult {
                config: Config::default(),
                warning: Some(format!("Failed to read config: {}", e)),
            };
        }
    };

    match toml::from_str::<Config>(&contents) {
        Ok(config) => {
            log::debug!("Config parsed successfully: {:?}", config.geocoder.endpoint);
            ConfigResult {
                config,
                warning: None,
            }
        }
        Err(e) => {
            log::error!("Failed to parse config file {:?}: {}", config_path, e);
            ConfigResult {
                config: Config::default(),
                warning: Some(format!("Invalid config: {}", e)),
            }
        }
    }
}

/// Returns the path to the configuration file
///
/// Always uses ~/.config/placeform/config.toml on all platforms for consistency.
fn get_config_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("placeform")
        .join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_missing_file_uses_defaults_without_warning() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_config_from(&dir.path().join("config.toml"));

        assert!(result.warning.is_none());
        assert_eq!(result.config.geocoder.limit, 15);
    }

    #[test]
    fn test_valid_file_is_loaded() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[geocoder]
endpoint = "http://localhost:9000/search/"
limit = 5
"#
        )
        .unwrap();

        let result = load_config_from(file.path());

        assert!(result.warning.is_none());
        assert_eq!(result.config.geocoder.endpoint, "http://localhost:9000/search/");
        assert_eq!(result.config.geocoder.limit, 5);
        assert_eq!(result.config.geocoder.bias_latitude, 45.76);
    }

    #[test]
    fn test_invalid_file_falls_back_with_warning() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[geocoder\nlimit = ").unwrap();

        let result = load_config_from(file.path());

        let warning = result.warning.expect("invalid config should warn");
        assert!(warning.starts_with("Invalid config:"));
        assert_eq!(result.config.geocoder.limit, 15);
    }

    #[test]
    fn test_wrong_type_falls_back_with_warning() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[email]\nmin_chars = \"three\"").unwrap();

        let result = load_config_from(file.path());

        assert!(result.warning.is_some());
        assert_eq!(result.config.email.min_chars, 3);
    }
}
