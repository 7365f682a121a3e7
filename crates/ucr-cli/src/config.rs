//! Configuration for the `ucr` command.
//!
//! Supports loading configuration from:
//! 1. A YAML file (`--config` or `UCR_CONFIG`)
//! 2. Environment variables (with UCR_ prefix)
//!
//! Configuration precedence (highest to lowest):
//! 1. Command-line flags
//! 2. Environment variables
//! 3. Configuration file
//! 4. Default values

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Complete CLI configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Preset name, generated family (`linear:N`) or topology file path
    #[serde(default = "default_topology")]
    pub topology: String,

    /// Target selector: "closed-form", "exhaustive" or "bfs"
    #[serde(default = "default_estimator")]
    pub estimator: String,

    /// Rotation axis: "rx", "ry" or "rz"
    #[serde(default = "default_rotation")]
    pub rotation: String,

    /// Emit barriers between rotation and ladder blocks
    #[serde(default)]
    pub barriers: bool,

    /// Log level: "trace", "debug", "info", "warn", "error"
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Largest topology the exhaustive estimator may walk
    #[serde(default = "default_max_exhaustive_qubits")]
    pub max_exhaustive_qubits: usize,

    /// Largest topology `synth` will build a full UCR for (`2^(n-1)` angles)
    #[serde(default = "default_max_synth_qubits")]
    pub max_synth_qubits: usize,
}

fn default_topology() -> String {
    "r5.11l".to_string()
}

fn default_estimator() -> String {
    "closed-form".to_string()
}

fn default_rotation() -> String {
    "ry".to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_max_exhaustive_qubits() -> usize {
    20
}

fn default_max_synth_qubits() -> usize {
    20
}

impl Default for Config {
    fn default() -> Self {
        Config {
            topology: default_topology(),
            estimator: default_estimator(),
            rotation: default_rotation(),
            barriers: false,
            log_level: default_log_level(),
            max_exhaustive_qubits: default_max_exhaustive_qubits(),
            max_synth_qubits: default_max_synth_qubits(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::IoError(format!("{}: {e}", path.display())))?;

        let config: Config = serde_yaml_ng::from_str(&contents)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration with the following precedence:
    /// 1. Load from file if provided
    /// 2. Apply environment variable overrides
    pub fn load(config_file: Option<&str>) -> Result<Self, ConfigError> {
        let config = if let Some(path) = config_file {
            Self::from_file(path)?
        } else {
            Config::default()
        };

        let config = config.merge_env(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Merge environment overrides into this configuration.
    ///
    /// `lookup` resolves a variable name; absent variables leave the field
    /// unchanged.
    pub fn merge_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(v) = lookup("UCR_TOPOLOGY") {
            self.topology = v;
        }
        if let Some(v) = lookup("UCR_ESTIMATOR") {
            self.estimator = v;
        }
        if let Some(v) = lookup("UCR_ROTATION") {
            self.rotation = v;
        }
        if let Some(v) = lookup("UCR_LOG_LEVEL") {
            self.log_level = v;
        }
        self
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.topology.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "topology must not be empty".to_string(),
            ));
        }

        match self.estimator.as_str() {
            "closed-form" | "exhaustive" | "bfs" => {}
            other => {
                return Err(ConfigError::ValidationError(format!(
                    "Unknown estimator: {other}"
                )));
            }
        }

        match self.rotation.as_str() {
            "rx" | "ry" | "rz" => {}
            other => {
                return Err(ConfigError::ValidationError(format!(
                    "Unknown rotation: {other}"
                )));
            }
        }

        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            other => {
                return Err(ConfigError::ValidationError(format!(
                    "Invalid log level: {other}"
                )));
            }
        }

        if self.max_exhaustive_qubits == 0 {
            return Err(ConfigError::ValidationError(
                "max_exhaustive_qubits must be greater than 0".to_string(),
            ));
        }

        if self.max_synth_qubits < 2 {
            return Err(ConfigError::ValidationError(
                "max_synth_qubits must be at least 2".to_string(),
            ));
        }

        Ok(())
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.estimator, "closed-form");
        assert_eq!(config.max_exhaustive_qubits, 20);
        assert_eq!(config.max_synth_qubits, 20);
    }

    #[test]
    fn test_from_file_partial() {
        let file = write_config("topology: r4p\nbarriers: true\n");
        let config = Config::from_file(file.path()).unwrap();

        assert_eq!(config.topology, "r4p");
        assert!(config.barriers);
        assert_eq!(config.rotation, "ry");
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn test_from_file_rejects_unknown_estimator() {
        let file = write_config("estimator: annealing\n");
        let err = Config::from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
        assert!(err.to_string().contains("annealing"));
    }

    #[test]
    fn test_from_file_rejects_unknown_key() {
        let file = write_config("topolgy: r4p\n");
        let err = Config::from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_from_file_missing() {
        let err = Config::from_file("/nonexistent/ucr.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::IoError(_)));
    }

    #[test]
    fn test_zero_exhaustive_guard_rejected() {
        let config = Config {
            max_exhaustive_qubits: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_synth_guard_from_file() {
        let file = write_config("max_synth_qubits: 12\n");
        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.max_synth_qubits, 12);

        let file = write_config("max_synth_qubits: 1\n");
        let err = Config::from_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("max_synth_qubits"));
    }

    #[test]
    fn test_env_overrides_file_values() {
        let file = write_config("topology: r4p\nrotation: rz\n");
        let config = Config::from_file(file.path()).unwrap();

        let env: HashMap<&str, &str> =
            HashMap::from([("UCR_TOPOLOGY", "r5.11h"), ("UCR_ESTIMATOR", "bfs")]);
        let merged = config.merge_env(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(merged.topology, "r5.11h");
        assert_eq!(merged.estimator, "bfs");
        assert_eq!(merged.rotation, "rz");
    }

    #[test]
    fn test_invalid_log_level_from_env() {
        let config = Config::default().merge_env(|key| {
            (key == "UCR_LOG_LEVEL").then(|| "loud".to_string())
        });
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("Invalid log level"));
    }
}
