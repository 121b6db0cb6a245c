//! YAML configuration for the static environment.
//!
//! # Example YAML
//!
//! ```yaml
//! version: "1.0"
//! generators:
//!   - name: TerrainControl
//!   - name: CleanroomGenerator
//!     ids: [flat, void]
//! ```

use std::collections::HashSet;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::environment::StaticEnvironment;
use crate::error::{ConfigError, Result};

/// A content generator known to the environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Generator name as used in `--gen name[:id]`.
    pub name: String,
    /// Accepted generator ids. Empty accepts any id.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ids: Vec<String>,
}

/// Environment configuration file.
///
/// # Examples
///
/// ```
/// use command_flags_world::EnvironmentConfig;
///
/// let config = EnvironmentConfig::from_yaml_str(r#"
/// version: "1.0"
/// generators:
///   - name: CleanroomGenerator
///     ids: [flat]
/// "#).unwrap();
/// assert_eq!(config.generators.len(), 1);
/// assert_eq!(config.generators[0].ids, vec!["flat"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentConfig {
    /// Configuration format version (e.g., `"1.0"`).
    pub version: String,
    /// Available content generators.
    #[serde(default)]
    pub generators: Vec<GeneratorConfig>,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            generators: Vec::new(),
        }
    }
}

impl EnvironmentConfig {
    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::IoError`] if the file cannot be read,
    /// [`ConfigError::YamlError`] if parsing fails, or
    /// [`ConfigError::InvalidConfig`] if the content is invalid.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let reader = BufReader::new(file);
        let config: Self = serde_yaml::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    /// Parses configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Same as [`load`](Self::load), minus I/O.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Saves the configuration as YAML.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::IoError`] if the file cannot be written, or
    /// [`ConfigError::YamlError`] if serialization fails.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = BufWriter::new(file);
        serde_yaml::to_writer(writer, self)?;
        Ok(())
    }

    /// Checks generator entries.
    ///
    /// Names must be non-empty, unique (case-insensitive) and free of `:`,
    /// which separates the name from the id on the command line.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidConfig`] describing the first problem.
    pub fn validate(&self) -> Result<()> {
        if self.version.trim().is_empty() {
            return Err(ConfigError::InvalidConfig("version cannot be empty".to_string()));
        }

        let mut seen = HashSet::new();
        for generator in &self.generators {
            let name = generator.name.trim();
            if name.is_empty() {
                return Err(ConfigError::InvalidConfig(
                    "generator name cannot be empty".to_string(),
                ));
            }
            if name.contains(':') {
                return Err(ConfigError::InvalidConfig(format!(
                    "generator name cannot contain ':': {name}"
                )));
            }
            if !seen.insert(name.to_lowercase()) {
                return Err(ConfigError::InvalidConfig(format!(
                    "duplicate generator: {name}"
                )));
            }
        }

        Ok(())
    }

    /// Builds the environment described by this config.
    pub fn environment(&self) -> StaticEnvironment {
        StaticEnvironment::new(self.generators.clone())
    }
}

#[cfg(test)]
mod tests {
    use crate::environment::WorldEnvironment;

    use super::*;

    fn sample_yaml() -> &'static str {
        r#"
version: "1.0"
generators:
  - name: TerrainControl
  - name: CleanroomGenerator
    ids:
      - flat
      - void
"#
    }

    #[test]
    fn test_parse_sample() {
        let config = EnvironmentConfig::from_yaml_str(sample_yaml()).unwrap();
        assert_eq!(config.version, "1.0");
        assert_eq!(config.generators.len(), 2);
        assert!(config.generators[0].ids.is_empty());
        assert_eq!(config.generators[1].ids, vec!["flat", "void"]);
    }

    #[test]
    fn test_missing_generators_defaults_to_empty() {
        let config = EnvironmentConfig::from_yaml_str("version: \"1.0\"\n").unwrap();
        assert!(config.generators.is_empty());
    }

    #[test]
    fn test_rejects_duplicate_generator() {
        let yaml = r#"
version: "1.0"
generators:
  - name: Cleanroom
  - name: cleanroom
"#;
        let err = EnvironmentConfig::from_yaml_str(yaml).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidConfig(msg) if msg.contains("duplicate")));
    }

    #[test]
    fn test_rejects_colon_in_name() {
        let yaml = "version: \"1.0\"\ngenerators:\n  - name: \"a:b\"\n";
        let err = EnvironmentConfig::from_yaml_str(yaml).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidConfig(_)));
    }

    #[test]
    fn test_rejects_malformed_yaml() {
        let err = EnvironmentConfig::from_yaml_str("generators: [").unwrap_err();
        assert!(matches!(err, ConfigError::YamlError(_)));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("environment.yaml");

        let config = EnvironmentConfig::from_yaml_str(sample_yaml()).unwrap();
        config.save(&path).unwrap();
        let loaded = EnvironmentConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_environment_from_config() {
        let config = EnvironmentConfig::from_yaml_str(sample_yaml()).unwrap();
        let env = config.environment();
        assert!(env.has_generator("cleanroomgenerator", "flat").unwrap());
        assert!(!env.has_generator("cleanroomgenerator", "ocean").unwrap());
    }
}
