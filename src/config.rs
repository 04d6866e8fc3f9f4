use std::{io, path::Path};

use serde::{Deserialize, Serialize};

use crate::Keying;

/// Configuration for the `records` command line tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Versions", into = "Versions")]
pub struct Config {
    /// The key convention used when re-emitting validated records.
    pub keying: Keying,

    /// Whether JSON output is pretty-printed.
    pub pretty: bool,

    /// Whether terminal output is colored.
    ///
    /// Color is only used when the terminal supports it, regardless of this
    /// setting.
    pub color: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            keying: Keying::default(),
            pretty: default_true(),
            color: default_true(),
        }
    }
}

impl Config {
    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let content = std::fs::read_to_string(path).map_err(Error::Read)?;
        toml::from_str(&content).map_err(Error::Parse)
    }

    /// Loads the configuration, falling back to defaults if the file does not
    /// exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_or_default(path: &Path) -> Result<Self, Error> {
        match Self::load(path) {
            Err(Error::Read(e)) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                Ok(Self::default())
            }
            result => result,
        }
    }

    /// Saves the configuration to a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized to TOML or if
    /// the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), Error> {
        let content = toml::to_string_pretty(self).map_err(Error::Serialize)?;
        std::fs::write(path, content).map_err(Error::Write)
    }
}

/// Errors that can occur when loading or saving configuration.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The config file could not be read.
    #[error("Failed to read config file: {0}")]
    Read(#[source] io::Error),

    /// The config file is not valid TOML, or does not match the schema.
    #[error("Failed to parse config file: {0}")]
    Parse(#[source] toml::de::Error),

    /// The configuration could not be serialized.
    #[error("Failed to serialize config: {0}")]
    Serialize(#[source] toml::ser::Error),

    /// The config file could not be written.
    #[error("Failed to write config file: {0}")]
    Write(#[source] io::Error),
}

const fn default_true() -> bool {
    true
}

/// The serialized versions of the configuration.
/// This allows for future changes to the configuration format and to the domain
/// type without breaking compatibility.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default)]
        keying: Keying,

        #[serde(default = "default_true")]
        pretty: bool,

        #[serde(default = "default_true")]
        color: bool,
    },
}

impl From<Versions> for Config {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 {
                keying,
                pretty,
                color,
            } => Self {
                keying,
                pretty,
                color,
            },
        }
    }
}

impl From<Config> for Versions {
    fn from(config: Config) -> Self {
        Self::V1 {
            keying: config.keying,
            pretty: config.pretty,
            color: config.color,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn load_reads_valid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"_version = \"1\"\nkeying = \"internal\"\npretty = false\n")
            .unwrap();

        let config = Config::load(file.path()).unwrap();

        assert_eq!(config.keying, Keying::Internal);
        assert!(!config.pretty);
        assert!(config.color);
    }

    #[test]
    fn load_missing_file_returns_error() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("missing.toml");

        let error = Config::load(&missing).unwrap_err();
        assert!(error.to_string().starts_with("Failed to read config file:"));
    }

    #[test]
    fn load_or_default_tolerates_missing_file() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("missing.toml");

        assert_eq!(Config::load_or_default(&missing).unwrap(), Config::default());
    }

    #[test]
    fn load_invalid_toml_returns_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"_version = \"1\"\nkeying = \"sideways\"\n")
            .unwrap();

        let error = Config::load(file.path()).unwrap_err();
        assert!(error.to_string().starts_with("Failed to parse config file:"));
    }

    #[test]
    fn save_then_load_preserves_settings() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("records.toml");
        let config = Config {
            keying: Keying::Internal,
            pretty: false,
            color: false,
        };

        config.save(&path).unwrap();

        assert_eq!(Config::load(&path).unwrap(), config);
    }

    #[test]
    fn empty_file_returns_default() {
        // Tests that deserialising an empty file returns the default configuration.
        let expected = Config::default();
        let actual: Config = toml::from_str(r#"_version = "1""#).unwrap();
        assert_eq!(actual, expected);
    }
}
