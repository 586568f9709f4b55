//! Engine configuration.
//!
//! Loads an optional TOML file that tunes parsing policy for an application.
//! Every field has a default, so a partial file or no file at all is valid.

use std::path::Path;

use serde::Deserialize;

/// Parsing policy shared by every command of an application.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Reject unknown option tokens unless a command says otherwise.
    pub fail_on_unrecognized: bool,
    /// Route `-h`/`--help` and `-v`/`--version` to the built-in commands.
    pub help_shortcuts: bool,
    /// Offer a "did you mean" hint for unknown commands.
    pub suggestions: bool,
    /// Largest edit distance a suggestion may have.
    pub suggestion_distance: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            fail_on_unrecognized: true,
            help_shortcuts: true,
            suggestions: true,
            suggestion_distance: 2,
        }
    }
}

impl EngineConfig {
    /// Parse configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load config from a specific path.
    /// Returns the default config if the file doesn't exist or is invalid.
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match Self::from_toml_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!("Failed to parse {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert!(config.fail_on_unrecognized);
        assert!(config.help_shortcuts);
        assert!(config.suggestions);
        assert_eq!(config.suggestion_distance, 2);
    }

    #[test]
    fn test_load_missing_file() {
        let temp = TempDir::new().expect("temp dir");
        let config = EngineConfig::load(&temp.path().join("argot.toml"));
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_load_partial_config() {
        let temp = TempDir::new().expect("temp dir");
        let config_path = temp.path().join("argot.toml");
        let mut file = std::fs::File::create(&config_path).expect("create config");
        writeln!(
            file,
            r#"
fail_on_unrecognized = false
suggestion_distance = 4
"#
        )
        .expect("write config");

        let config = EngineConfig::load(&config_path);
        assert!(!config.fail_on_unrecognized);
        assert_eq!(config.suggestion_distance, 4);
        assert!(config.help_shortcuts);
        assert!(config.suggestions);
    }

    #[test]
    fn test_load_invalid_config_falls_back() {
        let temp = TempDir::new().expect("temp dir");
        let config_path = temp.path().join("argot.toml");
        std::fs::write(&config_path, "this is not valid toml {{{{").expect("write config");

        let config = EngineConfig::load(&config_path);
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_from_toml_str_reports_errors() {
        assert!(EngineConfig::from_toml_str("help_shortcuts = \"yes\"").is_err());
        let config = EngineConfig::from_toml_str("suggestions = false").expect("valid toml");
        assert!(!config.suggestions);
    }
}
