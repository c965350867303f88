//! # Configuration
//!
//! Settings come from three layers, highest precedence first:
//!
//! 1. command-line flags
//! 2. the `AMBER_DATA_DIR` environment variable (data directory only)
//! 3. the TOML file (`amber.toml` in the working directory, or `--config`)
//!
//! Anything left unset falls back to the built-in defaults.
//!
//! ```toml
//! data_dir = "dumps/amber"
//! language = "en"
//! default_level = 90
//! default_tier = 6
//! ```

use amber_core::AmberError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "amber.toml";

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "AMBER_DATA_DIR";

/// Maximum config file size (1 MB).
const MAX_CONFIG_FILE_SIZE: u64 = 1024 * 1024;

// =============================================================================
// CONFIG
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AmberConfig {
    /// Root of the feed dump.
    pub data_dir: PathBuf,
    /// Language segment of localized paths, e.g. `en`.
    pub language: String,
    /// Level used when a stat command is given no `--level`.
    pub default_level: usize,
    /// Tier used when a stat command is given no `--tier`.
    ///
    /// When unset, the lowest tier whose level cap admits the level is used.
    pub default_tier: Option<usize>,
}

impl Default for AmberConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("amber-data"),
            language: "en".to_string(),
            default_level: 1,
            default_tier: None,
        }
    }
}

/// Values supplied on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub data_dir: Option<PathBuf>,
    pub language: Option<String>,
}

impl AmberConfig {
    /// Parse a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, AmberError> {
        toml::from_str(content)
            .map_err(|e| AmberError::InvalidRecord(format!("Failed to parse config TOML: {}", e)))
    }

    /// Load a config file.
    pub fn load(path: &Path) -> Result<Self, AmberError> {
        let metadata = std::fs::metadata(path).map_err(|e| {
            AmberError::IoError(format!("Cannot read config '{}': {}", path.display(), e))
        })?;
        if metadata.len() > MAX_CONFIG_FILE_SIZE {
            return Err(AmberError::IoError(format!(
                "Config '{}' is {} bytes, maximum is {}",
                path.display(),
                metadata.len(),
                MAX_CONFIG_FILE_SIZE
            )));
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            AmberError::IoError(format!("Cannot read config '{}': {}", path.display(), e))
        })?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    /// Load the file layer.
    ///
    /// An explicit path must exist. Without one, `amber.toml` in the working
    /// directory is used if present, otherwise the defaults.
    pub fn load_file_layer(explicit: Option<&Path>) -> Result<Self, AmberError> {
        match explicit {
            Some(path) => Self::load(path),
            None => {
                let fallback = Path::new(DEFAULT_CONFIG_FILE);
                if fallback.is_file() {
                    Self::load(fallback)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Apply the environment and command-line layers on top of `self`.
    #[must_use]
    pub fn with_overrides(mut self, env_data_dir: Option<PathBuf>, overrides: Overrides) -> Self {
        if let Some(dir) = env_data_dir {
            self.data_dir = dir;
        }
        if let Some(dir) = overrides.data_dir {
            self.data_dir = dir;
        }
        if let Some(language) = overrides.language {
            self.language = language;
        }
        self
    }

    /// Resolve the effective configuration from every layer.
    pub fn resolve(explicit: Option<&Path>, overrides: Overrides) -> Result<Self, AmberError> {
        let env_data_dir = std::env::var_os(DATA_DIR_ENV)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from);
        Ok(Self::load_file_layer(explicit)?.with_overrides(env_data_dir, overrides))
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config = AmberConfig::from_toml_str("").expect("parse");
        assert_eq!(config, AmberConfig::default());
    }

    #[test]
    fn partial_document_keeps_other_defaults() {
        let config = AmberConfig::from_toml_str("language = \"jp\"\ndefault_level = 90")
            .expect("parse");
        assert_eq!(config.language, "jp");
        assert_eq!(config.default_level, 90);
        assert_eq!(config.data_dir, PathBuf::from("amber-data"));
        assert_eq!(config.default_tier, None);
    }

    #[test]
    fn unknown_key_rejected() {
        let result = AmberConfig::from_toml_str("lang = \"en\"");
        assert!(matches!(result, Err(AmberError::InvalidRecord(_))));
    }

    #[test]
    fn cli_beats_env_beats_file() {
        let file = AmberConfig::from_toml_str("data_dir = \"from-file\"").expect("parse");

        let env_only = file
            .clone()
            .with_overrides(Some(PathBuf::from("from-env")), Overrides::default());
        assert_eq!(env_only.data_dir, PathBuf::from("from-env"));

        let all = file.with_overrides(
            Some(PathBuf::from("from-env")),
            Overrides {
                data_dir: Some(PathBuf::from("from-cli")),
                language: Some("kr".to_string()),
            },
        );
        assert_eq!(all.data_dir, PathBuf::from("from-cli"));
        assert_eq!(all.language, "kr");
    }
}
