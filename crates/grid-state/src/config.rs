//! View-state settings.
//!
//! Loaded from a TOML file in the user's config directory. Missing or
//! unparsable files fall back to defaults; the table keeps working either way.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::debounce::DebounceConfig;
use crate::error::{Result, ViewStateError};
use crate::store::TABLE_KEY_PREFIX;

const APP_QUALIFIER: &str = "com";
const APP_ORG: &str = "grid-state";
const APP_NAME: &str = "Grid State";
const CONFIG_FILENAME: &str = "settings.toml";

/// Rows per page when the caller does not choose.
pub const DEFAULT_PAGE_SIZE: usize = 25;

/// Page sizes offered by the pagination control.
pub const ROWS_PER_PAGE_OPTIONS: [usize; 4] = [10, 25, 50, 100];

/// Settings for persisted table view state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewStateConfig {
    /// Prefix of every table's storage key.
    pub key_prefix: String,

    /// Page size merged under the caller's defaults.
    pub default_page_size: usize,

    /// Whether tables get the leading row-selection column.
    pub selection_column: bool,

    /// Directory of the JSON file store. Defaults to the platform data dir.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_dir: Option<PathBuf>,

    /// Debounce settings for state writes.
    pub debounce: DebounceConfig,
}

impl Default for ViewStateConfig {
    fn default() -> Self {
        Self {
            key_prefix: TABLE_KEY_PREFIX.to_string(),
            default_page_size: DEFAULT_PAGE_SIZE,
            selection_column: true,
            storage_dir: None,
            debounce: DebounceConfig::default(),
        }
    }
}

impl ViewStateConfig {
    /// Load settings from the default path.
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => {
                tracing::warn!("Could not determine settings path, using defaults");
                Self::default()
            }
        }
    }

    /// Load settings from a specific path, falling back to defaults.
    pub fn load_from(path: &Path) -> Self {
        match Self::try_load_from(path) {
            Ok(config) => {
                tracing::info!("Loaded settings from {}", path.display());
                config
            }
            Err(ViewStateError::Io { source, .. })
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                tracing::debug!("No settings file found at {}, using defaults", path.display());
                Self::default()
            }
            Err(e) => {
                tracing::warn!("{}, using defaults", e.user_message());
                Self::default()
            }
        }
    }

    /// Load and validate settings from a specific path.
    pub fn try_load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| ViewStateError::Io {
            operation: "read",
            path: path.to_path_buf(),
            source: e,
        })?;
        let config = toml::from_str::<Self>(&content).map_err(|e| {
            ViewStateError::Deserialization {
                what: format!("settings file {}", path.display()),
                source: Box::new(e),
            }
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ViewStateError::Io {
                operation: "create directory",
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| ViewStateError::Serialization {
            what: "settings".to_string(),
            source: Box::new(e),
        })?;

        fs::write(path, content).map_err(|e| ViewStateError::Io {
            operation: "write",
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Reject values the table cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.default_page_size == 0 {
            return Err(ViewStateError::InvalidConfig {
                field: "default_page_size",
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.debounce.enabled && self.debounce.quiet_period_ms == 0 {
            return Err(ViewStateError::InvalidConfig {
                field: "debounce.quiet_period_ms",
                reason: "must be greater than zero when debounce is enabled".to_string(),
            });
        }
        if let Some(max) = self.debounce.max_delay_ms
            && max < self.debounce.quiet_period_ms
        {
            return Err(ViewStateError::InvalidConfig {
                field: "debounce.max_delay_ms",
                reason: "must not be shorter than the quiet period".to_string(),
            });
        }
        Ok(())
    }

    /// Get the default config file path.
    pub fn config_path() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
            .map(|dirs| dirs.config_dir().join(CONFIG_FILENAME))
    }

    /// Directory for the JSON file store.
    pub fn resolved_storage_dir(&self) -> PathBuf {
        if let Some(dir) = &self.storage_dir {
            return dir.clone();
        }
        ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
            .map(|dirs| dirs.data_dir().join("tables"))
            .unwrap_or_else(|| PathBuf::from("table-state"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = ViewStateConfig::default();
        assert_eq!(config.key_prefix, "tableState:");
        assert_eq!(config.default_page_size, 25);
        assert!(config.selection_column);
        assert_eq!(config.debounce.quiet_period_ms, 500);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.toml");
        let config = ViewStateConfig {
            default_page_size: 50,
            storage_dir: Some(dir.path().join("tables")),
            debounce: DebounceConfig::with_quiet_period_ms(250).max_delay_ms(5000),
            ..Default::default()
        };

        config.save_to(&path).unwrap();
        assert_eq!(ViewStateConfig::load_from(&path), config);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        fs::write(&path, "default_page_size = 10\n[debounce]\nquiet_period_ms = 100\n").unwrap();

        let config = ViewStateConfig::load_from(&path);
        assert_eq!(config.default_page_size, 10);
        assert_eq!(config.debounce.quiet_period_ms, 100);
        assert!(config.debounce.enabled);
        assert_eq!(config.key_prefix, "tableState:");
    }

    #[test]
    fn test_missing_or_invalid_file_uses_defaults() {
        let dir = tempdir().unwrap();
        assert_eq!(
            ViewStateConfig::load_from(&dir.path().join("missing.toml")),
            ViewStateConfig::default()
        );

        let broken = dir.path().join("broken.toml");
        fs::write(&broken, "default_page_size = \"lots\"").unwrap();
        assert_eq!(ViewStateConfig::load_from(&broken), ViewStateConfig::default());

        let zero = dir.path().join("zero.toml");
        fs::write(&zero, "default_page_size = 0").unwrap();
        assert_eq!(ViewStateConfig::load_from(&zero), ViewStateConfig::default());
    }

    #[test]
    fn test_try_load_reports_cause() {
        let dir = tempdir().unwrap();
        let broken = dir.path().join("broken.toml");
        fs::write(&broken, "key_prefix = [").unwrap();
        assert!(matches!(
            ViewStateConfig::try_load_from(&broken),
            Err(ViewStateError::Deserialization { .. })
        ));
        assert!(matches!(
            ViewStateConfig::try_load_from(&dir.path().join("missing.toml")),
            Err(ViewStateError::Io { operation: "read", .. })
        ));
    }

    #[test]
    fn test_validate_rejects_short_max_delay() {
        let config = ViewStateConfig {
            debounce: DebounceConfig::with_quiet_period_ms(500).max_delay_ms(100),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ViewStateError::InvalidConfig {
                field: "debounce.max_delay_ms",
                ..
            })
        ));
    }

    #[test]
    fn test_explicit_storage_dir_wins() {
        let config = ViewStateConfig {
            storage_dir: Some(PathBuf::from("/var/lib/grid")),
            ..Default::default()
        };
        assert_eq!(config.resolved_storage_dir(), PathBuf::from("/var/lib/grid"));
    }
}
