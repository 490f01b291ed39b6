//! Filter configuration
//!
//! Stored in `~/.config/pkgsift/config.yaml`:
//!
//! ```yaml
//! ownPackages:
//!   - acme
//! debounce: 350ms
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{CoreError, Result};
use crate::roster::OwnershipRoster;

/// Delay between the last keystroke and the filter pass
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(350);

/// Longest accepted debounce
pub const MAX_DEBOUNCE: Duration = Duration::from_secs(60);

/// Configuration supplied to the filter at construction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterConfig {
    /// Namespace fragments considered "own"
    #[serde(default)]
    pub own_packages: OwnershipRoster,

    /// Trailing-edge debounce for free-text input
    #[serde(default = "default_debounce", with = "humantime_serde")]
    pub debounce: Duration,
}

fn default_debounce() -> Duration {
    DEFAULT_DEBOUNCE
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            own_packages: OwnershipRoster::default(),
            debounce: DEFAULT_DEBOUNCE,
        }
    }
}

impl FilterConfig {
    /// Load configuration from the default location, falling back to defaults
    pub fn load() -> Result<Self> {
        let path = Self::default_path()?;
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get default configuration path
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or_else(|| CoreError::InvalidConfig {
            message: "Could not determine config directory".to_string(),
        })?;
        Ok(config_dir.join("pkgsift").join("config.yaml"))
    }

    fn validate(&self) -> Result<()> {
        if self.debounce.is_zero() {
            return Err(CoreError::InvalidConfig {
                message: "debounce must be greater than zero".to_string(),
            });
        }
        if self.debounce > MAX_DEBOUNCE {
            return Err(CoreError::InvalidConfig {
                message: format!(
                    "debounce must be at most {:?}, got {:?}",
                    MAX_DEBOUNCE, self.debounce
                ),
            });
        }
        Ok(())
    }

    pub fn roster(&self) -> &OwnershipRoster {
        &self.own_packages
    }
}
