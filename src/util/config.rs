//! Settings file support.
//!
//! The remote endpoints and tool names default to the production CI values.
//! A TOML file can override them:
//!
//! ```toml
//! [remote]
//! base_url = "http://tmp.kiwix.org/ci/"
//! scp_destination = "nightlybot@download.kiwix.org:/var/www/tmp.kiwix.org/ci/"
//!
//! [tools]
//! kiwix_build = "/opt/kiwix-build/bin/kiwix-build"
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Where cached dependency bundles are downloaded from.
pub const DEFAULT_BASE_URL: &str = "http://tmp.kiwix.org/ci/";

/// Where dependency bundles are uploaded to.
pub const DEFAULT_SCP_DESTINATION: &str =
    "nightlybot@download.kiwix.org:/var/www/tmp.kiwix.org/ci/";

/// Location of the ssh key relative to the CI checkout.
pub const SSH_KEY_PATH: &str = "travis/travisci_builder_id_key";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub remote: RemoteConfig,
    pub tools: ToolsConfig,
}

/// Remote cache and upload endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    /// HTTP directory holding dependency bundles. Must end with `/`.
    pub base_url: String,

    /// `scp` target directory for uploads. Must end with `/`.
    pub scp_destination: String,

    /// Explicit ssh key; defaults to the key inside the CI checkout.
    pub ssh_key: Option<PathBuf>,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        RemoteConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
            scp_destination: DEFAULT_SCP_DESTINATION.to_string(),
            ssh_key: None,
        }
    }
}

/// External programs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    pub kiwix_build: PathBuf,
    pub scp: PathBuf,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        ToolsConfig {
            kiwix_build: PathBuf::from("kiwix-build"),
            scp: PathBuf::from("scp"),
        }
    }
}

impl Settings {
    /// Load settings from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load settings with fallback to defaults if the file doesn't exist.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }
}

/// Global settings file (`~/.kiwix-ci/config.toml`), used when no file is given.
pub fn global_config_path() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".kiwix-ci").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.remote.base_url, DEFAULT_BASE_URL);
        assert_eq!(settings.tools.kiwix_build, PathBuf::from("kiwix-build"));
        assert!(settings.remote.ssh_key.is_none());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "[tools]\nkiwix_build = \"/opt/kb\"\n").unwrap();

        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings.tools.kiwix_build, PathBuf::from("/opt/kb"));
        assert_eq!(settings.tools.scp, PathBuf::from("scp"));
        assert_eq!(settings.remote.scp_destination, DEFAULT_SCP_DESTINATION);
    }

    #[test]
    fn test_missing_or_broken_file_is_default() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(
            Settings::load_or_default(&tmp.path().join("nope.toml")),
            Settings::default()
        );

        let path = tmp.path().join("broken.toml");
        std::fs::write(&path, "[remote\n").unwrap();
        assert!(Settings::load(&path).is_err());
        assert_eq!(Settings::load_or_default(&path), Settings::default());
    }
}
