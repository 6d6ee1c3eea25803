use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ReleaseError, Result};
use crate::version::ReleaseKind;

/// Represents the complete configuration for release-manager.
///
/// Covers everything the release run needs: the URL used for commit hyperlinks,
/// the changelog file, which component to bump, and where to push the tag.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    /// Repository URL used only to build commit hyperlinks in the changelog.
    /// When empty, the URL of the configured remote is used instead.
    #[serde(default)]
    pub repo_url: String,

    #[serde(default = "default_changelog_path")]
    pub changelog_path: String,

    #[serde(default)]
    pub release_kind: ReleaseKind,

    #[serde(default = "default_remote")]
    pub remote: String,

    #[serde(default = "default_tag_prefix")]
    pub tag_prefix: String,
}

fn default_changelog_path() -> String {
    "RELEASE_NOTES.md".to_string()
}

fn default_remote() -> String {
    "origin".to_string()
}

fn default_tag_prefix() -> String {
    "v".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            repo_url: String::new(),
            changelog_path: default_changelog_path(),
            release_kind: ReleaseKind::default(),
            remote: default_remote(),
            tag_prefix: default_tag_prefix(),
        }
    }
}

impl Config {
    /// Tag name for a version, e.g. "v1.2.3" with the default prefix.
    pub fn tag_name(&self, version: &crate::version::Version) -> String {
        format!("{}{}", self.tag_prefix, version)
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `release.toml` in current directory
/// 3. `release.toml` in the user config directory
/// 4. Default configuration if no file found
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new("./release.toml").exists() {
        fs::read_to_string("./release.toml")?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join("release.toml");
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    let config: Config =
        toml::from_str(&config_str).map_err(|e| ReleaseError::config(e.to_string()))?;
    Ok(config)
}
