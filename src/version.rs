use std::fmt;
use std::str::FromStr;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{ReleaseError, Result};

/// Semantic version, backed by the `semver` crate.
///
/// Immutable: bumping derives a new `Version`, it never mutates in place.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Version(semver::Version);

/// Which component of the version to bump for a release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReleaseKind {
    Major,
    Minor,
    #[default]
    Patch,
}

impl Version {
    /// Create a new version from its components
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Version(semver::Version::new(major, minor, patch))
    }

    /// Parse a bare `major.minor.patch` string
    pub fn parse(s: &str) -> Result<Self> {
        let parsed = semver::Version::parse(s)
            .map_err(|e| ReleaseError::version_parse(format!("'{}': {}", s, e)))?;
        Ok(Version(parsed))
    }

    /// Extract a version from a tag name.
    ///
    /// Strips the configured prefix first (e.g. "v1.2.3" with prefix "v"),
    /// then falls back to digging a `major.minor.patch` triple out of names
    /// like "release-1.2.3".
    pub fn from_tag(tag: &str, prefix: &str) -> Result<Self> {
        let raw = tag.strip_prefix(prefix).unwrap_or(tag);
        if let Ok(parsed) = semver::Version::parse(raw) {
            return Ok(Version(parsed));
        }

        let re = Regex::new(r"\d+\.\d+\.\d+")
            .map_err(|e| ReleaseError::version_parse(format!("version pattern: {}", e)))?;
        let found = re.find(raw).ok_or_else(|| {
            ReleaseError::version_parse(format!("no version number in tag '{}'", tag))
        })?;
        Self::parse(found.as_str())
    }

    /// Derive the next version for the given release kind.
    ///
    /// Major resets minor and patch, minor resets patch, patch only increments.
    pub fn bump(&self, kind: ReleaseKind) -> Self {
        match kind {
            ReleaseKind::Major => Version::new(self.0.major + 1, 0, 0),
            ReleaseKind::Minor => Version::new(self.0.major, self.0.minor + 1, 0),
            ReleaseKind::Patch => Version::new(self.0.major, self.0.minor, self.0.patch + 1),
        }
    }

    pub fn major(&self) -> u64 {
        self.0.major
    }

    pub fn minor(&self) -> u64 {
        self.0.minor
    }

    pub fn patch(&self) -> u64 {
        self.0.patch
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ReleaseKind {
    type Err = ReleaseError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "major" => Ok(ReleaseKind::Major),
            "minor" => Ok(ReleaseKind::Minor),
            "patch" => Ok(ReleaseKind::Patch),
            other => Err(ReleaseError::config(format!(
                "unknown release kind '{}' - expected major, minor or patch",
                other
            ))),
        }
    }
}

impl fmt::Display for ReleaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReleaseKind::Major => write!(f, "major"),
            ReleaseKind::Minor => write!(f, "minor"),
            ReleaseKind::Patch => write!(f, "patch"),
        }
    }
}
