use std::sync::Mutex;

use crate::error::{ReleaseError, Result};
use crate::git::{CommitInfo, Repository, TagRef};

/// Mock repository for testing without actual git operations.
///
/// Records tag creations and pushes so tests can assert which side effects
/// the workflow performed.
pub struct MockRepository {
    tags: Vec<TagRef>,
    commits: Vec<CommitInfo>,
    head: String,
    remote_url: Option<String>,
    fail_push: bool,
    created_tags: Mutex<Vec<(String, String)>>,
    pushed_tags: Mutex<Vec<(String, String)>>,
}

impl MockRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        MockRepository {
            tags: Vec::new(),
            commits: Vec::new(),
            head: "0000000000000000000000000000000000000000".to_string(),
            remote_url: None,
            fail_push: false,
            created_tags: Mutex::new(Vec::new()),
            pushed_tags: Mutex::new(Vec::new()),
        }
    }

    /// Add a tag with its target commit hash and timestamp
    pub fn add_tag(&mut self, name: impl Into<String>, target: impl Into<String>, timestamp: i64) {
        self.tags.push(TagRef {
            name: name.into(),
            target: target.into(),
            timestamp,
        });
    }

    /// Add a commit, in chronological order (oldest first)
    pub fn add_commit(&mut self, hash: impl Into<String>, message: impl Into<String>) {
        let hash = hash.into();
        self.head = hash.clone();
        self.commits.push(CommitInfo {
            hash,
            message: message.into(),
            author: "Test Author".to_string(),
            timestamp: self.commits.len() as i64,
        });
    }

    /// Set the URL reported for any remote
    pub fn set_remote_url(&mut self, url: impl Into<String>) {
        self.remote_url = Some(url.into());
    }

    /// Make push_tag fail, simulating a rejected or unreachable remote
    pub fn fail_pushes(&mut self) {
        self.fail_push = true;
    }

    /// Tags created so far, as (name, message) pairs
    pub fn created_tags(&self) -> Vec<(String, String)> {
        self.created_tags.lock().unwrap().clone()
    }

    /// Tags pushed so far, as (remote, name) pairs
    pub fn pushed_tags(&self) -> Vec<(String, String)> {
        self.pushed_tags.lock().unwrap().clone()
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository for MockRepository {
    fn latest_tag(&self) -> Result<Option<TagRef>> {
        let mut latest: Option<TagRef> = None;
        for tag in &self.tags {
            if latest
                .as_ref()
                .map(|t| tag.timestamp >= t.timestamp)
                .unwrap_or(true)
            {
                latest = Some(tag.clone());
            }
        }
        Ok(latest)
    }

    fn commits_since(&self, tag_name: Option<&str>) -> Result<Vec<CommitInfo>> {
        // Commits after the tag's target, oldest first. An unknown tag
        // behaves like no tag at all, matching the git2 implementation.
        let cutoff = tag_name
            .and_then(|name| self.tags.iter().find(|t| t.name == name))
            .and_then(|tag| self.commits.iter().position(|c| c.hash == tag.target));

        Ok(match cutoff {
            Some(pos) => self.commits[pos + 1..].to_vec(),
            None => self.commits.clone(),
        })
    }

    fn head_hash(&self) -> Result<String> {
        Ok(self.head.clone())
    }

    fn create_tag(&self, name: &str, message: &str) -> Result<()> {
        if self.tags.iter().any(|t| t.name == name) {
            return Err(ReleaseError::tag_conflict(format!(
                "tag '{}' already exists",
                name
            )));
        }
        self.created_tags
            .lock()
            .unwrap()
            .push((name.to_string(), message.to_string()));
        Ok(())
    }

    fn push_tag(&self, remote: &str, tag_name: &str) -> Result<()> {
        if self.fail_push {
            return Err(ReleaseError::push(format!(
                "remote '{}' rejected tag '{}'",
                remote, tag_name
            )));
        }
        self.pushed_tags
            .lock()
            .unwrap()
            .push((remote.to_string(), tag_name.to_string()));
        Ok(())
    }

    fn remote_url(&self, _remote: &str) -> Result<Option<String>> {
        Ok(self.remote_url.clone())
    }
}
