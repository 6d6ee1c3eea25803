//! Git operations abstraction layer.
//!
//! The [Repository] trait is the port the release workflow depends on. Two
//! implementations exist:
//!
//! - [repository::Git2Repository]: the real one, backed by the `git2` crate
//! - [mock::MockRepository]: an in-memory stand-in for tests

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::error::Result;

/// Snapshot of a commit, read once from the underlying repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitInfo {
    /// Full commit hash
    pub hash: String,
    /// Full commit message; the first line is the summary
    pub message: String,
    /// Commit author name
    pub author: String,
    /// Commit time, seconds since epoch
    pub timestamp: i64,
}

impl CommitInfo {
    /// First line of the commit message, trimmed.
    pub fn summary(&self) -> &str {
        self.message.trim().lines().next().unwrap_or("")
    }

    /// First 7 characters of the hash.
    pub fn short_hash(&self) -> &str {
        &self.hash[..self.hash.len().min(7)]
    }
}

/// A tag together with the commit it points at.
///
/// Tags are totally ordered by the target commit's timestamp; "latest tag"
/// means the maximum under that order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRef {
    pub name: String,
    /// Hash of the commit the tag (possibly peeled) points at
    pub target: String,
    /// Target commit time, seconds since epoch
    pub timestamp: i64,
}

/// Operations the release workflow needs from a repository.
///
/// Implementations map their underlying failures onto
/// [crate::error::ReleaseError]: repository access problems surface as
/// `Repository`, pre-existing tag names as `TagConflict`, and remote
/// rejections as `Push`.
pub trait Repository: Send {
    /// The tag whose target commit has the greatest timestamp, or `None`
    /// when the repository has no tags. Among equal timestamps the last one
    /// seen wins; no stronger tie-break is guaranteed.
    fn latest_tag(&self) -> Result<Option<TagRef>>;

    /// Commits reachable from HEAD but not from `tag_name`, oldest first.
    /// With `None`, every commit reachable from HEAD.
    fn commits_since(&self, tag_name: Option<&str>) -> Result<Vec<CommitInfo>>;

    /// Full hash of the current HEAD commit.
    fn head_hash(&self) -> Result<String>;

    /// Create an annotated tag at HEAD. Fails with `TagConflict` if the
    /// name already exists locally.
    fn create_tag(&self, name: &str, message: &str) -> Result<()>;

    /// Push a tag to a remote. Fails with `Push` on network, auth or
    /// remote rejection. The local tag is left in place either way.
    fn push_tag(&self, remote: &str, tag_name: &str) -> Result<()>;

    /// URL of a remote, if configured. Used for commit hyperlinks only.
    fn remote_url(&self, remote: &str) -> Result<Option<String>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commit_summary_first_line() {
        let commit = CommitInfo {
            hash: "abc".to_string(),
            message: "fix bug\n\nlonger body\n".to_string(),
            author: "a".to_string(),
            timestamp: 0,
        };
        assert_eq!(commit.summary(), "fix bug");
    }

    #[test]
    fn test_commit_summary_trims_whitespace() {
        let commit = CommitInfo {
            hash: "abc".to_string(),
            message: "\n  fix bug  \n".to_string(),
            author: "a".to_string(),
            timestamp: 0,
        };
        assert_eq!(commit.summary(), "fix bug");
    }

    #[test]
    fn test_short_hash() {
        let commit = CommitInfo {
            hash: "abc1234def5678".to_string(),
            message: String::new(),
            author: String::new(),
            timestamp: 0,
        };
        assert_eq!(commit.short_hash(), "abc1234");
    }

    #[test]
    fn test_short_hash_shorter_than_seven() {
        let commit = CommitInfo {
            hash: "abc".to_string(),
            message: String::new(),
            author: String::new(),
            timestamp: 0,
        };
        assert_eq!(commit.short_hash(), "abc");
    }
}
