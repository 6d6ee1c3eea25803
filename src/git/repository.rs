use std::path::Path;

use git2::{Oid, Repository as Git2Repo};

use crate::error::{ReleaseError, Result};
use crate::git::{CommitInfo, TagRef};

/// Wrapper around git2::Repository implementing the [super::Repository] port.
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository at the given path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;
        Ok(Git2Repository { repo })
    }

    fn tag_target(&self, tag_name: &str) -> Result<Option<git2::Commit<'_>>> {
        let reference_name = format!("refs/tags/{}", tag_name);
        match self.repo.find_reference(&reference_name) {
            Ok(reference) => {
                // Handles both lightweight and annotated tags
                let commit = reference.peel_to_commit()?;
                Ok(Some(commit))
            }
            Err(e) if e.code() == git2::ErrorCode::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn commit_info(&self, oid: Oid) -> Result<CommitInfo> {
        let commit = self.repo.find_commit(oid)?;
        let author = commit.author().name().unwrap_or("unknown").to_string();
        Ok(CommitInfo {
            hash: oid.to_string(),
            message: commit.message().unwrap_or("(empty message)").to_string(),
            author,
            timestamp: commit.time().seconds(),
        })
    }
}

impl super::Repository for Git2Repository {
    fn latest_tag(&self) -> Result<Option<TagRef>> {
        let tag_names = self.repo.tag_names(None)?;

        let mut latest: Option<TagRef> = None;
        for tag_name in tag_names.iter().flatten() {
            let commit = match self.tag_target(tag_name)? {
                Some(commit) => commit,
                None => continue,
            };
            let timestamp = commit.time().seconds();

            // Last one seen wins among equal timestamps
            if latest
                .as_ref()
                .map(|t| timestamp >= t.timestamp)
                .unwrap_or(true)
            {
                latest = Some(TagRef {
                    name: tag_name.to_string(),
                    target: commit.id().to_string(),
                    timestamp,
                });
            }
        }

        Ok(latest)
    }

    fn commits_since(&self, tag_name: Option<&str>) -> Result<Vec<CommitInfo>> {
        let mut revwalk = self.repo.revwalk()?;
        revwalk.push_head()?;

        if let Some(tag_name) = tag_name {
            if let Some(tag_commit) = self.tag_target(tag_name)? {
                revwalk.hide(tag_commit.id())?;
            }
        }

        let mut commits = Vec::new();
        for oid in revwalk {
            commits.push(self.commit_info(oid?)?);
        }

        // Revwalk yields newest first; the workflow wants oldest first
        commits.reverse();
        Ok(commits)
    }

    fn head_hash(&self) -> Result<String> {
        let head = self.repo.head()?.peel_to_commit()?;
        Ok(head.id().to_string())
    }

    fn create_tag(&self, name: &str, message: &str) -> Result<()> {
        if self.tag_target(name)?.is_some() {
            return Err(ReleaseError::tag_conflict(format!(
                "tag '{}' already exists",
                name
            )));
        }

        let head = self.repo.head()?.peel_to_commit()?;
        let signature = self.repo.signature()?;
        self.repo
            .tag(name, head.as_object(), &signature, message, false)?;
        Ok(())
    }

    fn push_tag(&self, remote: &str, tag_name: &str) -> Result<()> {
        let mut remote = self
            .repo
            .find_remote(remote)
            .map_err(|e| ReleaseError::push(format!("remote '{}' not found: {}", remote, e)))?;

        let mut push_options = git2::PushOptions::new();

        let mut callbacks = git2::RemoteCallbacks::new();
        callbacks.credentials(|_url, username_from_url, allowed_types| {
            if allowed_types.contains(git2::CredentialType::SSH_KEY) {
                let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
                let key_paths = vec![
                    format!("{}/.ssh/id_ed25519", home),
                    format!("{}/.ssh/id_rsa", home),
                    format!("{}/.ssh/id_ecdsa", home),
                ];

                for key_path in key_paths {
                    let path = std::path::Path::new(&key_path);
                    if path.exists() {
                        if let Ok(cred) = git2::Cred::ssh_key(
                            username_from_url.unwrap_or("git"),
                            None,
                            path,
                            None,
                        ) {
                            return Ok(cred);
                        }
                    }
                }

                if let Ok(cred) = git2::Cred::ssh_key_from_agent(username_from_url.unwrap_or("git"))
                {
                    return Ok(cred);
                }
            }

            git2::Cred::default()
        });

        // Catch per-reference rejections reported by the remote
        callbacks.push_update_reference(|refname, status| {
            if let Some(status) = status {
                Err(git2::Error::from_str(&format!(
                    "remote rejected {}: {}",
                    refname, status
                )))
            } else {
                Ok(())
            }
        });

        push_options.remote_callbacks(callbacks);

        let refspec = format!("refs/tags/{}:refs/tags/{}", tag_name, tag_name);
        remote
            .push(&[refspec.as_str()], Some(&mut push_options))
            .map_err(|e| {
                if e.class() == git2::ErrorClass::Net {
                    ReleaseError::push(format!("network error pushing '{}': {}", tag_name, e))
                } else {
                    ReleaseError::push(format!("failed to push tag '{}': {}", tag_name, e))
                }
            })
    }

    fn remote_url(&self, remote: &str) -> Result<Option<String>> {
        match self.repo.find_remote(remote) {
            Ok(remote) => Ok(remote.url().map(normalize_remote_url)),
            Err(e) if e.code() == git2::ErrorCode::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

/// Turn a remote URL into a browsable https URL for commit hyperlinks.
///
/// Rewrites scp-like ssh URLs (`git@host:owner/repo.git`) and strips a
/// trailing `.git`; https URLs pass through otherwise unchanged.
fn normalize_remote_url(url: &str) -> String {
    let url = url.trim_end_matches(".git");
    if let Some(rest) = url.strip_prefix("git@") {
        if let Some((host, path)) = rest.split_once(':') {
            return format!("https://{}/{}", host, path);
        }
    }
    url.to_string()
}
