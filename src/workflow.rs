//! The release run itself: version bump, changelog, tag, push.
//!
//! A linear pipeline with a single short-circuit: when nothing new happened
//! since the last tag, the run stops before touching the changelog or the
//! repository. First failure aborts; there are no retries and no rollback of
//! the local tag if only the push fails.

use crate::changelog;
use crate::config::Config;
use crate::error::Result;
use crate::git::Repository;
use crate::ui;
use crate::version::Version;

/// What a release run ended up doing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReleaseOutcome {
    /// HEAD equals the latest tag's commit; nothing was written or tagged
    NoNewCommits,
    /// Dry run: the entry was rendered and printed, nothing persisted
    Preview { version: Version, tag: String },
    /// Changelog written, tag created and pushed
    Published { version: Version, tag: String },
}

/// Run a release end to end.
///
/// Determines the next version from the latest tag (baseline `0.0.0` when no
/// tag exists), collects the commits since it, renders and prepends the
/// changelog entry, then creates and pushes the tag.
pub fn run_release(
    config: &Config,
    repo: &dyn Repository,
    dry_run: bool,
) -> Result<ReleaseOutcome> {
    let latest_tag = repo.latest_tag()?;
    let current = match &latest_tag {
        Some(tag) => Version::from_tag(&tag.name, &config.tag_prefix)?,
        None => Version::new(0, 0, 0),
    };
    let next = current.bump(config.release_kind);

    let commits = repo.commits_since(latest_tag.as_ref().map(|t| t.name.as_str()))?;
    if commits.is_empty() {
        let head = repo.head_hash()?;
        ui::display_status(&format!(
            "No new commits since last tag (HEAD {}).",
            &head[..head.len().min(7)]
        ));
        return Ok(ReleaseOutcome::NoNewCommits);
    }

    let entry = changelog::render_entry(&next, &commits, &config.repo_url, changelog::today_utc());
    let tag_name = config.tag_name(&next);

    if dry_run {
        ui::display_status(&format!(
            "Dry run: would create and push tag {} with {} commit(s)",
            tag_name,
            commits.len()
        ));
        print!("{}", entry);
        return Ok(ReleaseOutcome::Preview {
            version: next,
            tag: tag_name,
        });
    }

    changelog::prepend_entry(&config.changelog_path, &entry)?;
    ui::display_success(&format!(
        "Release {} generated and saved to {}",
        tag_name, config.changelog_path
    ));
    print!("{}", entry);

    repo.create_tag(&tag_name, &format!("Release {}", tag_name))?;
    repo.push_tag(&config.remote, &tag_name)?;
    ui::display_success(&format!("Git tag {} created and pushed.", tag_name));

    Ok(ReleaseOutcome::Published {
        version: next,
        tag: tag_name,
    })
}
