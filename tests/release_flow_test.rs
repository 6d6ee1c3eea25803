//! End-to-end release runs against real throwaway repositories.

use std::fs;

use git2::{Oid, Repository as RawRepository, Signature, Time};
use release_manager::config::Config;
use release_manager::git::Git2Repository;
use release_manager::version::Version;
use release_manager::workflow::{run_release, ReleaseOutcome};
use tempfile::TempDir;

fn init_repo(dir: &TempDir) -> RawRepository {
    let repo = RawRepository::init(dir.path()).unwrap();
    let mut config = repo.config().unwrap();
    config.set_str("user.name", "Test Author").unwrap();
    config.set_str("user.email", "test@example.com").unwrap();
    repo
}

fn commit(repo: &RawRepository, message: &str, seconds: i64) -> Oid {
    let sig = Signature::new("Test Author", "test@example.com", &Time::new(seconds, 0)).unwrap();
    let tree_id = repo.index().unwrap().write_tree().unwrap();
    let tree = repo.find_tree(tree_id).unwrap();
    let parents = match repo.head() {
        Ok(head) => vec![head.peel_to_commit().unwrap()],
        Err(_) => vec![],
    };
    let parent_refs: Vec<&git2::Commit> = parents.iter().collect();
    repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parent_refs)
        .unwrap()
}

fn config_for(dir: &TempDir) -> Config {
    Config {
        repo_url: "https://github.com/acme/widgets".to_string(),
        changelog_path: dir
            .path()
            .join("RELEASE_NOTES.md")
            .to_string_lossy()
            .into_owned(),
        ..Config::default()
    }
}

/// Two commits after tag v1.0.0: patch release v1.0.1, changelog entry with
/// both commits oldest-first, tag created locally and pushed to the remote.
#[test]
fn test_patch_release_end_to_end() {
    let dir = TempDir::new().unwrap();
    let raw = init_repo(&dir);
    let c1 = commit(&raw, "initial", 1000);
    let object = raw.find_object(c1, None).unwrap();
    raw.tag_lightweight("v1.0.0", &object, false).unwrap();
    let c2 = commit(&raw, "fix bug", 2000);
    let c3 = commit(&raw, "add feature", 3000);

    let remote_dir = TempDir::new().unwrap();
    let bare = RawRepository::init_bare(remote_dir.path()).unwrap();
    raw.remote("origin", remote_dir.path().to_str().unwrap())
        .unwrap();

    let notes_dir = TempDir::new().unwrap();
    let config = config_for(&notes_dir);
    let repo = Git2Repository::open(dir.path()).unwrap();

    let outcome = run_release(&config, &repo, false).unwrap();
    assert_eq!(
        outcome,
        ReleaseOutcome::Published {
            version: Version::new(1, 0, 1),
            tag: "v1.0.1".to_string(),
        }
    );

    let content = fs::read_to_string(&config.changelog_path).unwrap();
    assert!(content.starts_with("## Release v1.0.1 - "));
    assert!(content.contains(&format!(
        "https://github.com/acme/widgets/commit/{}",
        c2
    )));
    assert!(content.contains(&format!(
        "https://github.com/acme/widgets/commit/{}",
        c3
    )));
    let fix_pos = content.find("- fix bug").unwrap();
    let feat_pos = content.find("- add feature").unwrap();
    assert!(fix_pos < feat_pos);

    assert!(raw.find_reference("refs/tags/v1.0.1").is_ok());
    assert!(bare.find_reference("refs/tags/v1.0.1").is_ok());
}

/// HEAD equals the latest tag's commit: no file written, no tag created.
#[test]
fn test_no_new_commits_end_to_end() {
    let dir = TempDir::new().unwrap();
    let raw = init_repo(&dir);
    let c1 = commit(&raw, "initial", 1000);
    let object = raw.find_object(c1, None).unwrap();
    raw.tag_lightweight("v1.0.0", &object, false).unwrap();

    let notes_dir = TempDir::new().unwrap();
    let config = config_for(&notes_dir);
    let repo = Git2Repository::open(dir.path()).unwrap();

    let outcome = run_release(&config, &repo, false).unwrap();
    assert_eq!(outcome, ReleaseOutcome::NoNewCommits);

    assert!(!std::path::Path::new(&config.changelog_path).exists());
    assert!(raw.find_reference("refs/tags/v1.0.1").is_err());
}

/// Two consecutive releases stack changelog entries newest-first.
#[test]
fn test_successive_releases_stack_entries() {
    let dir = TempDir::new().unwrap();
    let raw = init_repo(&dir);
    commit(&raw, "initial", 1000);

    let remote_dir = TempDir::new().unwrap();
    RawRepository::init_bare(remote_dir.path()).unwrap();
    raw.remote("origin", remote_dir.path().to_str().unwrap())
        .unwrap();

    let notes_dir = TempDir::new().unwrap();
    let config = config_for(&notes_dir);
    let repo = Git2Repository::open(dir.path()).unwrap();

    let first = run_release(&config, &repo, false).unwrap();
    assert_eq!(
        first,
        ReleaseOutcome::Published {
            version: Version::new(0, 0, 1),
            tag: "v0.0.1".to_string(),
        }
    );

    commit(&raw, "fix bug", 2000);
    let second = run_release(&config, &repo, false).unwrap();
    assert_eq!(
        second,
        ReleaseOutcome::Published {
            version: Version::new(0, 0, 2),
            tag: "v0.0.2".to_string(),
        }
    );

    let content = fs::read_to_string(&config.changelog_path).unwrap();
    let v2_pos = content.find("## Release v0.0.2").unwrap();
    let v1_pos = content.find("## Release v0.0.1").unwrap();
    assert!(v2_pos < v1_pos, "newest entry must be on top");
}
