use std::fs;

use release_manager::config::load_config;
use release_manager::version::ReleaseKind;
use serial_test::serial;
use tempfile::TempDir;

#[test]
fn test_load_custom_config_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("release.toml");
    fs::write(
        &path,
        r#"
            repo_url = "https://github.com/acme/widgets"
            release_kind = "major"
        "#,
    )
    .unwrap();

    let config = load_config(path.to_str()).unwrap();
    assert_eq!(config.repo_url, "https://github.com/acme/widgets");
    assert_eq!(config.release_kind, ReleaseKind::Major);
    assert_eq!(config.changelog_path, "RELEASE_NOTES.md");
}

#[test]
fn test_load_malformed_config_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("release.toml");
    fs::write(&path, "release_kind = 42").unwrap();

    assert!(load_config(path.to_str()).is_err());
}

// Depends on the process working directory, so runs serially.
#[test]
#[serial]
fn test_load_config_from_current_directory() {
    let original = std::env::current_dir().unwrap();
    let dir = TempDir::new().unwrap();
    std::env::set_current_dir(dir.path()).unwrap();

    fs::write("release.toml", r#"remote = "upstream""#).unwrap();
    let config = load_config(None).unwrap();

    std::env::set_current_dir(original).unwrap();

    assert_eq!(config.remote, "upstream");
    assert_eq!(config.tag_prefix, "v");
}
