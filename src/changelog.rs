//! Changelog rendering and persistence.
//!
//! Rendering is a pure function of (version, commits, repo URL, date) so the
//! same inputs always produce byte-identical output. Persistence prepends the
//! new entry, never touching what previous runs wrote.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use chrono::NaiveDate;

use crate::error::Result;
use crate::git::CommitInfo;
use crate::version::Version;

/// Render a changelog entry for a release.
///
/// Produces a Markdown block of the form:
///
/// ```text
/// ## Release v1.0.1 - 2024-01-15
///
/// - fix bug ([abc1234](https://github.com/acme/widgets/commit/abc1234...))
/// ```
///
/// Commits appear one line each, in the given order (oldest first by the
/// repository contract). An empty commit list still yields the header and the
/// trailing blank line.
pub fn render_entry(
    version: &Version,
    commits: &[CommitInfo],
    repo_url: &str,
    date: NaiveDate,
) -> String {
    let mut entry = format!("## Release v{} - {}\n\n", version, date.format("%Y-%m-%d"));
    for commit in commits {
        entry.push_str(&format!(
            "- {} ([{}]({}/commit/{}))\n",
            commit.summary(),
            commit.short_hash(),
            repo_url,
            commit.hash
        ));
    }
    entry.push('\n');
    entry
}

/// Today's date in UTC, fixed once per call site.
pub fn today_utc() -> NaiveDate {
    chrono::Utc::now().date_naive()
}

/// Prepend an entry to the changelog file, creating the file if absent.
///
/// Existing content is preserved below the new entry. Single-writer
/// assumption: concurrent invocations are not supported.
pub fn prepend_entry<P: AsRef<Path>>(path: P, entry: &str) -> Result<()> {
    let existing = match fs::read_to_string(path.as_ref()) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => String::new(),
        Err(e) => return Err(e.into()),
    };

    fs::write(path.as_ref(), format!("{}\n{}", entry, existing))?;
    Ok(())
}
