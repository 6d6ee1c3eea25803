use anyhow::{Context, Result};
use clap::Parser;

use release_manager::git::{Git2Repository, Repository};
use release_manager::{config, ui, workflow};

#[derive(clap::Parser)]
#[command(
    name = "release-manager",
    about = "Generate release notes and publish git tags from the commits since the last release"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(short, long, help = "Release kind: major, minor or patch")]
    kind: Option<String>,

    #[arg(short, long, help = "Git remote to push the tag to")]
    remote: Option<String>,

    #[arg(long, help = "Preview the release without writing or tagging")]
    dry_run: bool,

    #[arg(short = 'V', long, help = "Print version information")]
    version: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.version {
        println!("release-manager {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let mut config = config::load_config(args.config.as_deref()).context("loading configuration")?;
    if let Some(kind) = args.kind.as_deref() {
        config.release_kind = kind.parse()?;
    }
    if let Some(remote) = args.remote {
        config.remote = remote;
    }

    let repo = Git2Repository::open(".").context("not in a git repository")?;

    // Without an explicit repo_url, link commits via the remote's URL
    if config.repo_url.is_empty() {
        if let Some(url) = repo.remote_url(&config.remote)? {
            config.repo_url = url;
        }
    }

    match workflow::run_release(&config, &repo, args.dry_run) {
        Ok(_) => Ok(()),
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    }
}
