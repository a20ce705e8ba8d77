use chrono::Local;
use clap::Args;
use std::path::PathBuf;

use mastodon_deploy::command::SystemRunner;
use mastodon_deploy::config;
use mastodon_deploy::release::{self, RunOptions, RunReport};
use mastodon_deploy::SuiteConfig;

use crate::commands::CmdResult;

#[derive(Args, Debug, Default)]
pub struct DeployArgs {
    /// Install to the default SciJava location instead of a local directory with the jars
    #[arg(long)]
    pub install_to_default: bool,

    /// Install from what is currently on disk, without reading versions or switching branches
    #[arg(long)]
    pub preview: bool,

    /// Build each artifact after checking out its version (for tags not built yet)
    #[arg(long)]
    pub build: bool,

    /// Do not stop if a local repo is not in sync with its remote
    #[arg(long)]
    pub skip_up_to_date: bool,

    /// Do not stop if a local repo has uncommitted changes
    #[arg(long)]
    pub skip_unstaged: bool,

    /// Suite config file (defaults to ./mastodon-deploy.json when present)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Directory holding the artifact repositories
    #[arg(long, value_name = "DIR")]
    pub repo_root: Option<String>,

    /// Build descriptor holding the pinned versions
    #[arg(long, value_name = "PATH")]
    pub descriptor: Option<String>,
}

impl DeployArgs {
    fn options(&self) -> RunOptions {
        RunOptions {
            install_to_default: self.install_to_default,
            preview: self.preview,
            build_after_checkout: self.build,
            skip_up_to_date: self.skip_up_to_date,
            skip_unstaged: self.skip_unstaged,
        }
    }
}

/// Command-line paths take precedence over the loaded config.
fn apply_overrides(args: &DeployArgs, mut suite: SuiteConfig) -> SuiteConfig {
    if let Some(root) = &args.repo_root {
        suite.repo_root = root.clone();
    }
    if let Some(descriptor) = &args.descriptor {
        suite.descriptor = descriptor.clone();
    }
    suite
}

pub fn run(args: DeployArgs) -> CmdResult<RunReport> {
    let suite = apply_overrides(&args, config::load(args.config.as_deref())?);

    let today = Local::now().date_naive();
    release::run(&SystemRunner, &suite, &args.options(), today)
}
