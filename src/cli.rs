//! CLI argument parsing and remote URL validation.
use clap::{Parser, Subcommand};
use color_eyre::eyre::eyre;
use git_url_parse::GitUrl;
use std::path::PathBuf;

use crate::{env::EnvBackend, result::Result, scaffold::profile::Profile};

/// Global CLI arguments for dsman.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[arg(long, global = true)]
    /// Path to config.toml. Falls back to DSMAN_CONFIG, then the
    /// platform config directory.
    pub config: Option<PathBuf>,

    #[arg(long, default_value_t = false, global = true)]
    /// Enable debug logging.
    pub debug: bool,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Project management subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new project from a scaffold profile.
    New {
        /// Project name.
        name: String,

        #[arg(long)]
        /// Parent directory (default: projects_root from config, else
        /// the current directory).
        path: Option<PathBuf>,

        #[arg(long, default_value = "")]
        /// Short description recorded in the manifest and README.
        description: String,

        #[arg(long)]
        /// Scaffold profile (default from config).
        profile: Option<Profile>,

        #[arg(long)]
        /// License identifier (default from config).
        license: Option<String>,

        #[arg(long)]
        /// Python version, e.g. 3.12 (default from config).
        python: Option<String>,

        #[arg(long)]
        /// Environment backend (default from config).
        env: Option<EnvBackend>,

        #[arg(long)]
        /// Remote URL to attach as origin. Recorded, never contacted.
        remote: Option<String>,

        #[arg(long, default_value_t = false)]
        /// Skip git repository initialization.
        no_git: bool,
    },

    /// Adopt an existing directory as a dsman project.
    Init {
        /// Directory to adopt (default: current directory).
        path: Option<PathBuf>,

        #[arg(long)]
        /// Project name (default: the directory name).
        name: Option<String>,

        #[arg(long)]
        /// Scaffold profile used for the missing pieces.
        profile: Option<Profile>,
    },

    /// List registered projects.
    List {
        #[arg(long, default_value_t = false)]
        /// Include archived projects.
        all: bool,
    },

    /// Report a project's manifest, environment, git and data state.
    Status {
        /// Registered project name (default: the project at cwd).
        name: Option<String>,

        #[arg(long)]
        /// Inspect a path instead of a registered name.
        path: Option<PathBuf>,
    },

    /// Commit and tag the current state of a project.
    Snapshot {
        /// Registered project name (default: the project at cwd).
        name: Option<String>,

        #[arg(long)]
        /// Project path instead of a registered name.
        path: Option<PathBuf>,

        #[arg(short, long)]
        /// Snapshot commit message (default: "snapshot <tag>").
        message: Option<String>,
    },

    /// Archive a project, hiding it from the default listing.
    Archive {
        /// Registered project name.
        name: String,

        #[arg(long, default_value_t = false)]
        /// Restore instead of archive.
        restore: bool,
    },

    /// Show the built-in scaffold profiles.
    Profiles,
}

/// Validate a remote URL before it is attached as origin.
pub fn validate_remote_url(remote: &str) -> Result<()> {
    let parsed = GitUrl::parse(remote)?;

    match parsed.scheme {
        git_url_parse::Scheme::Http
        | git_url_parse::Scheme::Https
        | git_url_parse::Scheme::Ssh
        | git_url_parse::Scheme::Git => Ok(()),
        _ => Err(eyre!(
            "unsupported remote url scheme: use http, https, ssh, or git"
        )),
    }
}
