//! Configuration loading and parsing for dsman's `config.toml`.
//!
//! Values here seed every new project. Any of them can be overridden per
//! invocation with CLI flags.

use log::*;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

use crate::{env::EnvBackend, result::Result, scaffold::profile::Profile};

/// Default branch for newly initialized repositories.
pub const DEFAULT_BRANCH: &str = "main";

/// Default message for the scaffold commit.
pub const DEFAULT_COMMIT_MESSAGE: &str = "chore: initial project structure";

/// Default Python version requested for new projects.
pub const DEFAULT_PYTHON_VERSION: &str = "3.12";

/// Default license identifier recorded in new manifests.
pub const DEFAULT_LICENSE: &str = "MIT";

/// Git behavior for new projects.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct GitConfig {
    /// Initialize a repository and commit the scaffold (default: true)
    pub enabled: bool,
    /// Branch name for the initial commit.
    pub default_branch: String,
    /// Message for the scaffold commit.
    pub commit_message: String,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            default_branch: DEFAULT_BRANCH.into(),
            commit_message: DEFAULT_COMMIT_MESSAGE.into(),
        }
    }
}

/// Scaffold overrides applied on top of the chosen profile.
#[derive(Debug, Default, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ScaffoldConfig {
    /// Extra directories appended to every profile layout.
    pub extra_dirs: Vec<String>,
    /// Path to a Tera template replacing the builtin README.
    pub readme_template: String,
}

/// Root configuration structure for `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default)] // Use default for missing fields
pub struct Config {
    /// Author name recorded in manifests and README headers.
    pub author: String,
    /// License identifier recorded in new manifests.
    pub license: String,
    /// Scaffold profile used when `--profile` is not given.
    pub profile: Profile,
    /// Python version requested for new environments.
    pub python_version: String,
    /// Environment backend used when `--env` is not given.
    pub env_backend: EnvBackend,
    /// Parent directory for new projects. Empty means the current
    /// directory.
    pub projects_root: String,
    /// Git behavior for new projects.
    pub git: GitConfig,
    /// Scaffold overrides.
    pub scaffold: ScaffoldConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            author: "".into(),
            license: DEFAULT_LICENSE.into(),
            profile: Profile::default(),
            python_version: DEFAULT_PYTHON_VERSION.into(),
            env_backend: EnvBackend::default(),
            projects_root: "".into(),
            git: GitConfig::default(),
            scaffold: ScaffoldConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from `path`, falling back to defaults when the
    /// file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            info!("configuration not found: using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}
