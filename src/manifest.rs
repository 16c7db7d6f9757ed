//! Project manifest (`dsman.toml`) reading, validation, and in-place edits.
//!
//! The manifest is what makes a directory a dsman project. It is rendered
//! at scaffold time and afterwards only edited with `toml_edit` so user
//! formatting and comments survive.

use color_eyre::eyre::eyre;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use toml_edit::{DocumentMut, value};

use crate::{
    env::EnvBackend,
    result::{NotAProjectError, Result},
    scaffold::profile::Profile,
};

/// Manifest filename marking a project root.
pub const MANIFEST_FILE: &str = "dsman.toml";

/// Version every new project starts at.
pub const INITIAL_VERSION: &str = "0.1.0";

const NAME_PATTERN: &str = r"^[A-Za-z_][A-Za-z0-9_-]*$";
const NAME_MAX_LEN: usize = 64;

/// `[project]` table of the manifest.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectTable {
    pub name: String,
    pub version: String,
    pub description: String,
    /// ISO date the project was scaffolded.
    pub created: String,
    pub profile: Profile,
    pub license: String,
    pub archived: bool,
}

impl Default for ProjectTable {
    fn default() -> Self {
        Self {
            name: "".into(),
            version: INITIAL_VERSION.into(),
            description: "".into(),
            created: "".into(),
            profile: Profile::default(),
            license: "".into(),
            archived: false,
        }
    }
}

/// `[python]` table of the manifest.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PythonTable {
    pub version: String,
    pub env_backend: EnvBackend,
    /// Environment location relative to the project root.
    pub env_path: String,
}

impl Default for PythonTable {
    fn default() -> Self {
        Self {
            version: "".into(),
            env_backend: EnvBackend::default(),
            env_path: EnvBackend::default().default_env_path().into(),
        }
    }
}

/// Parsed `dsman.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectManifest {
    pub project: ProjectTable,
    pub python: PythonTable,
}

impl Default for ProjectManifest {
    fn default() -> Self {
        Self {
            project: ProjectTable::default(),
            python: PythonTable::default(),
        }
    }
}

impl ProjectManifest {
    /// Load and validate the manifest for the project at `project_root`.
    pub fn load(project_root: &Path) -> Result<Self> {
        let path = project_root.join(MANIFEST_FILE);

        if !path.is_file() {
            return Err(NotAProjectError {
                path: project_root.to_path_buf(),
            }
            .into());
        }

        let content = fs::read_to_string(&path)?;
        let manifest: ProjectManifest = toml::from_str(&content)?;
        manifest.validate()?;

        Ok(manifest)
    }

    /// Check manifest invariants: a valid project name and a semver
    /// version.
    pub fn validate(&self) -> Result<()> {
        validate_project_name(&self.project.name)?;
        semver::Version::parse(&self.project.version)?;
        Ok(())
    }
}

/// True when `dir` holds a manifest at its root.
pub fn is_project_root(dir: &Path) -> bool {
    dir.join(MANIFEST_FILE).is_file()
}

/// Walk upward from `start` to the nearest directory containing a
/// manifest.
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    let mut current = Some(start);

    while let Some(dir) = current {
        if is_project_root(dir) {
            return Some(dir.to_path_buf());
        }
        current = dir.parent();
    }

    None
}

/// Validate a project name against the allowed pattern.
pub fn validate_project_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(eyre!("project name cannot be empty"));
    }

    if name.len() > NAME_MAX_LEN {
        return Err(eyre!(
            "project name '{name}' is longer than {NAME_MAX_LEN} characters"
        ));
    }

    let re = Regex::new(NAME_PATTERN)?;

    if !re.is_match(name) {
        return Err(eyre!(
            "invalid project name '{name}': names start with a letter or \
             underscore and contain only letters, numbers, underscores, \
             and hyphens"
        ));
    }

    Ok(())
}

/// Flip the `archived` flag in place, preserving the rest of the file.
pub fn set_archived(project_root: &Path, archived: bool) -> Result<()> {
    let path = project_root.join(MANIFEST_FILE);
    let content = fs::read_to_string(&path)?;
    let mut doc = content.parse::<DocumentMut>()?;

    doc["project"]["archived"] = value(archived);

    fs::write(&path, doc.to_string())?;
    Ok(())
}
