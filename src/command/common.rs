//! Common functionality shared between commands.
use chrono::Utc;
use color_eyre::eyre::eyre;
use std::{
    env,
    path::{Path, PathBuf},
};

use crate::{
    manifest::{self, ProjectManifest},
    paths,
    registry::Registry,
    result::{NotAProjectError, Result},
};

/// A resolved project: its root directory and parsed manifest.
#[derive(Debug, Clone)]
pub struct ResolvedProject {
    pub root: PathBuf,
    pub manifest: ProjectManifest,
}

/// Resolve a project from an optional registered name or explicit path.
///
/// Precedence: registered name, explicit path, then the project
/// containing the current directory.
pub fn resolve_project(
    registry: &Registry,
    name: Option<&str>,
    path: Option<&Path>,
) -> Result<ResolvedProject> {
    let root = match (name, path) {
        (Some(name), _) => {
            let entry = registry.find(name).ok_or_else(|| {
                eyre!("no project named '{name}' is registered")
            })?;
            entry.path.clone()
        }
        (None, Some(path)) => paths::absolutize(path)?,
        (None, None) => {
            let cwd = env::current_dir()?;
            manifest::find_project_root(&cwd)
                .ok_or(NotAProjectError { path: cwd })?
        }
    };

    let manifest = ProjectManifest::load(&root)?;

    Ok(ResolvedProject { root, manifest })
}

/// Today's date in the form the manifest records, UTC.
pub fn today() -> String {
    Utc::now().format("%Y-%m-%d").to_string()
}
