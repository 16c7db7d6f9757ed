//! Project registry (`registry.json`).
//!
//! The registry is how `list` and name-based lookups know about projects
//! without scanning the filesystem. Entries are never pruned automatically.
//! A project whose directory disappeared is still listed, flagged as
//! missing.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::result::{DuplicateNameError, Result};

/// Current registry schema version.
pub const REGISTRY_VERSION: u32 = 1;

/// One registered project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryEntry {
    pub name: String,
    /// Absolute project path.
    pub path: PathBuf,
    /// RFC 3339 registration time.
    pub created: String,
    pub archived: bool,
}

impl RegistryEntry {
    /// True when the registered directory no longer exists on disk.
    pub fn is_missing(&self) -> bool {
        !self.path.is_dir()
    }
}

/// Registry file contents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Registry {
    pub version: u32,
    pub projects: Vec<RegistryEntry>,
}

impl Default for Registry {
    fn default() -> Self {
        Self {
            version: REGISTRY_VERSION,
            projects: vec![],
        }
    }
}

impl Registry {
    /// Load the registry at `path`, or an empty one when the file does
    /// not exist yet.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let registry: Registry = serde_json::from_str(&content)?;
        Ok(registry)
    }

    /// Write the registry to `path`, creating parent directories on
    /// demand.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Add a project. Names are unique, so registering a taken name
    /// fails.
    pub fn register(&mut self, name: &str, path: &Path) -> Result<()> {
        if let Some(existing) = self.find(name) {
            return Err(DuplicateNameError {
                name: name.to_string(),
                path: existing.path.clone(),
            }
            .into());
        }

        self.projects.push(RegistryEntry {
            name: name.to_string(),
            path: path.to_path_buf(),
            created: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            archived: false,
        });

        Ok(())
    }

    pub fn find(&self, name: &str) -> Option<&RegistryEntry> {
        self.projects.iter().find(|p| p.name == name)
    }

    pub fn find_mut(&mut self, name: &str) -> Option<&mut RegistryEntry> {
        self.projects.iter_mut().find(|p| p.name == name)
    }

    /// Look an entry up by its registered path.
    pub fn find_by_path(&self, path: &Path) -> Option<&RegistryEntry> {
        self.projects.iter().find(|p| p.path == path)
    }
}
