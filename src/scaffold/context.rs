//! Render context shared by every scaffold template.

use derive_builder::Builder;
use serde::Serialize;

use crate::{
    env::EnvBackend,
    manifest::{INITIAL_VERSION, ProjectManifest, ProjectTable, PythonTable},
    result::Result,
    scaffold::profile::Profile,
};

/// Everything the scaffold needs to know about the project being created.
///
/// Assembled by the `new` and `init` commands from configuration plus CLI
/// flags, then serialized straight into the Tera context, so template
/// placeholders and field names stay in lockstep.
#[derive(Debug, Clone, Serialize, Builder)]
#[builder(setter(into))]
pub struct ProjectSpec {
    /// Project name as given on the command line.
    pub name: String,
    /// Python package slug derived from the name.
    pub package: String,
    pub description: String,
    pub author: String,
    pub license: String,
    /// ISO date of creation.
    pub created: String,
    pub profile: Profile,
    pub python_version: String,
    pub env_backend: EnvBackend,
    /// Environment location relative to the project root.
    pub env_path: String,
}

impl ProjectSpec {
    /// Tera context exposing every field of the spec.
    pub fn context(&self) -> Result<tera::Context> {
        Ok(tera::Context::from_serialize(self)?)
    }

    /// The manifest recorded for this project.
    pub fn manifest(&self) -> ProjectManifest {
        ProjectManifest {
            project: ProjectTable {
                name: self.name.clone(),
                version: INITIAL_VERSION.into(),
                description: self.description.clone(),
                created: self.created.clone(),
                profile: self.profile,
                license: self.license.clone(),
                archived: false,
            },
            python: PythonTable {
                version: self.python_version.clone(),
                env_backend: self.env_backend,
                env_path: self.env_path.clone(),
            },
        }
    }
}
