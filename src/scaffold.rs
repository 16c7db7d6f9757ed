//! Project tree scaffolding: profile directories, starter files,
//! manifest.

use color_eyre::eyre::Context;
use log::*;
use std::{fs, path::Path};

use crate::{
    config::ScaffoldConfig,
    env::EnvBackend,
    manifest::MANIFEST_FILE,
    paths::expand_home,
    result::Result,
    scaffold::context::ProjectSpec,
};

pub mod context;
pub mod profile;
pub mod templates;

/// File that keeps otherwise-empty directories under version control.
const GITKEEP: &str = ".gitkeep";

/// Writes the project tree described by a [`ProjectSpec`].
pub struct Scaffolder {
    spec: ProjectSpec,
    extra_dirs: Vec<String>,
    readme_template: String,
}

impl Scaffolder {
    /// Build a scaffolder, loading the README template override when one
    /// is configured.
    pub fn new(
        spec: ProjectSpec,
        scaffold_config: &ScaffoldConfig,
    ) -> Result<Self> {
        let readme_template = if scaffold_config.readme_template.is_empty() {
            templates::README.to_string()
        } else {
            let path = expand_home(&scaffold_config.readme_template);
            fs::read_to_string(&path).with_context(|| {
                format!("failed to read readme template {}", path.display())
            })?
        };

        Ok(Self {
            spec,
            extra_dirs: scaffold_config.extra_dirs.clone(),
            readme_template,
        })
    }

    /// Write the project tree under `root`.
    ///
    /// Creates whatever is missing and never overwrites an existing file,
    /// so adopting a half-populated directory is safe. Returns the
    /// relative paths actually written.
    pub fn write_tree(&self, root: &Path) -> Result<Vec<String>> {
        let mut written = vec![];

        let mut dirs = self.spec.profile.dirs(&self.spec.package);
        dirs.extend(self.extra_dirs.iter().cloned());

        for dir in dirs.iter() {
            let path = root.join(dir);
            if !path.is_dir() {
                fs::create_dir_all(&path).with_context(|| {
                    format!("failed to create {}", path.display())
                })?;
                written.push(dir.clone());
            }
        }

        let readme = self.render(&self.readme_template)?;
        self.write_if_missing(root, "README.md", &readme, &mut written)?;

        let gitignore = self.render(templates::GITIGNORE)?;
        self.write_if_missing(root, ".gitignore", &gitignore, &mut written)?;

        let requirements = self.render(templates::REQUIREMENTS)?;
        self.write_if_missing(
            root,
            "requirements.txt",
            &requirements,
            &mut written,
        )?;

        let makefile = self.render(templates::MAKEFILE)?;
        self.write_if_missing(root, "Makefile", &makefile, &mut written)?;

        let init_py = self.render(templates::INIT_PY)?;
        let init_path = format!("src/{}/__init__.py", self.spec.package);
        self.write_if_missing(root, &init_path, &init_py, &mut written)?;

        if self.spec.env_backend == EnvBackend::Conda {
            let environment = self.render(templates::ENVIRONMENT_YML)?;
            self.write_if_missing(
                root,
                crate::env::conda::ENVIRONMENT_FILE,
                &environment,
                &mut written,
            )?;
        }

        let manifest = toml::to_string_pretty(&self.spec.manifest())?;
        self.write_if_missing(root, MANIFEST_FILE, &manifest, &mut written)?;

        // Keep empty directories once everything else is on disk.
        for dir in dirs.iter() {
            let path = root.join(dir);
            if path.is_dir() && dir_is_empty(&path)? {
                fs::write(path.join(GITKEEP), "")?;
                written.push(format!("{dir}/{GITKEEP}"));
            }
        }

        Ok(written)
    }

    fn render(&self, template: &str) -> Result<String> {
        let context = self.spec.context()?;
        Ok(tera::Tera::one_off(template, &context, false)?)
    }

    fn write_if_missing(
        &self,
        root: &Path,
        rel: &str,
        content: &str,
        written: &mut Vec<String>,
    ) -> Result<()> {
        let path = root.join(rel);

        if path.exists() {
            debug!("keeping existing {rel}");
            return Ok(());
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(&path, content)
            .with_context(|| format!("failed to write {}", path.display()))?;
        written.push(rel.to_string());

        Ok(())
    }
}

fn dir_is_empty(path: &Path) -> Result<bool> {
    Ok(fs::read_dir(path)?.next().is_none())
}
