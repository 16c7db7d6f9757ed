//! Init command implementation for existing directories.

use color_eyre::eyre::eyre;
use log::*;
use std::path::{Path, PathBuf};

use crate::{
    command::common,
    config::Config,
    env::{EnvBackend, detect},
    manifest::{self, MANIFEST_FILE},
    paths,
    registry::Registry,
    result::{DuplicateNameError, Result},
    scaffold::{
        Scaffolder,
        context::ProjectSpecBuilder,
        profile::{Profile, package_slug},
    },
};

/// Everything `dsman init` was asked to do.
#[derive(Debug, Clone, Default)]
pub struct InitRequest {
    pub path: Option<PathBuf>,
    pub name: Option<String>,
    pub profile: Option<Profile>,
}

/// Bring an existing directory under management.
///
/// Fills in the parts of the scaffold that are missing and records the
/// project in the registry. Existing files are never overwritten and an
/// existing git repository is left alone.
pub fn execute(
    req: InitRequest,
    config: &Config,
    registry_path: &Path,
) -> Result<()> {
    let root = match &req.path {
        Some(path) => paths::absolutize(path)?,
        None => std::env::current_dir()?,
    };

    if !root.is_dir() {
        return Err(eyre!("{} is not a directory", root.display()));
    }

    if manifest::is_project_root(&root) {
        return Err(eyre!(
            "{} is already managed ({MANIFEST_FILE} exists)",
            root.display()
        ));
    }

    let name = match &req.name {
        Some(name) => name.clone(),
        None => directory_name(&root)?,
    };
    manifest::validate_project_name(&name)?;

    let mut registry = Registry::load(registry_path)?;
    if let Some(existing) = registry.find(&name) {
        return Err(DuplicateNameError {
            name,
            path: existing.path.clone(),
        }
        .into());
    }

    // Keep whatever environment the directory already uses.
    let detection = detect::detect_backend(&root);
    for evidence in &detection.evidence {
        debug!("environment evidence: {evidence}");
    }
    info!(
        "detected environment backend: {} (confidence {:.1})",
        detection.backend, detection.confidence
    );

    let env_path = detected_env_path(&root, detection.backend);

    let spec = ProjectSpecBuilder::default()
        .name(name.clone())
        .package(package_slug(&name))
        .description(String::new())
        .author(config.author.clone())
        .license(config.license.clone())
        .created(common::today())
        .profile(req.profile.unwrap_or(config.profile))
        .python_version(config.python_version.clone())
        .env_backend(detection.backend)
        .env_path(env_path)
        .build()?;

    info!("initializing project '{name}' at {}", root.display());
    let written = Scaffolder::new(spec, &config.scaffold)?.write_tree(&root)?;
    debug!("wrote {} new files", written.len());

    if let Some(entry) = registry.find_by_path(&root) {
        println!(
            "path already registered as '{}'; manifest added",
            entry.name
        );
    } else {
        registry.register(&name, &root)?;
        registry.save(registry_path)?;
    }

    println!("initialized project '{name}' at {}", root.display());

    Ok(())
}

fn directory_name(root: &Path) -> Result<String> {
    root.file_name()
        .and_then(|name| name.to_str())
        .map(str::to_string)
        .ok_or_else(|| {
            eyre!("cannot derive a project name from {}", root.display())
        })
}

/// Prefer the directory the detector actually found over the default.
fn detected_env_path(root: &Path, backend: EnvBackend) -> String {
    match backend {
        EnvBackend::Venv => {
            for candidate in ["venv", ".venv"] {
                if root.join(candidate).join("pyvenv.cfg").is_file() {
                    return candidate.to_string();
                }
            }
            backend.default_env_path().to_string()
        }
        _ => backend.default_env_path().to_string(),
    }
}
