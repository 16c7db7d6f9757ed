//! Project creation command implementation.

use log::*;
use std::{
    env, fs,
    path::{Path, PathBuf},
};

use crate::{
    cli,
    command::common,
    config::Config,
    env::{
        EnvBackend,
        traits::{EnvProvisioner, ProvisionRequest},
    },
    manifest,
    paths,
    registry::Registry,
    repo::Repository,
    result::{DuplicateNameError, ProjectExistsError, Result},
    scaffold::{
        Scaffolder,
        context::{ProjectSpec, ProjectSpecBuilder},
        profile::{Profile, package_slug},
    },
};

/// Everything `dsman new` was asked to do.
#[derive(Debug, Clone, Default)]
pub struct NewRequest {
    pub name: String,
    /// Parent directory override.
    pub parent: Option<PathBuf>,
    pub description: String,
    pub profile: Option<Profile>,
    pub license: Option<String>,
    pub python: Option<String>,
    pub env: Option<EnvBackend>,
    pub remote: Option<String>,
    pub no_git: bool,
}

/// Create a project: scaffold, git, environment, registration.
pub fn execute(
    req: NewRequest,
    config: &Config,
    registry_path: &Path,
) -> Result<()> {
    execute_with(req, config, registry_path, |backend| backend.provisioner())
}

/// Like [`execute`], with the provisioner lookup injectable for tests.
pub(crate) fn execute_with<F>(
    req: NewRequest,
    config: &Config,
    registry_path: &Path,
    provisioner_for: F,
) -> Result<()>
where
    F: FnOnce(EnvBackend) -> Option<Box<dyn EnvProvisioner>>,
{
    manifest::validate_project_name(&req.name)?;

    if let Some(remote) = &req.remote {
        cli::validate_remote_url(remote)?;
    }

    // Refuse duplicates before any filesystem work.
    let mut registry = Registry::load(registry_path)?;
    if let Some(existing) = registry.find(&req.name) {
        return Err(DuplicateNameError {
            name: req.name.clone(),
            path: existing.path.clone(),
        }
        .into());
    }

    let parent = resolve_parent(&req, config)?;
    let root = parent.join(&req.name);

    if root.exists() {
        return Err(ProjectExistsError {
            name: req.name.clone(),
            path: root,
        }
        .into());
    }

    let spec = build_spec(&req, config)?;

    info!("creating project '{}' at {}", req.name, root.display());
    fs::create_dir_all(&root)?;
    Scaffolder::new(spec.clone(), &config.scaffold)?.write_tree(&root)?;

    if config.git.enabled && !req.no_git {
        if let Err(err) = setup_git(&root, config, req.remote.as_deref()) {
            warn!("git setup failed: {err:#}");
        }
    }

    if let Some(provisioner) = provisioner_for(spec.env_backend) {
        let provision_req = ProvisionRequest {
            project_root: root.clone(),
            env_path: spec.env_path.clone(),
            python_version: spec.python_version.clone(),
        };

        match provisioner.provision(&provision_req) {
            Ok(outcome) => info!(
                "created {} environment at {}",
                spec.env_backend,
                outcome.env_dir.display()
            ),
            Err(err) => warn!(
                "environment provisioning failed: {err:#}; \
                 create it later with `make env`"
            ),
        }
    }

    registry.register(&req.name, &root)?;
    registry.save(registry_path)?;

    println!("created project '{}' at {}", req.name, root.display());

    Ok(())
}

/// Pick the parent directory: flag, then `projects_root`, then cwd.
fn resolve_parent(req: &NewRequest, config: &Config) -> Result<PathBuf> {
    match &req.parent {
        Some(parent) => paths::absolutize(parent),
        None if !config.projects_root.is_empty() => {
            paths::absolutize(&paths::expand_home(&config.projects_root))
        }
        None => Ok(env::current_dir()?),
    }
}

fn build_spec(req: &NewRequest, config: &Config) -> Result<ProjectSpec> {
    let env_backend = req.env.unwrap_or(config.env_backend);

    let spec = ProjectSpecBuilder::default()
        .name(req.name.clone())
        .package(package_slug(&req.name))
        .description(req.description.clone())
        .author(config.author.clone())
        .license(
            req.license
                .clone()
                .unwrap_or_else(|| config.license.clone()),
        )
        .created(common::today())
        .profile(req.profile.unwrap_or(config.profile))
        .python_version(
            req.python
                .clone()
                .unwrap_or_else(|| config.python_version.clone()),
        )
        .env_backend(env_backend)
        .env_path(env_backend.default_env_path())
        .build()?;

    Ok(spec)
}

fn setup_git(root: &Path, config: &Config, remote: Option<&str>) -> Result<()> {
    let repo = Repository::init(root, &config.git.default_branch)?;
    repo.add_all()?;
    repo.commit(&config.git.commit_message)?;

    if let Some(remote) = remote {
        repo.add_remote(remote)?;
    }

    Ok(())
}
