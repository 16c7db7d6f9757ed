//! Conda environment provisioning.

use color_eyre::eyre::eyre;
use log::*;
use std::{path::PathBuf, process::Command};

use crate::{
    env::{
        EnvBackend,
        traits::{EnvProvisioner, ProvisionOutcome, ProvisionRequest},
    },
    result::Result,
};

/// Environment spec file the scaffold writes for conda projects.
pub const ENVIRONMENT_FILE: &str = "environment.yml";

/// Provisions prefix environments with `conda env create`.
pub struct CondaProvisioner {
    binary: Option<PathBuf>,
}

impl CondaProvisioner {
    pub fn new() -> Self {
        Self { binary: None }
    }

    /// Use a specific conda binary instead of searching PATH.
    #[cfg(test)]
    pub fn with_binary(binary: PathBuf) -> Self {
        Self {
            binary: Some(binary),
        }
    }

    fn resolve_binary(&self) -> Result<PathBuf> {
        if let Some(binary) = &self.binary {
            return Ok(binary.clone());
        }

        // mamba is a drop-in replacement and much faster when present.
        which::which("mamba")
            .or_else(|_| which::which("conda"))
            .map_err(|_| eyre!("neither mamba nor conda found on PATH"))
    }
}

impl Default for CondaProvisioner {
    fn default() -> Self {
        Self::new()
    }
}

impl EnvProvisioner for CondaProvisioner {
    fn backend(&self) -> EnvBackend {
        EnvBackend::Conda
    }

    fn provision(&self, req: &ProvisionRequest) -> Result<ProvisionOutcome> {
        let binary = self.resolve_binary()?;
        let env_dir = req.project_root.join(&req.env_path);
        let spec_file = req.project_root.join(ENVIRONMENT_FILE);

        if !spec_file.is_file() {
            return Err(eyre!(
                "cannot create conda environment: {} not found in {}",
                ENVIRONMENT_FILE,
                req.project_root.display(),
            ));
        }

        info!(
            "creating conda environment at {} from {}",
            env_dir.display(),
            ENVIRONMENT_FILE
        );

        let output = Command::new(&binary)
            .args(["env", "create", "--yes", "--file", ENVIRONMENT_FILE, "--prefix"])
            .arg(&req.env_path)
            .current_dir(&req.project_root)
            .output()?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(eyre!(
                "{} env create failed: {}",
                binary.display(),
                stderr.trim(),
            ));
        }

        Ok(ProvisionOutcome {
            env_dir,
            tool: format!("{} env create", binary.display()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn requires_environment_file() {
        let tmp = tempfile::tempdir().unwrap();

        let provisioner = CondaProvisioner::with_binary(PathBuf::from("/usr/bin/true"));
        let req = ProvisionRequest {
            project_root: tmp.path().to_path_buf(),
            env_path: ".conda".into(),
            python_version: "3.12".into(),
        };

        let err = provisioner.provision(&req).unwrap_err();
        assert!(err.to_string().contains(ENVIRONMENT_FILE));
    }

    #[test]
    fn reports_missing_binary() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join(ENVIRONMENT_FILE), "dependencies: []\n").unwrap();

        let provisioner = CondaProvisioner::with_binary(PathBuf::from("/definitely/not/conda"));
        let req = ProvisionRequest {
            project_root: tmp.path().to_path_buf(),
            env_path: ".conda".into(),
            python_version: "3.12".into(),
        };

        assert!(provisioner.provision(&req).is_err());
    }

    #[test]
    fn backend_is_conda() {
        assert_eq!(CondaProvisioner::new().backend(), EnvBackend::Conda);
    }
}
