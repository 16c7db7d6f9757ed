//! Virtual environment provisioning via the stdlib `venv` module.

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

/// Provisions environments with `python -m venv`.
pub struct VenvProvisioner {
    interpreter: Option<PathBuf>,
}

impl VenvProvisioner {
    pub fn new() -> Self {
        Self { interpreter: None }
    }

    /// Use a specific interpreter instead of searching PATH.
    #[cfg(test)]
    pub fn with_interpreter(interpreter: PathBuf) -> Self {
        Self {
            interpreter: Some(interpreter),
        }
    }

    fn resolve_interpreter(&self, version: &str) -> Result<PathBuf> {
        if let Some(interpreter) = &self.interpreter {
            return Ok(interpreter.clone());
        }

        // Prefer a version-pinned binary when one is installed.
        let pinned = format!("python{version}");

        which::which(&pinned)
            .or_else(|_| which::which("python3"))
            .or_else(|_| which::which("python"))
            .map_err(|_| {
                eyre!("no python interpreter found on PATH: tried {pinned}, python3, python")
            })
    }
}

impl Default for VenvProvisioner {
    fn default() -> Self {
        Self::new()
    }
}

impl EnvProvisioner for VenvProvisioner {
    fn backend(&self) -> EnvBackend {
        EnvBackend::Venv
    }

    fn provision(&self, req: &ProvisionRequest) -> Result<ProvisionOutcome> {
        let interpreter = self.resolve_interpreter(&req.python_version)?;
        let env_dir = req.project_root.join(&req.env_path);

        info!(
            "creating virtual environment at {} with {}",
            env_dir.display(),
            interpreter.display()
        );

        let output = Command::new(&interpreter)
            .args(["-m", "venv", &req.env_path])
            .current_dir(&req.project_root)
            .output()?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(eyre!(
                "{} -m venv failed: {}",
                interpreter.display(),
                stderr.trim(),
            ));
        }

        Ok(ProvisionOutcome {
            env_dir,
            tool: format!("{} -m venv", interpreter.display()),
        })
    }
}
