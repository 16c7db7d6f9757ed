//! Provisioner abstraction for Python environments.
//!
//! Commands depend on this trait rather than on concrete provisioners so
//! tests can run without a Python or conda installation on the machine.

use std::path::PathBuf;

use crate::{env::EnvBackend, result::Result};

/// Request to provision an environment inside a project directory.
#[derive(Debug, Clone)]
pub struct ProvisionRequest {
    /// Project root directory.
    pub project_root: PathBuf,
    /// Environment location relative to the project root.
    pub env_path: String,
    /// Requested interpreter version, e.g. "3.12".
    pub python_version: String,
}

/// What a provisioner actually created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionOutcome {
    /// Absolute path of the environment directory.
    pub env_dir: PathBuf,
    /// Tool invocation used, for the log line.
    pub tool: String,
}

/// Creates a Python environment for a project.
#[cfg_attr(test, mockall::automock)]
pub trait EnvProvisioner {
    /// Backend this provisioner implements.
    fn backend(&self) -> EnvBackend;

    /// Create the environment described by `req`.
    fn provision(&self, req: &ProvisionRequest) -> Result<ProvisionOutcome>;
}
