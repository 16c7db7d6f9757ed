//! Python environment backends and provisioning.

use clap::ValueEnum;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::env::{
    conda::CondaProvisioner, traits::EnvProvisioner, venv::VenvProvisioner,
};

pub mod conda;
pub mod detect;
pub mod traits;
pub mod venv;

/// Supported environment backends
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    JsonSchema,
    ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum EnvBackend {
    /// Stdlib venv module
    #[default]
    Venv,
    /// Conda prefix environment
    Conda,
    /// No environment management
    None,
}

impl EnvBackend {
    pub fn name(&self) -> &str {
        match self {
            EnvBackend::Venv => "venv",
            EnvBackend::Conda => "conda",
            EnvBackend::None => "none",
        }
    }

    /// Default environment location relative to the project root.
    pub fn default_env_path(&self) -> &str {
        match self {
            EnvBackend::Venv => ".venv",
            EnvBackend::Conda => ".conda",
            EnvBackend::None => "",
        }
    }

    /// Provisioner for this backend, or `None` when environments are
    /// unmanaged.
    pub fn provisioner(&self) -> Option<Box<dyn EnvProvisioner>> {
        match self {
            EnvBackend::Venv => Some(Box::new(VenvProvisioner::new())),
            EnvBackend::Conda => Some(Box::new(CondaProvisioner::new())),
            EnvBackend::None => None,
        }
    }
}

impl fmt::Display for EnvBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_lowercase() {
        #[derive(Deserialize)]
        struct Holder {
            backend: EnvBackend,
        }

        let holder: Holder = toml::from_str(r#"backend = "conda""#).unwrap();
        assert_eq!(holder.backend, EnvBackend::Conda);

        let json = serde_json::to_string(&EnvBackend::Venv).unwrap();
        assert_eq!(json, r#""venv""#);
    }

    #[test]
    fn none_backend_has_no_provisioner() {
        assert!(EnvBackend::None.provisioner().is_none());
        assert!(EnvBackend::Venv.provisioner().is_some());
        assert!(EnvBackend::Conda.provisioner().is_some());
    }

    #[test]
    fn default_is_venv() {
        assert_eq!(EnvBackend::default(), EnvBackend::Venv);
        assert_eq!(EnvBackend::Venv.default_env_path(), ".venv");
    }
}
