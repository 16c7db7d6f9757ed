//! Archive command implementation.

use color_eyre::eyre::eyre;
use log::*;
use std::path::Path;

use crate::{config::Config, manifest, registry::Registry, result::Result};

/// Everything `dsman archive` was asked to do.
#[derive(Debug, Clone, Default)]
pub struct ArchiveRequest {
    pub name: String,
    /// Clear the archived flag instead of setting it.
    pub restore: bool,
}

/// Mark a project archived, or restore it.
///
/// The registry is authoritative. The flag in the project's manifest is
/// kept in sync on a best-effort basis so the state survives when the
/// directory moves between machines.
pub fn execute(
    req: ArchiveRequest,
    _config: &Config,
    registry_path: &Path,
) -> Result<()> {
    let archived = !req.restore;
    let verb = if archived { "archived" } else { "restored" };

    let mut registry = Registry::load(registry_path)?;
    let entry = registry.find_mut(&req.name).ok_or_else(|| {
        eyre!("no project named '{}' is registered", req.name)
    })?;

    if entry.archived == archived {
        println!("project '{}' is already {verb}", req.name);
        return Ok(());
    }

    entry.archived = archived;
    let root = entry.path.clone();
    registry.save(registry_path)?;

    if let Err(err) = manifest::set_archived(&root, archived) {
        warn!(
            "registry updated, but the manifest at {} could not be: {err:#}",
            root.display()
        );
    }

    println!("{verb} project '{}'", req.name);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{manifest::ProjectManifest, test_helpers};
    use std::fs;
    use tempfile::TempDir;

    fn archive(name: &str, restore: bool, registry_path: &Path) -> Result<()> {
        execute(
            ArchiveRequest {
                name: name.to_string(),
                restore,
            },
            &test_helpers::create_test_config(),
            registry_path,
        )
    }

    fn managed_project(tmp: &TempDir, name: &str) -> std::path::PathBuf {
        let registry_path = tmp.path().join("registry.json");
        let root = tmp.path().join(name);
        fs::create_dir_all(&root).unwrap();
        fs::write(
            root.join(crate::manifest::MANIFEST_FILE),
            format!("[project]\nname = \"{name}\"\n"),
        )
        .unwrap();

        let mut registry = Registry::default();
        registry.register(name, &root).unwrap();
        registry.save(&registry_path).unwrap();

        registry_path
    }

    #[test_log::test]
    fn archives_registry_and_manifest() {
        let tmp = TempDir::new().unwrap();
        let registry_path = managed_project(&tmp, "churn");

        archive("churn", false, &registry_path).unwrap();

        let registry = Registry::load(&registry_path).unwrap();
        assert!(registry.find("churn").unwrap().archived);

        let manifest = ProjectManifest::load(&tmp.path().join("churn")).unwrap();
        assert!(manifest.project.archived);
    }

    #[test_log::test]
    fn restore_round_trips() {
        let tmp = TempDir::new().unwrap();
        let registry_path = managed_project(&tmp, "churn");

        archive("churn", false, &registry_path).unwrap();
        archive("churn", true, &registry_path).unwrap();

        let registry = Registry::load(&registry_path).unwrap();
        assert!(!registry.find("churn").unwrap().archived);

        let manifest = ProjectManifest::load(&tmp.path().join("churn")).unwrap();
        assert!(!manifest.project.archived);
    }

    #[test_log::test]
    fn archiving_twice_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let registry_path = managed_project(&tmp, "churn");

        archive("churn", false, &registry_path).unwrap();
        archive("churn", false, &registry_path).unwrap();

        let registry = Registry::load(&registry_path).unwrap();
        assert!(registry.find("churn").unwrap().archived);
    }

    #[test_log::test]
    fn missing_directory_still_updates_registry() {
        let tmp = TempDir::new().unwrap();
        let registry_path = managed_project(&tmp, "churn");
        fs::remove_dir_all(tmp.path().join("churn")).unwrap();

        archive("churn", false, &registry_path).unwrap();

        let registry = Registry::load(&registry_path).unwrap();
        assert!(registry.find("churn").unwrap().archived);
    }

    #[test_log::test]
    fn unknown_name_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let registry_path = tmp.path().join("registry.json");

        let report = archive("ghost", false, &registry_path).unwrap_err();

        assert!(report.to_string().contains("ghost"));
    }
}
