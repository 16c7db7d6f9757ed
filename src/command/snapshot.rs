//! Snapshot command implementation.

use chrono::Utc;
use color_eyre::eyre::eyre;
use log::*;
use std::path::{Path, PathBuf};

use crate::{
    command::common,
    config::Config,
    registry::Registry,
    repo::{Repository, SNAPSHOT_TAG_PREFIX},
    result::Result,
};

/// Everything `dsman snapshot` was asked to do.
#[derive(Debug, Clone, Default)]
pub struct SnapshotRequest {
    pub name: Option<String>,
    pub path: Option<PathBuf>,
    pub message: Option<String>,
}

/// Commit everything and tag the commit with a timestamped snapshot tag.
pub fn execute(
    req: SnapshotRequest,
    _config: &Config,
    registry_path: &Path,
) -> Result<()> {
    let registry = Registry::load(registry_path)?;
    let project = common::resolve_project(
        &registry,
        req.name.as_deref(),
        req.path.as_deref(),
    )?;

    if !Repository::exists(&project.root) {
        return Err(eyre!(
            "{} has no git repository; snapshots need one",
            project.root.display()
        ));
    }

    let repo = Repository::open(&project.root)?;

    if repo.dirty_file_count()? == 0 {
        println!("working tree is clean; nothing to snapshot");
        return Ok(());
    }

    let tag = snapshot_tag_name();
    let message = req
        .message
        .unwrap_or_else(|| format!("snapshot {tag}"));

    debug!("snapshotting {} as {tag}", project.root.display());
    repo.add_all()?;
    repo.commit(&message)?;
    repo.tag_head(&tag, &message)?;

    println!("created snapshot {tag}");

    Ok(())
}

/// Tag name for a snapshot taken now, UTC so names sort chronologically.
fn snapshot_tag_name() -> String {
    format!(
        "{SNAPSHOT_TAG_PREFIX}{}",
        Utc::now().format("%Y%m%d-%H%M%S")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{manifest::MANIFEST_FILE, test_helpers};
    use std::fs;
    use tempfile::TempDir;

    fn managed_project(tmp: &TempDir, name: &str) -> (PathBuf, PathBuf) {
        let registry_path = tmp.path().join("registry.json");
        let root = tmp.path().join(name);
        fs::create_dir_all(&root).unwrap();
        fs::write(
            root.join(MANIFEST_FILE),
            format!("[project]\nname = \"{name}\"\n"),
        )
        .unwrap();

        let mut registry = Registry::default();
        registry.register(name, &root).unwrap();
        registry.save(&registry_path).unwrap();

        (root, registry_path)
    }

    fn snapshot(
        name: &str,
        registry_path: &Path,
        message: Option<&str>,
    ) -> Result<()> {
        execute(
            SnapshotRequest {
                name: Some(name.to_string()),
                path: None,
                message: message.map(str::to_string),
            },
            &test_helpers::create_test_config(),
            registry_path,
        )
    }

    #[test_log::test]
    fn requires_a_git_repository() {
        let tmp = TempDir::new().unwrap();
        let (_root, registry_path) = managed_project(&tmp, "churn");

        let report = snapshot("churn", &registry_path, None).unwrap_err();

        assert!(report.to_string().contains("git repository"));
    }

    #[test_log::test]
    fn clean_tree_creates_no_tag() {
        let tmp = TempDir::new().unwrap();
        let (root, registry_path) = managed_project(&tmp, "churn");
        let repo = Repository::init(&root, "main").unwrap();
        test_helpers::set_repo_identity(&root);
        repo.add_all().unwrap();
        repo.commit("initial").unwrap();

        snapshot("churn", &registry_path, None).unwrap();

        assert_eq!(repo.latest_snapshot_tag().unwrap(), None);
    }

    #[test_log::test]
    fn dirty_tree_is_committed_and_tagged() {
        let tmp = TempDir::new().unwrap();
        let (root, registry_path) = managed_project(&tmp, "churn");
        let repo = Repository::init(&root, "main").unwrap();
        test_helpers::set_repo_identity(&root);

        snapshot("churn", &registry_path, None).unwrap();

        let tag = repo.latest_snapshot_tag().unwrap().unwrap();
        assert!(tag.starts_with(SNAPSHOT_TAG_PREFIX));
        assert_eq!(repo.dirty_file_count().unwrap(), 0);
    }

    #[test_log::test]
    fn custom_message_lands_on_the_commit() {
        let tmp = TempDir::new().unwrap();
        let (root, registry_path) = managed_project(&tmp, "churn");
        Repository::init(&root, "main").unwrap();
        test_helpers::set_repo_identity(&root);

        snapshot("churn", &registry_path, Some("before refactor")).unwrap();

        let raw = git2::Repository::open(&root).unwrap();
        let head = raw.head().unwrap().peel_to_commit().unwrap();
        assert_eq!(head.message().unwrap(), "before refactor");
    }

    #[test_log::test]
    fn tag_names_sort_chronologically() {
        let first = snapshot_tag_name();
        assert!(first.starts_with("snap-"));
        assert_eq!(first.len(), "snap-YYYYMMDD-HHMMSS".len());
    }
}
