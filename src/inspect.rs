//! Filesystem inspection backing `status`: data directory statistics,
//! notebook counts, environment presence.

use std::path::Path;
use walkdir::WalkDir;

use crate::{
    env::EnvBackend, manifest::ProjectManifest, scaffold::profile::Profile,
};

/// Totals for one data directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirStats {
    /// Directory path relative to the project root.
    pub dir: String,
    pub files: usize,
    pub bytes: u64,
}

/// Count files and bytes under `root/dir`.
///
/// Missing directories count as empty, and `.gitkeep` markers are
/// ignored.
pub fn dir_stats(root: &Path, dir: &str) -> DirStats {
    let mut files = 0;
    let mut bytes = 0;

    for entry in WalkDir::new(root.join(dir))
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
    {
        if entry.file_name() == ".gitkeep" {
            continue;
        }
        files += 1;
        bytes += entry.metadata().map(|m| m.len()).unwrap_or(0);
    }

    DirStats {
        dir: dir.to_string(),
        files,
        bytes,
    }
}

/// Statistics for every data directory of `profile`.
pub fn data_stats(root: &Path, profile: Profile) -> Vec<DirStats> {
    profile
        .data_dirs()
        .iter()
        .map(|dir| dir_stats(root, dir))
        .collect()
}

/// Count notebooks anywhere in the project, checkpoint copies excluded.
pub fn notebook_count(root: &Path) -> usize {
    WalkDir::new(root)
        .into_iter()
        .filter_entry(|e| {
            e.file_name() != ".ipynb_checkpoints" && e.file_name() != ".git"
        })
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            e.path()
                .extension()
                .map(|ext| ext == "ipynb")
                .unwrap_or(false)
        })
        .count()
}

/// True when the manifest's environment directory exists on disk.
pub fn env_exists(root: &Path, manifest: &ProjectManifest) -> bool {
    if manifest.python.env_backend == EnvBackend::None
        || manifest.python.env_path.is_empty()
    {
        return false;
    }

    root.join(&manifest.python.env_path).is_dir()
}

/// Render a byte count with binary units for `status` output.
pub fn human_bytes(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KiB", "MiB", "GiB", "TiB"];

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    if unit == 0 {
        format!("{bytes} B")
    } else {
        format!("{:.1} {}", value, UNITS[unit])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn dir_stats_skips_gitkeep_and_missing_dirs() {
        let tmp = TempDir::new().unwrap();
        let raw = tmp.path().join("data/raw");
        fs::create_dir_all(raw.join("nested")).unwrap();
        fs::write(raw.join(".gitkeep"), "").unwrap();
        fs::write(raw.join("users.csv"), "id,name\n1,ada\n").unwrap();
        fs::write(raw.join("nested/extra.csv"), "x\n").unwrap();

        let stats = dir_stats(tmp.path(), "data/raw");
        assert_eq!(stats.files, 2);
        assert!(stats.bytes > 0);

        let stats = dir_stats(tmp.path(), "data/interim");
        assert_eq!(stats.files, 0);
        assert_eq!(stats.bytes, 0);
    }

    #[test]
    fn notebook_count_ignores_checkpoints() {
        let tmp = TempDir::new().unwrap();
        let notebooks = tmp.path().join("notebooks");
        fs::create_dir_all(notebooks.join(".ipynb_checkpoints")).unwrap();
        fs::write(notebooks.join("explore.ipynb"), "{}").unwrap();
        fs::write(
            notebooks.join(".ipynb_checkpoints/explore-checkpoint.ipynb"),
            "{}",
        )
        .unwrap();
        fs::write(tmp.path().join("notes.md"), "").unwrap();

        assert_eq!(notebook_count(tmp.path()), 1);
    }

    #[test]
    fn env_presence_follows_backend_and_path() {
        let tmp = TempDir::new().unwrap();
        let mut manifest = ProjectManifest::default();
        manifest.python.env_backend = EnvBackend::Venv;
        manifest.python.env_path = ".venv".into();

        assert!(!env_exists(tmp.path(), &manifest));

        fs::create_dir_all(tmp.path().join(".venv")).unwrap();
        assert!(env_exists(tmp.path(), &manifest));

        manifest.python.env_backend = EnvBackend::None;
        assert!(!env_exists(tmp.path(), &manifest));
    }

    #[test]
    fn human_bytes_uses_binary_units() {
        assert_eq!(human_bytes(0), "0 B");
        assert_eq!(human_bytes(512), "512 B");
        assert_eq!(human_bytes(2048), "2.0 KiB");
        assert_eq!(human_bytes(5 * 1024 * 1024), "5.0 MiB");
    }
}
