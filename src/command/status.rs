//! Status command implementation.

use log::*;
use std::path::{Path, PathBuf};

use crate::{
    command::common::{self, ResolvedProject},
    config::Config,
    env::EnvBackend,
    inspect,
    registry::Registry,
    repo::{RepoStatus, Repository},
    result::Result,
};

/// Everything `dsman status` was asked to do.
#[derive(Debug, Clone, Default)]
pub struct StatusRequest {
    pub name: Option<String>,
    pub path: Option<PathBuf>,
}

/// Print a one-screen report for a project.
pub fn execute(
    req: StatusRequest,
    _config: &Config,
    registry_path: &Path,
) -> Result<()> {
    let registry = Registry::load(registry_path)?;
    let project = common::resolve_project(
        &registry,
        req.name.as_deref(),
        req.path.as_deref(),
    )?;

    let git = if Repository::exists(&project.root) {
        match Repository::open(&project.root).and_then(|repo| repo.status()) {
            Ok(status) => Some(status),
            Err(err) => {
                warn!("could not read git status: {err:#}");
                None
            }
        }
    } else {
        None
    };

    for line in render(&project, git.as_ref()) {
        println!("{line}");
    }

    Ok(())
}

fn render(project: &ResolvedProject, git: Option<&RepoStatus>) -> Vec<String> {
    let manifest = &project.manifest;
    let mut lines = Vec::new();

    lines.push(format!(
        "project:    {} v{}",
        manifest.project.name, manifest.project.version
    ));
    if !manifest.project.description.is_empty() {
        lines.push(format!("            {}", manifest.project.description));
    }
    if manifest.project.archived {
        lines.push("            (archived)".to_string());
    }

    lines.push(format!("path:       {}", project.root.display()));
    lines.push(format!(
        "profile:    {} ({})",
        manifest.project.profile, manifest.project.license
    ));
    lines.push(format!("created:    {}", manifest.project.created));
    lines.push(format!("python:     {}", manifest.python.version));
    lines.push(env_line(project));
    lines.push(git_line(git));

    for stats in inspect::data_stats(&project.root, manifest.project.profile) {
        lines.push(format!(
            "data:       {:<16} {:>4} files  {}",
            stats.dir,
            stats.files,
            inspect::human_bytes(stats.bytes),
        ));
    }

    lines.push(format!(
        "notebooks:  {}",
        inspect::notebook_count(&project.root)
    ));

    lines
}

fn env_line(project: &ResolvedProject) -> String {
    let python = &project.manifest.python;

    match python.env_backend {
        EnvBackend::None => "env:        unmanaged".to_string(),
        backend => {
            let state = if inspect::env_exists(&project.root, &project.manifest)
            {
                "present"
            } else {
                "missing, run `make env`"
            };
            format!("env:        {} at {} ({state})", backend, python.env_path)
        }
    }
}

fn git_line(git: Option<&RepoStatus>) -> String {
    let Some(status) = git else {
        return "git:        no repository".to_string();
    };

    let changes = match status.dirty_files {
        0 => "clean".to_string(),
        1 => "1 changed file".to_string(),
        n => format!("{n} changed files"),
    };

    let snapshot = match &status.last_snapshot {
        Some(tag) => format!("last snapshot {tag}"),
        None => "no snapshots".to_string(),
    };

    format!("git:        on {}, {changes}, {snapshot}", status.branch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        manifest::{MANIFEST_FILE, ProjectManifest},
        scaffold::profile::Profile,
    };
    use std::fs;
    use tempfile::TempDir;

    fn project_in(tmp: &TempDir) -> ResolvedProject {
        let mut manifest = ProjectManifest::default();
        manifest.project.name = "churn".into();
        manifest.project.created = "2026-08-01".into();
        manifest.project.license = "MIT".into();
        manifest.project.profile = Profile::Minimal;
        manifest.python.version = "3.12".into();

        ResolvedProject {
            root: tmp.path().to_path_buf(),
            manifest,
        }
    }

    #[test]
    fn report_covers_manifest_env_git_and_data() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("data/raw")).unwrap();
        fs::write(tmp.path().join("data/raw/events.csv"), "a,b\n1,2\n").unwrap();
        let project = project_in(&tmp);

        let status = RepoStatus {
            branch: "main".into(),
            dirty_files: 2,
            last_snapshot: Some("snap-20260801-120000".into()),
        };

        let report = render(&project, Some(&status)).join("\n");

        assert!(report.contains("project:    churn v0.1.0"));
        assert!(report.contains("profile:    minimal (MIT)"));
        assert!(report.contains("missing, run `make env`"));
        assert!(report.contains("on main, 2 changed files"));
        assert!(report.contains("last snapshot snap-20260801-120000"));
        assert!(report.contains("data/raw"));
        assert!(report.contains("1 files"));
        assert!(report.contains("notebooks:  0"));
    }

    #[test]
    fn missing_repository_is_reported_not_an_error() {
        let tmp = TempDir::new().unwrap();
        let report = render(&project_in(&tmp), None).join("\n");

        assert!(report.contains("git:        no repository"));
    }

    #[test]
    fn unmanaged_backend_skips_env_location() {
        let tmp = TempDir::new().unwrap();
        let mut project = project_in(&tmp);
        project.manifest.python.env_backend = EnvBackend::None;

        let report = render(&project, None).join("\n");

        assert!(report.contains("env:        unmanaged"));
    }

    #[test]
    fn present_environment_is_detected() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join(".venv")).unwrap();

        let report = render(&project_in(&tmp), None).join("\n");

        assert!(report.contains("env:        venv at .venv (present)"));
    }

    #[test]
    fn end_to_end_against_scaffolded_project() {
        let tmp = TempDir::new().unwrap();
        let registry_path = tmp.path().join("registry.json");
        let root = tmp.path().join("churn");
        fs::create_dir_all(&root).unwrap();

        let manifest = ProjectManifest {
            project: crate::manifest::ProjectTable {
                name: "churn".into(),
                created: "2026-08-01".into(),
                ..Default::default()
            },
            ..Default::default()
        };
        let toml = toml::to_string_pretty(&manifest).unwrap();
        fs::write(root.join(MANIFEST_FILE), toml).unwrap();

        let mut registry = Registry::default();
        registry.register("churn", &root).unwrap();
        registry.save(&registry_path).unwrap();

        execute(
            StatusRequest {
                name: Some("churn".into()),
                path: None,
            },
            &crate::config::Config::default(),
            &registry_path,
        )
        .unwrap();
    }
}
