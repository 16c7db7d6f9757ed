//! List command implementation.

use std::path::Path;

use crate::{config::Config, registry::Registry, result::Result};

/// Everything `dsman list` was asked to do.
#[derive(Debug, Clone, Default)]
pub struct ListRequest {
    /// Include archived projects.
    pub all: bool,
}

/// Print registered projects sorted by name.
pub fn execute(
    req: ListRequest,
    _config: &Config,
    registry_path: &Path,
) -> Result<()> {
    let registry = Registry::load(registry_path)?;

    for line in render(&registry, req.all) {
        println!("{line}");
    }

    Ok(())
}

fn render(registry: &Registry, all: bool) -> Vec<String> {
    let mut entries = registry
        .projects
        .iter()
        .filter(|entry| all || !entry.archived)
        .collect::<Vec<_>>();

    if entries.is_empty() {
        return vec![
            "no projects registered yet; create one with `dsman new <name>`"
                .to_string(),
        ];
    }

    entries.sort_by(|a, b| a.name.cmp(&b.name));

    let width = entries
        .iter()
        .map(|entry| entry.name.len())
        .max()
        .unwrap_or(0);

    entries
        .iter()
        .map(|entry| {
            let mut line = format!(
                "{:width$}  {}  {}",
                entry.name,
                entry.created,
                entry.path.display(),
            );

            if entry.archived {
                line.push_str("  (archived)");
            }

            if entry.is_missing() {
                line.push_str("  (missing)");
            }

            line
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn registry_with(names: &[&str], root: &Path) -> Registry {
        let mut registry = Registry::default();
        for name in names {
            let path = root.join(name);
            fs::create_dir_all(&path).unwrap();
            registry.register(name, &path).unwrap();
        }
        registry
    }

    #[test]
    fn empty_registry_prints_a_hint() {
        let lines = render(&Registry::default(), false);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("dsman new"));
    }

    #[test]
    fn projects_are_sorted_by_name() {
        let tmp = TempDir::new().unwrap();
        let registry = registry_with(&["zebra", "alpha"], tmp.path());

        let lines = render(&registry, false);
        assert!(lines[0].starts_with("alpha"));
        assert!(lines[1].starts_with("zebra"));
    }

    #[test]
    fn archived_projects_are_hidden_unless_all() {
        let tmp = TempDir::new().unwrap();
        let mut registry = registry_with(&["alpha", "beta"], tmp.path());
        registry.find_mut("beta").unwrap().archived = true;

        let lines = render(&registry, false);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("alpha"));

        let lines = render(&registry, true);
        assert_eq!(lines.len(), 2);
        assert!(lines[1].contains("(archived)"));
    }

    #[test]
    fn moved_projects_are_marked_missing() {
        let tmp = TempDir::new().unwrap();
        let registry = registry_with(&["alpha"], tmp.path());
        fs::remove_dir_all(tmp.path().join("alpha")).unwrap();

        let lines = render(&registry, false);
        assert!(lines[0].contains("(missing)"));
    }
}
