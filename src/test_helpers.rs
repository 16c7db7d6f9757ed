//! Helpers shared by the unit tests.

use nanoid::nanoid;
use std::path::Path;

use crate::config::Config;

/// Configuration for tests: defaults plus a fixed author so rendered
/// templates are deterministic.
pub fn create_test_config() -> Config {
    Config {
        author: "Test Author".into(),
        ..Config::default()
    }
}

/// Give the repository at `path` a repo-local committer identity so
/// commits work without relying on global git configuration.
pub fn set_repo_identity(path: &Path) {
    let repo = git2::Repository::open(path).unwrap();
    let mut config = repo.config().unwrap();
    config.set_str("user.name", "Test Author").unwrap();
    config.set_str("user.email", "test@example.com").unwrap();
}

/// Project name that will not collide across tests.
pub fn unique_name(prefix: &str) -> String {
    format!("{prefix}-{}", nanoid!())
}
