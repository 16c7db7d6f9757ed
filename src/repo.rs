//! Git repository operations for project scaffolding and snapshots.
//!
//! A thin wrapper around `git2` covering what dsman needs:
//!
//! - Repository initialization with a configurable initial branch
//! - Staging and committing the scaffold
//! - Annotated snapshot tags and lookup of the latest one
//! - Remote attachment and a status summary for `status`
//!
//! Everything runs against the embedded libgit2. No git binary is
//! required.

use color_eyre::eyre::Context;
use git2::Oid;
use log::*;
use regex::Regex;
use std::path::Path;

use crate::result::Result;

/// Remote name attached when `--remote` is given.
const DEFAULT_REMOTE: &str = "origin";

/// Prefix shared by all snapshot tags.
pub const SNAPSHOT_TAG_PREFIX: &str = "snap-";

/// Repository summary reported by `status`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoStatus {
    /// Current branch name, or a short commit id when detached.
    pub branch: String,
    /// Number of paths that differ from HEAD, untracked included.
    pub dirty_files: usize,
    /// Most recent snapshot tag, when any exist.
    pub last_snapshot: Option<String>,
}

/// High-level interface over a project's git repository.
pub struct Repository {
    repo: git2::Repository,
}

/// Build a commit signature from a git configuration snapshot.
fn signature_from(config: &git2::Config) -> Result<git2::Signature<'static>> {
    let user = config.get_str("user.name").context(
        "git user.name is not set; configure it with \
         `git config --global user.name`",
    )?;
    let email = config.get_str("user.email").context(
        "git user.email is not set; configure it with \
         `git config --global user.email`",
    )?;
    debug!("using committer: user: {user}, email: {email}");
    Ok(git2::Signature::now(user, email)?)
}

impl Repository {
    /// Initialize a repository at `path` with the given initial branch.
    pub fn init(path: &Path, default_branch: &str) -> Result<Self> {
        info!("initializing git repository in {}", path.display());
        let mut opts = git2::RepositoryInitOptions::new();
        opts.initial_head(default_branch);
        let repo = git2::Repository::init_opts(path, &opts)?;
        Ok(Self { repo })
    }

    /// Open the repository at `path`.
    pub fn open(path: &Path) -> Result<Self> {
        let repo = git2::Repository::open(path)?;
        Ok(Self { repo })
    }

    /// True when `path` holds a git repository.
    pub fn exists(path: &Path) -> bool {
        git2::Repository::open(path).is_ok()
    }

    /// Stage all changes in the working directory, equivalent to
    /// `git add .`.
    pub fn add_all(&self) -> Result<()> {
        debug!("adding changed files to index");
        let mut index = self.repo.index()?;
        index.add_all(["."], git2::IndexAddOption::DEFAULT, None)?;
        index.write()?;
        Ok(())
    }

    /// Commit the staged changes.
    ///
    /// Author and committer come from the repository's configuration
    /// chain, so repo-local values override the user's global identity.
    /// Works on an unborn branch, producing the root commit.
    pub fn commit(&self, msg: &str) -> Result<Oid> {
        debug!("committing changes with msg: {msg}");
        let config = self.repo.config()?.snapshot()?;
        let committer = signature_from(&config)?;

        let mut index = self.repo.index()?;
        let oid = index.write_tree()?;
        let tree = self.repo.find_tree(oid)?;

        let parent = match self.repo.head() {
            Ok(head) => Some(head.peel_to_commit()?),
            Err(_) => None,
        };
        let parents = parent.iter().collect::<Vec<&git2::Commit>>();

        let commit_oid = self.repo.commit(
            Some("HEAD"),
            &committer,
            &committer,
            msg,
            &tree,
            &parents,
        )?;

        Ok(commit_oid)
    }

    /// Create an annotated tag on HEAD.
    pub fn tag_head(&self, tag: &str, message: &str) -> Result<()> {
        let config = self.repo.config()?.snapshot()?;
        let tagger = signature_from(&config)?;

        let commit = self.repo.head()?.peel_to_commit()?;

        self.repo
            .tag(tag, commit.as_object(), &tagger, message, false)?;

        Ok(())
    }

    /// Attach `url` as the `origin` remote. The remote is recorded, never
    /// contacted.
    pub fn add_remote(&self, url: &str) -> Result<()> {
        info!("attaching remote {DEFAULT_REMOTE}: {url}");
        self.repo.remote(DEFAULT_REMOTE, url)?;
        Ok(())
    }

    /// Find the most recent snapshot tag.
    pub fn latest_snapshot_tag(&self) -> Result<Option<String>> {
        let tag_regex = Regex::new(&format!("^{}", SNAPSHOT_TAG_PREFIX))?;
        let references = self
            .repo
            .references()?
            .filter_map(|r| r.ok())
            .collect::<Vec<git2::Reference>>();

        // Snapshot tags embed a UTC timestamp, so the reference iterator's
        // sorted order is also chronological. Walk it backwards and stop at
        // the first match.
        for reference in references.into_iter().rev() {
            if reference.is_tag()
                && let Some(name) = reference.name()
                && let Some(stripped) = name.strip_prefix("refs/tags/")
                && tag_regex.is_match(stripped)
            {
                return Ok(Some(stripped.to_string()));
            }
        }

        Ok(None)
    }

    /// Number of paths that differ from HEAD, untracked files included.
    pub fn dirty_file_count(&self) -> Result<usize> {
        let mut opts = git2::StatusOptions::new();
        opts.include_untracked(true).recurse_untracked_dirs(true);
        let statuses = self.repo.statuses(Some(&mut opts))?;
        Ok(statuses.len())
    }

    /// Summarize the repository for `status` output.
    pub fn status(&self) -> Result<RepoStatus> {
        let branch = match self.repo.head() {
            Ok(head) if head.is_branch() => {
                head.shorthand().unwrap_or("HEAD").to_string()
            }
            Ok(head) => {
                let id = head.peel_to_commit()?.id().to_string();
                format!("detached at {}", &id[..7.min(id.len())])
            }
            // Unborn branch: initialized but nothing committed yet.
            Err(_) => "(no commits)".to_string(),
        };

        Ok(RepoStatus {
            branch,
            dirty_files: self.dirty_file_count()?,
            last_snapshot: self.latest_snapshot_tag()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn init_with_identity(dir: &Path) -> Repository {
        let repo = Repository::init(dir, "main").unwrap();
        let mut config = repo.repo.config().unwrap();
        config.set_str("user.name", "tester").unwrap();
        config.set_str("user.email", "tester@example.com").unwrap();
        repo
    }

    #[test]
    fn init_commits_on_configured_branch() {
        let tmp = TempDir::new().unwrap();
        let repo = init_with_identity(tmp.path());

        fs::write(tmp.path().join("README.md"), "# hello\n").unwrap();
        repo.add_all().unwrap();
        repo.commit("chore: initial project structure").unwrap();

        let status = repo.status().unwrap();
        assert_eq!(status.branch, "main");
        assert_eq!(status.dirty_files, 0);
        assert_eq!(status.last_snapshot, None);
    }

    #[test]
    fn missing_identity_names_the_missing_key() {
        let tmp = TempDir::new().unwrap();
        let empty = tmp.path().join("gitconfig");
        fs::write(&empty, "").unwrap();

        let config = git2::Config::open(&empty).unwrap();
        let report = signature_from(&config).err().unwrap();
        assert!(report.to_string().contains("user.name"));

        fs::write(&empty, "[user]\n\tname = tester\n").unwrap();
        let config = git2::Config::open(&empty).unwrap();
        let report = signature_from(&config).err().unwrap();
        assert!(report.to_string().contains("user.email"));
    }

    #[test]
    fn unborn_branch_reports_no_commits() {
        let tmp = TempDir::new().unwrap();
        let repo = init_with_identity(tmp.path());

        let status = repo.status().unwrap();
        assert_eq!(status.branch, "(no commits)");
    }

    #[test]
    fn dirty_count_includes_untracked_files() {
        let tmp = TempDir::new().unwrap();
        let repo = init_with_identity(tmp.path());

        fs::write(tmp.path().join("a.txt"), "a").unwrap();
        repo.add_all().unwrap();
        repo.commit("first").unwrap();

        fs::write(tmp.path().join("b.txt"), "b").unwrap();
        assert_eq!(repo.dirty_file_count().unwrap(), 1);
    }

    #[test]
    fn snapshot_tags_sort_and_resolve() {
        let tmp = TempDir::new().unwrap();
        let repo = init_with_identity(tmp.path());

        fs::write(tmp.path().join("a.txt"), "a").unwrap();
        repo.add_all().unwrap();
        repo.commit("first").unwrap();

        repo.tag_head("snap-20260101-000000", "snapshot").unwrap();
        repo.tag_head("snap-20260823-101112", "snapshot").unwrap();
        repo.tag_head("v1.0.0", "release").unwrap();

        let latest = repo.latest_snapshot_tag().unwrap();
        assert_eq!(latest, Some("snap-20260823-101112".to_string()));
    }

    #[test]
    fn attaches_origin_remote() {
        let tmp = TempDir::new().unwrap();
        let repo = init_with_identity(tmp.path());

        repo.add_remote("https://example.com/ada/churn.git").unwrap();

        let remote = repo.repo.find_remote("origin").unwrap();
        assert_eq!(remote.url(), Some("https://example.com/ada/churn.git"));
    }
}
