//! Error handling and result types for dsman.
//!
//! All fallible functions in dsman return the [`Result`] type defined here,
//! a re-export of `color_eyre`'s result. Context is attached with
//! `.context()` as errors propagate toward `main`, where `color_eyre`
//! renders them with suggestions and optional backtraces.
//!
//! A handful of failures are interesting to callers beyond their message,
//! because commands branch on them and tests assert on them. Those get
//! concrete types below. They convert into reports through `?` like any
//! other `std::error::Error`.

use std::path::PathBuf;

use thiserror::Error;

/// Standard result type used throughout dsman.
pub type Result<T> = color_eyre::eyre::Result<T>;

/// A project directory already occupies the target path.
#[derive(Debug, Error)]
#[error("project '{name}' already exists at {}", path.display())]
pub struct ProjectExistsError {
    /// Requested project name.
    pub name: String,
    /// The occupied path.
    pub path: PathBuf,
}

/// The resolved directory is not a dsman project (no manifest).
#[derive(Debug, Error)]
#[error("'{}' is not a dsman project: no {} found", path.display(), crate::manifest::MANIFEST_FILE)]
pub struct NotAProjectError {
    /// The directory that was inspected.
    pub path: PathBuf,
}

/// The registry already holds a project under this name.
#[derive(Debug, Error)]
#[error("a project named '{name}' is already registered (at {})", path.display())]
pub struct DuplicateNameError {
    /// The conflicting name.
    pub name: String,
    /// Path of the existing registration.
    pub path: PathBuf,
}
