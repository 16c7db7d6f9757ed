//! Built-in scaffold profiles.
//!
//! A profile is a named directory layout stamped out by `dsman new`. The
//! layouts follow the conventional data-science repository shape: immutable
//! raw data separated from derived data, notebooks separated from the
//! importable source package, and generated artifacts (models, reports) kept
//! out of both.

use clap::ValueEnum;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Named directory layout used when scaffolding a project.
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
pub enum Profile {
    /// Full layout: staged data directories, notebooks, source package,
    /// models, reports, references, docs.
    #[default]
    Standard,
    /// Bare bones: raw data, notebooks, source package.
    Minimal,
    /// Standard plus experiment tracking and literature directories.
    Research,
}

impl Profile {
    /// All built-in profiles, in display order.
    pub fn all() -> [Profile; 3] {
        [Profile::Standard, Profile::Minimal, Profile::Research]
    }

    /// Lowercase name as written in config files and CLI flags.
    pub fn name(&self) -> &'static str {
        match self {
            Profile::Standard => "standard",
            Profile::Minimal => "minimal",
            Profile::Research => "research",
        }
    }

    /// One-line description for `dsman profiles`.
    pub fn description(&self) -> &'static str {
        match self {
            Profile::Standard => {
                "staged data, notebooks, source package, models and reports"
            }
            Profile::Minimal => "raw data, notebooks and a source package",
            Profile::Research => {
                "standard layout plus experiments and literature"
            }
        }
    }

    /// Directory layout for a project whose source package is `package`.
    ///
    /// Paths are relative to the project root, parents before children so
    /// they can be created in order.
    pub fn dirs(&self, package: &str) -> Vec<String> {
        let mut dirs: Vec<String> = match self {
            Profile::Minimal => vec![
                "data/raw".into(),
                "notebooks".into(),
                format!("src/{package}"),
            ],
            Profile::Standard | Profile::Research => vec![
                "data/raw".into(),
                "data/interim".into(),
                "data/processed".into(),
                "data/external".into(),
                "notebooks".into(),
                format!("src/{package}"),
                "models".into(),
                "reports/figures".into(),
                "references".into(),
                "docs".into(),
            ],
        };

        if matches!(self, Profile::Research) {
            dirs.push("experiments".into());
            dirs.push("literature".into());
        }

        dirs
    }

    /// Data directories of this layout, used for `status` statistics.
    pub fn data_dirs(&self) -> Vec<&'static str> {
        match self {
            Profile::Minimal => vec!["data/raw"],
            Profile::Standard | Profile::Research => vec![
                "data/raw",
                "data/interim",
                "data/processed",
                "data/external",
            ],
        }
    }
}

impl std::fmt::Display for Profile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Python package slug for a project name: lowercased, hyphens mapped to
/// underscores.
pub fn package_slug(name: &str) -> String {
    name.to_lowercase().replace('-', "_")
}
