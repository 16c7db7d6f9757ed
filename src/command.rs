//! Command execution for dsman.
//!
//! One module per subcommand. Each exposes an `execute` function taking a
//! request struct built from the CLI arguments plus the loaded
//! configuration and the registry location, so tests can drive commands
//! without going through argument parsing.
//!
//! Progress and warnings go through the `log` macros; the output a user
//! asked for goes to stdout.

/// Shared helpers for resolving projects and state files.
pub mod common;

/// `dsman archive`: hide or restore a project.
pub mod archive;

/// `dsman init`: adopt an existing directory.
pub mod init;

/// `dsman list`: print registered projects.
pub mod list;

/// `dsman new`: scaffold a fresh project.
pub mod new;

/// `dsman profiles`: describe the built-in layouts.
pub mod profiles;

/// `dsman snapshot`: commit and tag the current state.
pub mod snapshot;

/// `dsman status`: report one project's state.
pub mod status;
