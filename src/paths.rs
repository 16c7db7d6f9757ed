//! Filesystem locations for dsman's own state.
//!
//! Two per-user locations exist outside of project directories: the user
//! configuration file and the project registry. Both resolve through the
//! platform directories (`dirs`) and can be overridden with environment
//! variables, which is also how the test suite redirects them into temp
//! directories.

use std::{
    env,
    ffi::OsString,
    path::{Path, PathBuf},
};

use color_eyre::eyre::eyre;

use crate::result::Result;

/// Environment variable overriding the path of the user config file.
pub const CONFIG_ENV: &str = "DSMAN_CONFIG";

/// Environment variable overriding the directory holding the registry.
pub const DATA_DIR_ENV: &str = "DSMAN_DATA_DIR";

/// Registry filename inside the data directory.
pub const REGISTRY_FILE: &str = "registry.json";

/// Resolve the user config file path.
///
/// Precedence: `--config` argument, `DSMAN_CONFIG`, then
/// `<config dir>/dsman/config.toml`.
pub fn config_file(cli_override: Option<&Path>) -> Result<PathBuf> {
    resolve_config_file(
        cli_override,
        env::var_os(CONFIG_ENV),
        dirs::config_dir(),
    )
}

/// Resolve the directory holding dsman's per-user data (the registry).
///
/// Precedence: `DSMAN_DATA_DIR`, then `<data dir>/dsman`.
pub fn data_dir() -> Result<PathBuf> {
    resolve_data_dir(env::var_os(DATA_DIR_ENV), dirs::data_dir())
}

/// Full path of the registry file.
pub fn registry_file() -> Result<PathBuf> {
    Ok(data_dir()?.join(REGISTRY_FILE))
}

/// Expand a leading `~/` to the user's home directory.
///
/// Values from config files (`projects_root`) may use tilde notation; paths
/// given on the command line are passed through the shell and arrive
/// expanded already.
pub fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }

    PathBuf::from(path)
}

/// Absolute form of `path`, joined onto the current directory when relative.
///
/// Registry entries store absolute paths so projects stay addressable from
/// any working directory. No canonicalization: the path does not have to
/// exist yet when a project is being created.
pub fn absolutize(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    Ok(env::current_dir()?.join(path))
}

fn resolve_config_file(
    cli_override: Option<&Path>,
    env_value: Option<OsString>,
    config_base: Option<PathBuf>,
) -> Result<PathBuf> {
    if let Some(path) = cli_override {
        return Ok(path.to_path_buf());
    }

    if let Some(value) = env_value
        && !value.is_empty()
    {
        return Ok(PathBuf::from(value));
    }

    let base = config_base
        .ok_or(eyre!("unable to determine a configuration directory"))?;

    Ok(base.join("dsman").join("config.toml"))
}

fn resolve_data_dir(
    env_value: Option<OsString>,
    data_base: Option<PathBuf>,
) -> Result<PathBuf> {
    if let Some(value) = env_value
        && !value.is_empty()
    {
        return Ok(PathBuf::from(value));
    }

    let base = data_base.ok_or(eyre!("unable to determine a data directory"))?;

    Ok(base.join("dsman"))
}
