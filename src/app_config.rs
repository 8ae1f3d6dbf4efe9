use log::{LevelFilter, debug};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::errors::AppError;
use crate::file_utils::FileManager;

/// Application configuration module
/// This module locates the setting directory holding the language-code and
/// style tables and carries the settings shared by the command-line front end.
/// File name of the language-code table
pub const LANGUAGE_FILE: &str = "lan_code.json";

/// File name of the ASS style table
pub const STYLE_FILE: &str = "ass_styles.json";

/// Name of the setting directory placed next to the executable
pub const SETTING_DIR_NAME: &str = "setting";

/// Environment variable overriding the setting directory
pub const SETTING_DIR_ENV: &str = "SMI2ASS_SETTING_DIR";

/// Sub-directory of the user config dir searched for settings
pub const USER_CONFIG_DIR_NAME: &str = "smi2ass";

/// Where the setting directory was found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingSource {
    // @source: Passed by the caller
    Explicit,
    // @source: SMI2ASS_SETTING_DIR
    Environment,
    // @source: Next to the running executable
    Executable,
    // @source: Per-user config directory
    UserConfig,
    // @source: Nothing found, relative to the working directory
    WorkingDirectory,
}

impl SettingSource {
    // @returns: Human readable origin
    pub fn display_name(&self) -> &str {
        match self {
            Self::Explicit => "explicit path",
            Self::Environment => "environment",
            Self::Executable => "executable directory",
            Self::UserConfig => "user config directory",
            Self::WorkingDirectory => "working directory",
        }
    }
}

impl std::fmt::Display for SettingSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Resolve the directory holding `lan_code.json` and `ass_styles.json`.
///
/// Lookup order: the explicit path, then `SMI2ASS_SETTING_DIR`, then a
/// `setting` directory next to the running executable, then
/// `<config dir>/smi2ass`. When none of the candidates exist the result
/// falls back to `./setting` so the loader reports the missing file.
pub fn resolve_setting_dir(explicit: Option<&Path>) -> (PathBuf, SettingSource) {
    let env_dir = std::env::var_os(SETTING_DIR_ENV)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from);
    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|p| p.join(SETTING_DIR_NAME)));
    let user_dir = dirs::config_dir().map(|d| d.join(USER_CONFIG_DIR_NAME));

    let (dir, source) = resolve_from_candidates(explicit, env_dir, exe_dir, user_dir);
    debug!("Using setting directory {:?} ({})", dir, source);
    (dir, source)
}

/// Like [`resolve_setting_dir`], but the chosen directory must exist.
pub fn locate_setting_dir(explicit: Option<&Path>) -> Result<(PathBuf, SettingSource), AppError> {
    let (dir, source) = resolve_setting_dir(explicit);
    if !FileManager::dir_exists(&dir) {
        return Err(AppError::File(format!(
            "Setting directory {:?} ({}) does not exist",
            dir, source
        )));
    }
    Ok((dir, source))
}

// @resolves: First usable candidate, without touching process state
fn resolve_from_candidates(
    explicit: Option<&Path>,
    env_dir: Option<PathBuf>,
    exe_dir: Option<PathBuf>,
    user_dir: Option<PathBuf>,
) -> (PathBuf, SettingSource) {
    if let Some(path) = explicit {
        return (path.to_path_buf(), SettingSource::Explicit);
    }

    if let Some(path) = env_dir {
        return (path, SettingSource::Environment);
    }

    if let Some(path) = exe_dir.filter(|p| p.is_dir()) {
        return (path, SettingSource::Executable);
    }

    if let Some(path) = user_dir.filter(|p| p.is_dir()) {
        return (path, SettingSource::UserConfig);
    }

    (PathBuf::from(SETTING_DIR_NAME), SettingSource::WorkingDirectory)
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Map to the `log` crate's filter
    pub fn to_level_filter(self) -> LevelFilter {
        match self {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}
