//! Configuration for cmdpanel
//!
//! Everything lives in one directory: `$CMDPANEL_HOME` when set, otherwise
//! `~/.config/cmdpanel`. `config.toml` is optional and every key in it is
//! optional too.

use crate::error::{PanelError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const HOME_ENV: &str = "CMDPANEL_HOME";
const CONFIG_FILE: &str = "config.toml";
const COMMANDS_FILE: &str = "commands.json";
const TEMPLATES_FILE: &str = "templates.json";
const UI_SETTINGS_FILE: &str = "ui_settings.toml";
const LOG_FILE: &str = "cmdpanel.log";

/// Interpreter used to run resolved command lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    pub program: String,
    pub args: Vec<String>,
}

impl Default for ShellConfig {
    fn default() -> Self {
        if cfg!(windows) {
            Self {
                program: "cmd".to_string(),
                args: vec!["/C".to_string()],
            }
        } else {
            Self {
                program: "sh".to_string(),
                args: vec!["-c".to_string()],
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub shell: ShellConfig,
    pub commands_file: Option<PathBuf>,
    pub templates_file: Option<PathBuf>,
    pub log_filter: Option<String>,
}

/// Fully resolved file locations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    pub config_dir: PathBuf,
    pub commands: PathBuf,
    pub templates: PathBuf,
    pub ui_settings: PathBuf,
    pub log: PathBuf,
}

impl AppPaths {
    /// All files under `dir`, honouring overrides from `config`.
    pub fn resolve(dir: &Path, config: &AppConfig) -> Self {
        Self {
            config_dir: dir.to_path_buf(),
            commands: config
                .commands_file
                .clone()
                .unwrap_or_else(|| dir.join(COMMANDS_FILE)),
            templates: config
                .templates_file
                .clone()
                .unwrap_or_else(|| dir.join(TEMPLATES_FILE)),
            ui_settings: dir.join(UI_SETTINGS_FILE),
            log: dir.join(LOG_FILE),
        }
    }
}

pub fn config_dir() -> Option<PathBuf> {
    if let Some(dir) = std::env::var_os(HOME_ENV) {
        return Some(PathBuf::from(dir));
    }
    home::home_dir().map(|mut path| {
        path.push(".config");
        path.push("cmdpanel");
        path
    })
}

impl AppConfig {
    /// Read `config.toml` from `dir`. A missing file yields the defaults.
    pub fn load_from(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(&path)?;
        toml::from_str(&content)
            .map_err(|e| PanelError::config(format!("{}: {e}", path.display())))
    }

    /// Load the configuration and resolve every path.
    pub fn load() -> Result<(Self, AppPaths)> {
        let dir = config_dir()
            .ok_or_else(|| PanelError::config("cannot determine the home directory"))?;
        let config = Self::load_from(&dir)?;
        let paths = AppPaths::resolve(&dir, &config);
        Ok((config, paths))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from(dir.path()).unwrap();
        assert_eq!(config, AppConfig::default());

        let paths = AppPaths::resolve(dir.path(), &config);
        assert_eq!(paths.commands, dir.path().join("commands.json"));
        assert_eq!(paths.templates, dir.path().join("templates.json"));
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("config.toml"),
            "commands_file = \"/srv/panel/commands.json\"\n\n[shell]\nprogram = \"bash\"\nargs = [\"-lc\"]\n",
        )
        .unwrap();

        let config = AppConfig::load_from(dir.path()).unwrap();
        assert_eq!(config.shell.program, "bash");
        assert_eq!(config.shell.args, vec!["-lc".to_string()]);
        assert!(config.templates_file.is_none());

        let paths = AppPaths::resolve(dir.path(), &config);
        assert_eq!(paths.commands, PathBuf::from("/srv/panel/commands.json"));
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("config.toml"), "shell = 3").unwrap();
        assert!(matches!(
            AppConfig::load_from(dir.path()),
            Err(PanelError::Config(_))
        ));
    }
}
