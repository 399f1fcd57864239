use std::path::{Path, PathBuf};

use derive_more::From;
use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod theme;

/// File name of the settings inside the configuration directory
pub const SETTINGS_FILE: &str = "settings.toml";

/// Prefix of environment variables overriding settings
const ENV_PREFIX: &str = "CALCTERM_";

/// Settings that may be overridden from the environment
const ENV_SETTINGS: [&str; 3] = ["data_dir", "show_history", "animations"];

/// User settings, as read from `settings.toml`
#[derive(Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub theme: theme::Theme,
    /// Where memory, history and logs are stored
    pub data_dir: Option<PathBuf>,
    /// Show the history panel on startup
    pub show_history: bool,
    /// Animate button presses and errors
    pub animations: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: theme::Theme::default(),
            data_dir: None,
            show_history: false,
            animations: true,
        }
    }
}

#[derive(Debug, From, Error)]
pub enum ConfigError {
    #[error(
        "Could not determine a configuration directory. Pass one with `--config <dir>` instead"
    )]
    NoDirectory,

    #[error("Failed to create configuration directory: {0}")]
    CreateDirectory(std::io::Error),

    #[error("Invalid settings: {0}")]
    Parse(Box<figment::Error>),
}

/// Resolved configuration
#[derive(Debug)]
pub struct Config {
    pub settings: Settings,
    /// Where the storage file and the log live
    pub data_dir: PathBuf,
}

impl Config {
    /// Load the configuration
    ///
    /// Settings are read from `settings.toml` in `config_dir` (or the platform configuration
    /// directory), then overridden by `CALCTERM_*` environment variables. The data directory
    /// is, in order: the `data_dir` setting, `data/` inside an explicit `config_dir`, or the
    /// platform data directory.
    pub fn get(config_dir: Option<PathBuf>) -> Result<Self, ConfigError> {
        let project_dirs = ProjectDirs::from("com", "Calcterm", "Calcterm");

        let explicit_dir = config_dir.is_some();
        let config_dir = config_dir
            .or_else(|| Some(project_dirs.as_ref()?.config_dir().to_path_buf()))
            .ok_or(ConfigError::NoDirectory)?;

        std::fs::create_dir_all(&config_dir)?;
        let settings = load_settings(&config_dir)?;

        let data_dir = match (&settings.data_dir, explicit_dir) {
            (Some(data_dir), _) => data_dir.clone(),
            (None, true) => config_dir.join("data"),
            (None, false) => project_dirs
                .map(|dirs| dirs.data_dir().to_path_buf())
                .ok_or(ConfigError::NoDirectory)?,
        };

        Ok(Self { settings, data_dir })
    }

    /// The default settings, as written to `settings.toml`
    pub fn default_settings_toml() -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(&Settings::default())
    }
}

fn load_settings(config_dir: &Path) -> Result<Settings, ConfigError> {
    let mut figment = Figment::from(Serialized::defaults(Settings::default()));

    let settings_file = config_dir.join(SETTINGS_FILE);
    if settings_file.is_file() {
        figment = figment.merge(Toml::file(settings_file));
    }

    figment
        .merge(Env::prefixed(ENV_PREFIX).only(&ENV_SETTINGS))
        .extract()
        .map_err(|error| ConfigError::Parse(Box::new(error)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "calcterm-config-{name}-{}",
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_settings_file_and_data_dir() {
        let dir = scratch_dir("settings");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            dir.join(SETTINGS_FILE),
            "show_history = true\nanimations = false\n[theme.text]\nerror = \"Magenta\"\n",
        )
        .unwrap();

        let settings = load_settings(&dir).unwrap();
        assert!(settings.show_history);
        assert!(!settings.animations);
        assert_eq!(settings.theme.text.error, ratatui::style::Color::Magenta);

        let config = Config::get(Some(dir.clone())).unwrap();
        assert_eq!(config.data_dir, dir.join("data"));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_invalid_settings() {
        let dir = scratch_dir("invalid");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join(SETTINGS_FILE), "animations = \"sometimes\"\n").unwrap();

        assert!(matches!(load_settings(&dir), Err(ConfigError::Parse(_))));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_default_settings_toml() {
        let toml = Config::default_settings_toml().unwrap();
        assert!(toml.contains("animations = true"));
        assert!(toml.contains("show_history = false"));
    }
}
