use crate::consts;
use log::LevelFilter;
use ratatui::style::Color;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Program configuration read from a configuration file
#[derive(Clone, Deserialize, Debug, Default, Eq, PartialEq)]
#[serde(default)]
pub(crate) struct Config {
    /// Where to find the sprites and what to draw when they're missing
    pub(crate) assets: AssetConfig,

    /// Settings for the log file
    pub(crate) logging: LogConfig,
}

impl Config {
    /// Return the default configuration file path
    pub(crate) fn default_path() -> Result<PathBuf, ConfigError> {
        dirs::config_local_dir()
            .map(|p| p.join("hatsnake").join("config.toml"))
            .ok_or(ConfigError::NoPath)
    }

    /// Read configuration from a file on disk.  If the file does not exist and
    /// `allow_missing` is true, a default `Config` value is returned.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the file could not be read or if the file's contents
    /// could not be deserialized.
    pub(crate) fn load(path: &Path, allow_missing: bool) -> Result<Config, ConfigError> {
        let content = match fs_err::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && allow_missing => {
                return Ok(Config::default())
            }
            Err(e) => return Err(ConfigError::Read(e)),
        };
        toml::from_str(&content).map_err(Into::into)
    }
}

#[derive(Clone, Deserialize, Debug, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct AssetConfig {
    /// Sprite file for the snake's head (and, unrotated, its body)
    pub(crate) head: PathBuf,

    /// Sprite file for the food
    pub(crate) food: PathBuf,

    /// Colour for the snake's sprite, or for the squares drawn in its place
    pub(crate) snake_color: Color,

    /// Colour for the food's sprite, or for the square drawn in its place
    pub(crate) food_color: Color,
}

impl Default for AssetConfig {
    fn default() -> AssetConfig {
        AssetConfig {
            head: PathBuf::from(consts::HEAD_SPRITE_PATH),
            food: PathBuf::from(consts::FOOD_SPRITE_PATH),
            snake_color: consts::SNAKE_COLOR,
            food_color: consts::FOOD_COLOR,
        }
    }
}

#[derive(Clone, Deserialize, Debug, Eq, PartialEq)]
#[serde(default)]
pub(crate) struct LogConfig {
    /// Whether to write a log file at all
    pub(crate) enabled: bool,

    /// Path to the log file; if unset, [`LogConfig::default_file()`] is used
    pub(crate) file: Option<PathBuf>,

    /// Minimum level of messages to write
    pub(crate) level: LevelFilter,
}

impl LogConfig {
    /// Return the default log file path
    pub(crate) fn default_file() -> Option<PathBuf> {
        dirs::data_local_dir().map(|p| p.join("hatsnake").join("hatsnake.log"))
    }

    /// Return the log file to write to, or `None` if logging is disabled or no
    /// path could be determined
    pub(crate) fn log_file(&self) -> Option<PathBuf> {
        if self.enabled {
            self.file.clone().or_else(LogConfig::default_file)
        } else {
            None
        }
    }
}

impl Default for LogConfig {
    fn default() -> LogConfig {
        LogConfig {
            enabled: true,
            file: None,
            level: LevelFilter::Info,
        }
    }
}

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to determine path to local configuration directory")]
    NoPath,
    #[error("failed to read configuration file")]
    Read(#[from] std::io::Error),
    #[error("failed to parse configuration file")]
    Parse(#[from] toml::de::Error),
}
