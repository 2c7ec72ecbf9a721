use crate::consts;
use crate::util::data_dir;
use log::LevelFilter;
use ratatui::style::Style;
use serde::Deserialize;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Program configuration read from a configuration file
#[derive(Clone, Deserialize, Debug, Default, Eq, PartialEq)]
pub(crate) struct Config {
    /// Settings about data files
    #[serde(default)]
    pub(crate) files: FileConfig,

    #[serde(default)]
    pub(crate) logging: LogConfig,

    /// Styles for drawing the snake & food
    #[serde(default)]
    pub(crate) styles: StyleConfig,
}

impl Config {
    /// Return the default configuration file path
    pub(crate) fn default_path() -> Result<PathBuf, ConfigError> {
        dirs::config_local_dir()
            .map(|p| p.join("gridsnake").join("config.toml"))
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
pub(crate) struct FileConfig {
    /// Path to the key-value store holding the best score
    store_file: Option<PathBuf>,

    /// Path to which log messages are written
    log_file: Option<PathBuf>,

    /// Whether to load & save the best score on disk at all
    pub(crate) save_best_score: bool,
}

impl FileConfig {
    /// Return the path to the key-value store: the file given in the
    /// configuration or, if that is not set, the default store path.  Return
    /// `None` if no path is configured and the default path could not be
    /// computed.
    pub(crate) fn store_file(&self) -> Option<Cow<'_, Path>> {
        self.store_file
            .as_deref()
            .map(Cow::from)
            .or_else(|| data_dir().map(|p| Cow::from(p.join("store.json"))))
    }

    /// Return the path to the log file, computed in the same manner as
    /// [`FileConfig::store_file()`]
    pub(crate) fn log_file(&self) -> Option<Cow<'_, Path>> {
        self.log_file
            .as_deref()
            .map(Cow::from)
            .or_else(|| data_dir().map(|p| Cow::from(p.join("gridsnake.log"))))
    }
}

impl Default for FileConfig {
    fn default() -> FileConfig {
        FileConfig {
            store_file: None,
            log_file: None,
            save_best_score: true,
        }
    }
}

#[derive(Clone, Copy, Deserialize, Debug, Eq, PartialEq)]
#[serde(default)]
pub(crate) struct LogConfig {
    /// Only log messages at this level or more severe are written
    pub(crate) level: LevelFilter,
}

impl Default for LogConfig {
    fn default() -> LogConfig {
        LogConfig {
            level: LevelFilter::Info,
        }
    }
}

#[derive(Clone, Copy, Deserialize, Debug, Eq, PartialEq)]
#[serde(from = "RawStyleConfig")]
pub(crate) struct StyleConfig {
    pub(crate) snake: Style,
    pub(crate) food: Style,
    pub(crate) collision: Style,
}

impl Default for StyleConfig {
    fn default() -> StyleConfig {
        StyleConfig::from(RawStyleConfig::default())
    }
}

#[derive(Clone, Deserialize, Debug, Default)]
#[serde(default)]
struct RawStyleConfig {
    snake: Option<parse_style::Style>,
    food: Option<parse_style::Style>,
    collision: Option<parse_style::Style>,
}

impl From<RawStyleConfig> for StyleConfig {
    fn from(value: RawStyleConfig) -> StyleConfig {
        StyleConfig {
            snake: value.snake.map_or(consts::SNAKE_STYLE, Style::from),
            food: value.food.map_or(consts::FOOD_STYLE, Style::from),
            collision: value.collision.map_or(consts::COLLISION_STYLE, Style::from),
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
