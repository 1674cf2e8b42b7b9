//! Program configuration read from a TOML file
use crate::consts;
use crate::engine::{Grid, GridError, Settings};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Program configuration read from a configuration file.  Every table and
/// key is optional.
#[derive(Clone, Copy, Deserialize, Debug, Default, Eq, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Dimensions of the playing field
    pub grid: GridConfig,

    /// Gameplay rules
    pub rules: RulesConfig,

    /// Tick timing
    pub timing: TimingConfig,
}

impl Config {
    /// Return the default configuration file path
    ///
    /// # Errors
    ///
    /// Returns `Err` if the local configuration directory could not be
    /// determined.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
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
    pub fn load(path: &Path, allow_missing: bool) -> Result<Config, ConfigError> {
        let content = match fs_err::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && allow_missing => {
                log::debug!("No configuration file at {}; using defaults", path.display());
                return Ok(Config::default());
            }
            Err(e) => return Err(ConfigError::Read(e)),
        };
        log::debug!("Read configuration from {}", path.display());
        toml::from_str(&content).map_err(Into::into)
    }

    /// Convert the configuration into engine settings
    ///
    /// # Errors
    ///
    /// Returns `Err` if any grid dimension or tick period is zero.
    pub fn settings(&self) -> Result<Settings, ConfigError> {
        let grid = Grid::new(self.grid.rows, self.grid.cols, self.grid.block_size)?;
        for (key, value) in [
            ("tick-period-ms", self.timing.tick_period_ms),
            ("min-tick-period-ms", self.timing.min_tick_period_ms),
        ] {
            if value == 0 {
                return Err(ConfigError::ZeroPeriod(key));
            }
        }
        Ok(Settings {
            grid,
            obstacles: self.rules.obstacles,
            tick_period: Duration::from_millis(self.timing.tick_period_ms),
            min_tick_period: Duration::from_millis(self.timing.min_tick_period_ms),
        })
    }
}

#[derive(Clone, Copy, Deserialize, Debug, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub struct GridConfig {
    pub rows: u16,
    pub cols: u16,
    pub block_size: u16,
}

impl Default for GridConfig {
    fn default() -> GridConfig {
        GridConfig {
            rows: consts::DEFAULT_ROWS,
            cols: consts::DEFAULT_COLS,
            block_size: consts::DEFAULT_BLOCK_SIZE,
        }
    }
}

#[derive(Clone, Copy, Deserialize, Debug, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub struct RulesConfig {
    /// Number of obstacles to place at the start of a game
    pub obstacles: usize,
}

impl Default for RulesConfig {
    fn default() -> RulesConfig {
        RulesConfig {
            obstacles: consts::DEFAULT_OBSTACLES,
        }
    }
}

#[derive(Clone, Copy, Deserialize, Debug, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub struct TimingConfig {
    /// Milliseconds between ticks at the initial speed
    pub tick_period_ms: u64,

    /// Lower bound on the milliseconds between ticks
    pub min_tick_period_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> TimingConfig {
        TimingConfig {
            tick_period_ms: millis(consts::DEFAULT_TICK_PERIOD),
            min_tick_period_ms: millis(consts::DEFAULT_MIN_TICK_PERIOD),
        }
    }
}

fn millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to determine path to local configuration directory")]
    NoPath,
    #[error("failed to read configuration file")]
    Read(#[from] std::io::Error),
    #[error("failed to parse configuration file")]
    Parse(#[from] toml::de::Error),
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error("timing.{0} must be positive")]
    ZeroPeriod(&'static str),
}
