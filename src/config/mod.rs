use std::{
    env,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use dirs::home_dir;
use serde::{Deserialize, Serialize};

use crate::{
    currency::CurrencyStyle,
    errors::{TrackerError, TrackerResult},
};

const HOME_ENV: &str = "TRACKER_CORE_HOME";
const DEFAULT_DIR_NAME: &str = ".tracker_core";
const CONFIG_FILE: &str = "config.json";
const DATA_DIR: &str = "data";
const TMP_SUFFIX: &str = "tmp";

/// Default minimum horizontal travel, in pixels, for a swipe to register.
pub const DEFAULT_SWIPE_THRESHOLD: f64 = 50.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub swipe_threshold: f64,
    pub currency: CurrencyStyle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    pub color: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            swipe_threshold: DEFAULT_SWIPE_THRESHOLD,
            currency: CurrencyStyle::default(),
            data_dir: None,
            color: true,
        }
    }
}

impl Config {
    pub fn validate(&self) -> TrackerResult<()> {
        if !self.swipe_threshold.is_finite() || self.swipe_threshold < 0.0 {
            return Err(TrackerError::Config(format!(
                "swipe_threshold must be a non-negative number, got {}",
                self.swipe_threshold
            )));
        }
        if self.currency.symbol.is_empty() {
            return Err(TrackerError::Config("currency symbol must not be empty".into()));
        }
        Ok(())
    }
}

/// Loads and saves [`Config`] under the tracker home directory.
pub struct ConfigManager {
    base: PathBuf,
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> TrackerResult<Self> {
        Self::with_base_dir(base_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> TrackerResult<Self> {
        fs::create_dir_all(&base)?;
        Ok(Self {
            path: base.join(CONFIG_FILE),
            base,
        })
    }

    /// Returns defaults when no config file has been written yet.
    pub fn load(&self) -> TrackerResult<Config> {
        if !self.path.exists() {
            return Ok(Config::default());
        }
        let data = fs::read_to_string(&self.path)?;
        let config: Config = serde_json::from_str(&data)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, config: &Config) -> TrackerResult<()> {
        config.validate()?;
        let json = serde_json::to_string_pretty(config)?;
        let tmp = self.path.with_extension(format!("json.{}", TMP_SUFFIX));
        let mut file = File::create(&tmp)?;
        file.write_all(json.as_bytes())?;
        file.flush()?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    /// Directory holding the JSON tracker feeds.
    pub fn data_dir(&self, config: &Config) -> PathBuf {
        config
            .data_dir
            .clone()
            .unwrap_or_else(|| self.base.join(DATA_DIR))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// `$TRACKER_CORE_HOME`, or `~/.tracker_core`.
pub fn base_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV) {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}
