use serde::{Deserialize, Serialize};
use std::fs;
use std::time::Duration;

use crease_engine::forecast::ForecastConfig;
use crease_engine::schedule::SchedulerConfig;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub seed: Option<u64>,
    pub trials: u32,
    pub chunk_size: u32,
    pub backtrack_node_budget: u64,
    pub backtrack_time_ms: u64,
    pub forecast_time_ms: Option<u64>,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub seed: ValueSource,
    pub trials: ValueSource,
    pub chunk_size: ValueSource,
    pub backtrack_node_budget: ValueSource,
    pub backtrack_time_ms: ValueSource,
    pub forecast_time_ms: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            seed: ValueSource::Default,
            trials: ValueSource::Default,
            chunk_size: ValueSource::Default,
            backtrack_node_budget: ValueSource::Default,
            backtrack_time_ms: ValueSource::Default,
            forecast_time_ms: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
}

impl Default for Config {
    fn default() -> Self {
        let scheduler = SchedulerConfig::default();
        let forecast = ForecastConfig::default();
        Self {
            seed: None,
            trials: forecast.trials,
            chunk_size: forecast.chunk_size,
            backtrack_node_budget: scheduler.node_budget,
            backtrack_time_ms: scheduler
                .time_budget
                .map(|d| d.as_millis() as u64)
                .unwrap_or(250),
            forecast_time_ms: None,
        }
    }
}

impl Config {
    pub fn scheduler(&self) -> SchedulerConfig {
        SchedulerConfig {
            node_budget: self.backtrack_node_budget,
            time_budget: Some(Duration::from_millis(self.backtrack_time_ms)),
        }
    }

    /// Forecast settings, with `trials` overriding the configured count.
    pub fn forecast(&self, trials: Option<u32>) -> ForecastConfig {
        ForecastConfig {
            trials: trials.unwrap_or(self.trials),
            chunk_size: self.chunk_size,
            time_budget: self.forecast_time_ms.map(Duration::from_millis),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}
impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "cannot read config file: {}", e),
            ConfigError::Parse(e) => write!(f, "cannot parse config file: {}", e),
            ConfigError::Invalid(msg) => f.write_str(msg),
        }
    }
}

pub fn load() -> Result<Config, ConfigError> {
    load_with_sources().map(|resolved| resolved.config)
}

pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Ok(path) = std::env::var("CREASE_CONFIG")
        && !path.is_empty()
    {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
        if let Some(v) = f.trials {
            cfg.trials = v;
            sources.trials = ValueSource::File;
        }
        if let Some(v) = f.chunk_size {
            cfg.chunk_size = v;
            sources.chunk_size = ValueSource::File;
        }
        if let Some(v) = f.backtrack_node_budget {
            cfg.backtrack_node_budget = v;
            sources.backtrack_node_budget = ValueSource::File;
        }
        if let Some(v) = f.backtrack_time_ms {
            cfg.backtrack_time_ms = v;
            sources.backtrack_time_ms = ValueSource::File;
        }
        if let Some(v) = f.forecast_time_ms {
            cfg.forecast_time_ms = Some(v);
            sources.forecast_time_ms = ValueSource::File;
        }
    }

    if let Ok(seed) = std::env::var("CREASE_SEED")
        && !seed.is_empty()
    {
        cfg.seed = Some(
            seed.parse()
                .map_err(|_| ConfigError::Invalid("Invalid seed".into()))?,
        );
        sources.seed = ValueSource::Env;
    }
    if let Ok(trials) = std::env::var("CREASE_TRIALS")
        && !trials.is_empty()
    {
        cfg.trials = trials
            .parse()
            .map_err(|_| ConfigError::Invalid("Invalid trials".into()))?;
        sources.trials = ValueSource::Env;
    }
    if let Ok(ms) = std::env::var("CREASE_BACKTRACK_MS")
        && !ms.is_empty()
    {
        cfg.backtrack_time_ms = ms
            .parse()
            .map_err(|_| ConfigError::Invalid("Invalid backtrack time".into()))?;
        sources.backtrack_time_ms = ValueSource::Env;
    }
    if let Ok(ms) = std::env::var("CREASE_FORECAST_MS")
        && !ms.is_empty()
    {
        cfg.forecast_time_ms = Some(
            ms.parse()
                .map_err(|_| ConfigError::Invalid("Invalid forecast time".into()))?,
        );
        sources.forecast_time_ms = ValueSource::Env;
    }

    validate(&cfg)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

#[derive(Debug, Deserialize)]
struct FileConfig {
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    trials: Option<u32>,
    #[serde(default)]
    chunk_size: Option<u32>,
    #[serde(default)]
    backtrack_node_budget: Option<u64>,
    #[serde(default)]
    backtrack_time_ms: Option<u64>,
    #[serde(default)]
    forecast_time_ms: Option<u64>,
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if cfg.trials == 0 {
        return Err(ConfigError::Invalid("trials must be >=1".into()));
    }
    if cfg.chunk_size == 0 {
        return Err(ConfigError::Invalid("chunk_size must be >=1".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_mirror_engine_settings() {
        let cfg = Config::default();
        assert_eq!(cfg.trials, 10_000);
        assert_eq!(cfg.backtrack_time_ms, 250);
        assert_eq!(cfg.scheduler(), SchedulerConfig::default());
        assert_eq!(cfg.forecast(None), ForecastConfig::default());
        assert_eq!(cfg.forecast(Some(12)).trials, 12);
    }

    #[test]
    fn zero_trials_is_invalid() {
        let cfg = Config {
            trials: 0,
            ..Config::default()
        };
        assert!(matches!(validate(&cfg), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn file_config_accepts_partial_tables() {
        let f: FileConfig = toml::from_str("trials = 500\nseed = 9\n").unwrap();
        assert_eq!(f.trials, Some(500));
        assert_eq!(f.seed, Some(9));
        assert!(f.chunk_size.is_none());
    }
}
