//! CLI configuration: defaults, then a TOML file named by `POKERGYM_CONFIG`,
//! then `POKERGYM_*` environment overrides. Each value remembers its source.

use pokergym_ai::config::TrainerConfig;
use pokergym_engine::game::TableConfig;
use pokergym_engine::hand::EvaluatorKind;
use serde::{Deserialize, Serialize};
use std::fs;

pub const CONFIG_ENV: &str = "POKERGYM_CONFIG";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub seats: usize,
    pub seed: Option<u64>,
    pub episodes: u64,
    pub endowment: u32,
    pub small_blind: u32,
    pub big_blind: u32,
    pub ante: u32,
    pub evaluator: EvaluatorKind,
    pub learning_rate: f64,
    pub hidden_dim: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct ConfigSources {
    pub seats: ValueSource,
    pub seed: ValueSource,
    pub episodes: ValueSource,
    pub endowment: ValueSource,
    pub small_blind: ValueSource,
    pub big_blind: ValueSource,
    pub ante: ValueSource,
    pub evaluator: ValueSource,
    pub learning_rate: ValueSource,
    pub hidden_dim: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            seats: ValueSource::Default,
            seed: ValueSource::Default,
            episodes: ValueSource::Default,
            endowment: ValueSource::Default,
            small_blind: ValueSource::Default,
            big_blind: ValueSource::Default,
            ante: ValueSource::Default,
            evaluator: ValueSource::Default,
            learning_rate: ValueSource::Default,
            hidden_dim: ValueSource::Default,
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
        let table = TableConfig::default();
        let trainer = TrainerConfig::default();
        Self {
            seats: table.num_seats,
            seed: None,
            episodes: trainer.episodes,
            endowment: table.endowment,
            small_blind: table.small_blind,
            big_blind: table.big_blind,
            ante: table.ante,
            evaluator: table.evaluator,
            learning_rate: trainer.learning_rate,
            hidden_dim: trainer.hidden_dim,
        }
    }
}

impl Config {
    /// Table settings for `seats` seats dealt from `seed`.
    pub fn table(&self, seats: usize, seed: u64) -> TableConfig {
        TableConfig {
            num_seats: seats,
            max_seats: TableConfig::default().max_seats.max(seats),
            endowment: self.endowment,
            small_blind: self.small_blind,
            big_blind: self.big_blind,
            ante: self.ante,
            seed,
            evaluator: self.evaluator,
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
            ConfigError::Invalid(msg) => write!(f, "{}", msg),
        }
    }
}

pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Ok(path) = std::env::var(CONFIG_ENV)
        && !path.is_empty()
    {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        macro_rules! from_file {
            ($($field:ident),*) => {
                $(
                    if let Some(v) = f.$field {
                        cfg.$field = v;
                        sources.$field = ValueSource::File;
                    }
                )*
            };
        }
        from_file!(
            seats,
            episodes,
            endowment,
            small_blind,
            big_blind,
            ante,
            evaluator,
            learning_rate,
            hidden_dim
        );
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
    }

    if let Some(seed) = env_value("POKERGYM_SEED") {
        cfg.seed = Some(
            seed.parse()
                .map_err(|_| ConfigError::Invalid("Invalid seed".into()))?,
        );
        sources.seed = ValueSource::Env;
    }
    if let Some(seats) = env_value("POKERGYM_SEATS") {
        cfg.seats = seats
            .parse()
            .map_err(|_| ConfigError::Invalid("Invalid seats".into()))?;
        sources.seats = ValueSource::Env;
    }
    if let Some(episodes) = env_value("POKERGYM_EPISODES") {
        cfg.episodes = episodes
            .parse()
            .map_err(|_| ConfigError::Invalid("Invalid episodes".into()))?;
        sources.episodes = ValueSource::Env;
    }
    if let Some(endowment) = env_value("POKERGYM_ENDOWMENT") {
        cfg.endowment = endowment
            .parse()
            .map_err(|_| ConfigError::Invalid("Invalid endowment".into()))?;
        sources.endowment = ValueSource::Env;
    }

    validate(&cfg)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

fn env_value(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

#[derive(Debug, Deserialize)]
struct FileConfig {
    #[serde(default)]
    seats: Option<usize>,
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    episodes: Option<u64>,
    #[serde(default)]
    endowment: Option<u32>,
    #[serde(default)]
    small_blind: Option<u32>,
    #[serde(default)]
    big_blind: Option<u32>,
    #[serde(default)]
    ante: Option<u32>,
    #[serde(default)]
    evaluator: Option<EvaluatorKind>,
    #[serde(default)]
    learning_rate: Option<f64>,
    #[serde(default)]
    hidden_dim: Option<usize>,
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    cfg.table(cfg.seats, 0)
        .validate()
        .map_err(|e| ConfigError::Invalid(format!("Invalid configuration: {}", e)))?;
    if cfg.episodes == 0 {
        return Err(ConfigError::Invalid(
            "Invalid configuration: episodes must be >0".into(),
        ));
    }
    if cfg.hidden_dim == 0 || !(cfg.learning_rate > 0.0) {
        return Err(ConfigError::Invalid(
            "Invalid configuration: hidden_dim and learning_rate must be >0".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_mirror_library_defaults() {
        let cfg = Config::default();
        assert_eq!(cfg.seats, 2);
        assert_eq!(cfg.endowment, 1000);
        assert_eq!((cfg.small_blind, cfg.big_blind), (10, 20));
        assert!(validate(&cfg).is_ok());
    }

    #[test]
    fn table_widens_padding_for_large_tables() {
        let t = Config::default().table(12, 3);
        assert_eq!(t.num_seats, 12);
        assert_eq!(t.max_seats, 12);
        assert!(t.validate().is_ok());
    }

    #[test]
    fn zero_episodes_are_rejected() {
        let cfg = Config {
            episodes: 0,
            ..Config::default()
        };
        assert!(validate(&cfg).is_err());
    }
}
