use std::path::PathBuf;

use pokergym_engine::env::StateLayout;
use pokergym_engine::game::TableConfig;
use serde::{Deserialize, Serialize};

use crate::agent::AgentSettings;
use crate::errors::AgentError;

/// Settings for a multi-agent training run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainerConfig {
    pub table: TableConfig,
    /// Hands played by one `train` call.
    pub episodes: u64,
    pub learning_rate: f64,
    pub hidden_dim: usize,
    /// Episodes between progress lines; also the rolling-average window.
    pub log_every: u64,
    /// Raise bucket floor; the big blind when unset.
    pub min_raise: Option<u32>,
    /// Chip feature divisor; the endowment when unset.
    pub chip_scale: Option<f32>,
    /// Where `train` writes seat checkpoints; nothing is saved when unset.
    pub checkpoint_dir: Option<PathBuf>,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            table: TableConfig::default(),
            episodes: 1000,
            learning_rate: 1e-3,
            hidden_dim: 128,
            log_every: 100,
            min_raise: None,
            chip_scale: None,
            checkpoint_dir: None,
        }
    }
}

impl TrainerConfig {
    pub fn validate(&self) -> Result<(), AgentError> {
        self.table.validate()?;
        if !(self.learning_rate > 0.0 && self.learning_rate.is_finite()) {
            return Err(AgentError::InvalidConfig(
                "learning_rate must be positive".into(),
            ));
        }
        if self.episodes == 0 {
            return Err(AgentError::InvalidConfig("episodes must be >0".into()));
        }
        if self.hidden_dim == 0 {
            return Err(AgentError::InvalidConfig("hidden_dim must be >0".into()));
        }
        if self.log_every == 0 {
            return Err(AgentError::InvalidConfig("log_every must be >0".into()));
        }
        if let Some(scale) = self.chip_scale
            && scale <= 0.0
        {
            return Err(AgentError::InvalidConfig("chip_scale must be >0".into()));
        }
        Ok(())
    }

    pub fn agent_settings(&self) -> AgentSettings {
        AgentSettings {
            layout: StateLayout::new(self.table.max_seats),
            hidden_dim: self.hidden_dim,
            min_raise: self.min_raise.unwrap_or(self.table.big_blind),
            chip_scale: self.chip_scale.unwrap_or(self.table.endowment as f32),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_fall_back_to_table_values() {
        let cfg = TrainerConfig::default();
        let s = cfg.agent_settings();
        assert_eq!(s.min_raise, 20);
        assert_eq!(s.chip_scale, 1000.0);
        assert_eq!(s.layout.width(), 17 + 3 * 9);
    }

    #[test]
    fn rejects_non_positive_learning_rate() {
        let cfg = TrainerConfig {
            learning_rate: 0.0,
            ..TrainerConfig::default()
        };
        assert!(cfg.validate().is_err());
        assert!(TrainerConfig::default().validate().is_ok());
    }
}
