//! Reward shaping applied before each seat's policy-gradient update.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Monotonic transform of a seat's raw hand reward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskProfile {
    /// Identity.
    Neutral,
    /// `sign(x) * ln(1 + |x|)`: large swings count for less.
    Averse,
    /// `sign(x) * x^2`: large swings count for more.
    Seeking,
}

impl RiskProfile {
    pub const ALL: [RiskProfile; 3] = [
        RiskProfile::Neutral,
        RiskProfile::Averse,
        RiskProfile::Seeking,
    ];

    /// Round-robin assignment by seat index.
    pub fn for_seat(seat: usize) -> Self {
        Self::ALL[seat % Self::ALL.len()]
    }

    pub fn shape(self, reward: f64) -> f64 {
        match self {
            RiskProfile::Neutral => reward,
            RiskProfile::Averse => reward.signum() * reward.abs().ln_1p(),
            RiskProfile::Seeking => reward.signum() * reward * reward,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            RiskProfile::Neutral => "neutral",
            RiskProfile::Averse => "averse",
            RiskProfile::Seeking => "seeking",
        }
    }
}

impl fmt::Display for RiskProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RiskProfile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown risk profile '{}'", s))
    }
}
