//! # pokergym-ai: Agents and Multi-Agent Training
//!
//! Policy agents that act on the fixed-width state vectors produced by
//! [`pokergym_engine::env::PokerEnv`], plus the per-seat REINFORCE trainer.
//!
//! ## Core Components
//!
//! - [`Agent`] - Common decision interface
//! - [`agent`] - Neural [`agent::PolicyAgent`] with masked sampling and checkpoints
//! - [`episode`] - Plays one hand through the environment
//! - [`random`] - Uniform [`random::RandomAgent`] reference opponent
//! - [`risk`] - Reward shaping profiles
//! - [`trainer`] - [`trainer::MultiAgentTrainer`]
//! - [`create_agent`] - Factory by kind name
//!
//! ## Quick Start
//!
//! ```rust
//! use pokergym_ai::{create_agent, Agent};
//! use pokergym_ai::config::TrainerConfig;
//! use pokergym_engine::env::PokerEnv;
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha20Rng;
//!
//! let config = TrainerConfig::default();
//! let agent = create_agent("random", config.agent_settings(), None).unwrap();
//!
//! let mut env = PokerEnv::new(config.table.clone()).unwrap();
//! env.reset().unwrap();
//! let seat = env.action_order()[0];
//! let mut rng = ChaCha20Rng::seed_from_u64(7);
//! let decision = agent
//!     .act(&env.observe(seat), &env.legal_actions(seat), &mut rng)
//!     .unwrap();
//! assert!(env.legal_actions(seat).is_legal(decision.kind));
//! ```

use std::path::Path;

use candle_core::Device;
use pokergym_engine::player::ActionKind;
use pokergym_engine::rules::Legality;
use rand::RngCore;

pub mod agent;
pub mod config;
pub mod episode;
pub mod errors;
pub mod network;
pub mod random;
pub mod risk;
pub mod trainer;

pub use errors::AgentError;

use agent::{AgentSettings, PolicyAgent};
use random::RandomAgent;
use risk::RiskProfile;

/// What an agent decided for one prompt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decision {
    /// Kind sent to the table.
    pub kind: ActionKind,
    /// Chips above the high bet; 0 unless `kind` is a raise.
    pub raise_amount: u32,
    /// Kind drawn from the policy. Differs from `kind` only when a raise had
    /// no capacity and was sent as a call.
    pub sampled: ActionKind,
    pub bucket: Option<usize>,
    /// Value estimate, for agents that have one.
    pub value: Option<f32>,
}

/// Chooses actions from an encoded state.
///
/// Implementations must never pick a kind `legal` marks illegal.
pub trait Agent: Send {
    fn act(
        &self,
        state: &[f32],
        legal: &Legality,
        rng: &mut dyn RngCore,
    ) -> Result<Decision, AgentError>;

    fn name(&self) -> &str;
}

/// Builds an agent by kind name.
///
/// `"random"` needs nothing else. A risk profile name (`"neutral"`,
/// `"averse"`, `"seeking"`) loads that profile's checkpoint from
/// `checkpoint_dir`, or starts untrained when no directory is given.
pub fn create_agent(
    kind: &str,
    settings: AgentSettings,
    checkpoint_dir: Option<&Path>,
) -> Result<Box<dyn Agent>, AgentError> {
    if kind.eq_ignore_ascii_case("random") {
        return Ok(Box::new(RandomAgent::new(settings.layout, settings.min_raise)));
    }
    let profile: RiskProfile = kind
        .parse()
        .map_err(|_| AgentError::UnknownAgent(kind.to_string()))?;
    let agent = match checkpoint_dir {
        Some(dir) => PolicyAgent::load_for_profile(settings, Device::Cpu, dir, profile)?,
        None => PolicyAgent::new(settings, Device::Cpu)?.with_name(profile.name()),
    };
    Ok(Box::new(agent))
}
