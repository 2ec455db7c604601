use pokergym_engine::env::StateLayout;
use pokergym_engine::player::ActionKind;
use pokergym_engine::rules::Legality;
use rand::{Rng, RngCore};

use crate::agent::{bucket_amount, resolve_raise};
use crate::errors::AgentError;
use crate::network::NUM_RAISE_BUCKETS;
use crate::{Agent, Decision};

/// Uniform over legal action kinds, uniform over raise buckets.
#[derive(Debug, Clone)]
pub struct RandomAgent {
    layout: StateLayout,
    min_raise: u32,
}

impl RandomAgent {
    pub fn new(layout: StateLayout, min_raise: u32) -> Self {
        Self { layout, min_raise }
    }
}

impl Agent for RandomAgent {
    fn act(
        &self,
        state: &[f32],
        legal: &Legality,
        rng: &mut dyn RngCore,
    ) -> Result<Decision, AgentError> {
        let kinds = legal.legal_kinds();
        if kinds.is_empty() {
            return Err(AgentError::NoLegalAction);
        }
        let sampled = kinds[rng.random_range(0..kinds.len())];
        if sampled != ActionKind::Raise {
            return Ok(resolve_raise(sampled, None, 0, legal));
        }
        let bucket = rng.random_range(0..NUM_RAISE_BUCKETS);
        let amount = bucket_amount(
            bucket,
            self.layout.pot_of(state),
            self.min_raise,
            self.layout.raise_capacity_of(state),
        );
        Ok(resolve_raise(sampled, Some(bucket), amount, legal))
    }

    fn name(&self) -> &str {
        "random"
    }
}
