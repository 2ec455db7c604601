//! Shared-trunk policy/value network.

use candle_core::{Result, Tensor};
use candle_nn::{Linear, Module, VarBuilder, linear};

/// Discrete action logits: fold, check, call, raise.
pub const NUM_ACTIONS: usize = 4;
/// Raise sizes as fractions of the pot.
pub const NUM_RAISE_BUCKETS: usize = 4;

/// Output of one forward pass, batch-major.
#[derive(Debug)]
pub struct NetOutput {
    /// `[batch, NUM_ACTIONS]`
    pub action_logits: Tensor,
    /// `[batch, NUM_RAISE_BUCKETS]`
    pub raise_logits: Tensor,
    /// `[batch, 1]`
    pub value: Tensor,
}

/// Two ReLU layers feeding three linear heads.
#[derive(Debug, Clone)]
pub struct PolicyValueNet {
    fc1: Linear,
    fc2: Linear,
    action_head: Linear,
    raise_head: Linear,
    value_head: Linear,
}

impl PolicyValueNet {
    pub fn new(input_dim: usize, hidden_dim: usize, vb: &VarBuilder) -> Result<Self> {
        Ok(Self {
            fc1: linear(input_dim, hidden_dim, vb.pp("fc1"))?,
            fc2: linear(hidden_dim, hidden_dim, vb.pp("fc2"))?,
            action_head: linear(hidden_dim, NUM_ACTIONS, vb.pp("action_head"))?,
            raise_head: linear(hidden_dim, NUM_RAISE_BUCKETS, vb.pp("raise_head"))?,
            value_head: linear(hidden_dim, 1, vb.pp("value_head"))?,
        })
    }

    /// `xs` is `[batch, input_dim]`.
    pub fn forward(&self, xs: &Tensor) -> Result<NetOutput> {
        let h = self.fc1.forward(xs)?.relu()?;
        let h = self.fc2.forward(&h)?.relu()?;
        Ok(NetOutput {
            action_logits: self.action_head.forward(&h)?,
            raise_logits: self.raise_head.forward(&h)?,
            value: self.value_head.forward(&h)?,
        })
    }
}
