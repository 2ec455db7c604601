//! Neural policy agent: masked action sampling and raise sizing.

use std::fs;
use std::path::{Path, PathBuf};

use candle_core::{DType, Device, Tensor};
use candle_nn::{VarBuilder, VarMap};
use pokergym_engine::env::StateLayout;
use pokergym_engine::player::ActionKind;
use pokergym_engine::rules::Legality;
use rand::RngCore;
use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;
use tracing::debug;

use crate::errors::AgentError;
use crate::network::{NUM_ACTIONS, NUM_RAISE_BUCKETS, NetOutput, PolicyValueNet};
use crate::risk::RiskProfile;
use crate::{Agent, Decision};

/// Pot fractions for the four raise buckets.
pub const RAISE_FRACTIONS: [f32; NUM_RAISE_BUCKETS] = [0.25, 0.5, 0.75, 1.0];

/// Everything needed to build an agent for a given table shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentSettings {
    pub layout: StateLayout,
    pub hidden_dim: usize,
    /// Floor applied to every raise bucket.
    pub min_raise: u32,
    /// Divisor for chip-valued state features.
    pub chip_scale: f32,
}

/// Chips a raise bucket asks for: a share of the pot, floored at
/// `min_raise`, clipped to what the seat can put in beyond a call.
pub fn bucket_amount(bucket: usize, pot: u32, min_raise: u32, capacity: u32) -> u32 {
    let frac = RAISE_FRACTIONS[bucket.min(NUM_RAISE_BUCKETS - 1)];
    let sized = (pot as f32 * frac).round() as u32;
    sized.max(min_raise).min(capacity)
}

/// Turns a sampled kind into what is sent to the table. A raise the seat has
/// no capacity for becomes a call.
pub(crate) fn resolve_raise(
    sampled: ActionKind,
    bucket: Option<usize>,
    amount: u32,
    legal: &Legality,
) -> Decision {
    if sampled == ActionKind::Raise && amount == 0 {
        let kind = [ActionKind::Call, ActionKind::Check, ActionKind::Fold]
            .into_iter()
            .find(|k| legal.is_legal(*k))
            .unwrap_or(ActionKind::Fold);
        return Decision {
            kind,
            raise_amount: 0,
            sampled,
            bucket,
            value: None,
        };
    }
    Decision {
        kind: sampled,
        raise_amount: if sampled == ActionKind::Raise { amount } else { 0 },
        sampled,
        bucket,
        value: None,
    }
}

/// Softmax over the legal entries of `logits`; illegal entries get exactly 0.
pub fn masked_probs(logits: &[f32], legal: &Legality) -> Vec<f32> {
    let mask = legal.mask();
    let max = logits
        .iter()
        .zip(mask)
        .filter(|(_, ok)| *ok)
        .map(|(&l, _)| l)
        .fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = logits
        .iter()
        .zip(mask)
        .map(|(&l, ok)| if ok { (l - max).exp() } else { 0.0 })
        .collect();
    let total: f32 = exps.iter().sum();
    if total > 0.0 && total.is_finite() {
        exps.into_iter().map(|e| e / total).collect()
    } else {
        exps
    }
}

fn sample_index(weights: &[f32], rng: &mut dyn RngCore) -> Result<usize, AgentError> {
    let dist = WeightedIndex::new(weights).map_err(|e| AgentError::Sampling(e.to_string()))?;
    Ok(dist.sample(rng))
}

/// Policy/value network plus the parameters it trains.
pub struct PolicyAgent {
    net: PolicyValueNet,
    varmap: VarMap,
    device: Device,
    settings: AgentSettings,
    name: String,
}

impl PolicyAgent {
    pub fn new(settings: AgentSettings, device: Device) -> Result<Self, AgentError> {
        let varmap = VarMap::new();
        let vb = VarBuilder::from_varmap(&varmap, DType::F32, &device);
        let net = PolicyValueNet::new(settings.layout.width(), settings.hidden_dim, &vb)?;
        Ok(Self {
            net,
            varmap,
            device,
            settings,
            name: "policy".to_string(),
        })
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn settings(&self) -> &AgentSettings {
        &self.settings
    }

    pub fn device(&self) -> &Device {
        &self.device
    }

    pub fn net(&self) -> &PolicyValueNet {
        &self.net
    }

    pub fn varmap(&self) -> &VarMap {
        &self.varmap
    }

    /// Scales chip-valued features by `chip_scale`; card and flag slots pass through.
    pub fn normalise(&self, state: &[f32]) -> Vec<f32> {
        let layout = &self.settings.layout;
        let scale = self.settings.chip_scale.max(f32::MIN_POSITIVE);
        state
            .iter()
            .enumerate()
            .map(|(i, &x)| if layout.is_chip_feature(i) { x / scale } else { x })
            .collect()
    }

    /// Builds a `[batch, width]` input tensor.
    pub fn batch(&self, states: &[&[f32]]) -> Result<Tensor, AgentError> {
        let width = self.settings.layout.width();
        let data: Vec<f32> = states.iter().flat_map(|s| self.normalise(s)).collect();
        Ok(Tensor::from_vec(data, (states.len(), width), &self.device)?)
    }

    pub fn forward(&self, states: &[&[f32]]) -> Result<NetOutput, AgentError> {
        let xs = self.batch(states)?;
        Ok(self.net.forward(&xs)?)
    }

    /// Action logits, raise logits and value for one state.
    pub fn evaluate(&self, state: &[f32]) -> Result<(Vec<f32>, Vec<f32>, f32), AgentError> {
        let out = self.forward(&[state])?;
        let action = out.action_logits.squeeze(0)?.to_vec1::<f32>()?;
        let raise = out.raise_logits.squeeze(0)?.to_vec1::<f32>()?;
        let value = out.value.flatten_all()?.to_vec1::<f32>()?;
        Ok((action, raise, value.first().copied().unwrap_or(0.0)))
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), AgentError> {
        if let Some(parent) = path.as_ref().parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        self.varmap.save(path)?;
        Ok(())
    }

    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> Result<(), AgentError> {
        self.varmap.load(path)?;
        Ok(())
    }

    /// Loads the checkpoint trained under `profile`, whichever seat wrote it.
    pub fn load_for_profile(
        settings: AgentSettings,
        device: Device,
        dir: &Path,
        profile: RiskProfile,
    ) -> Result<Self, AgentError> {
        let path = find_checkpoint(dir, profile)?;
        let mut agent = Self::new(settings, device)?.with_name(profile.name());
        agent.load(&path)?;
        debug!(path = %path.display(), %profile, "loaded checkpoint");
        Ok(agent)
    }
}

impl std::fmt::Debug for PolicyAgent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PolicyAgent")
            .field("name", &self.name)
            .field("settings", &self.settings)
            .finish()
    }
}

impl Agent for PolicyAgent {
    fn act(
        &self,
        state: &[f32],
        legal: &Legality,
        rng: &mut dyn RngCore,
    ) -> Result<Decision, AgentError> {
        if !legal.any() {
            return Err(AgentError::NoLegalAction);
        }
        let (action_logits, raise_logits, value) = self.evaluate(state)?;
        let probs = masked_probs(&action_logits, legal);
        let idx = sample_index(&probs, rng)?;
        let sampled = ActionKind::from_index(idx).ok_or(AgentError::NoLegalAction)?;

        let mut decision = if sampled == ActionKind::Raise {
            let bucket = sample_index(&masked_probs(&raise_logits, &Legality::from_mask([true; 4])), rng)?;
            let layout = &self.settings.layout;
            let amount = bucket_amount(
                bucket,
                layout.pot_of(state),
                self.settings.min_raise,
                layout.raise_capacity_of(state),
            );
            resolve_raise(sampled, Some(bucket), amount, legal)
        } else {
            resolve_raise(sampled, None, 0, legal)
        };
        decision.value = Some(value);
        Ok(decision)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Checkpoint file name for a seat's trained parameters.
pub fn checkpoint_file_name(seat: usize, profile: RiskProfile) -> String {
    format!("seat{}_{}.safetensors", seat, profile.name())
}

/// Lowest-seat checkpoint in `dir` written under `profile`.
pub fn find_checkpoint(dir: &Path, profile: RiskProfile) -> Result<PathBuf, AgentError> {
    let suffix = format!("_{}.safetensors", profile.name());
    let missing = || AgentError::MissingCheckpoint {
        profile: profile.name().to_string(),
        dir: dir.to_path_buf(),
    };
    if !dir.is_dir() {
        return Err(missing());
    }
    let mut found: Vec<(usize, PathBuf)> = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let seat = name
            .strip_prefix("seat")
            .and_then(|rest| rest.strip_suffix(suffix.as_str()))
            .and_then(|n| n.parse::<usize>().ok());
        if let Some(seat) = seat {
            found.push((seat, path));
        }
    }
    found.sort();
    found.into_iter().next().map(|(_, p)| p).ok_or_else(missing)
}
