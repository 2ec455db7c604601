//! Multi-agent REINFORCE over whole hands.
//!
//! Each seat owns an independent [`PolicyAgent`], optimizer and
//! [`RiskProfile`]. An episode is one hand: actions are sampled without
//! gradients while the hand plays out, then every seat that acted replays its
//! recorded states with gradients and takes one optimizer step on
//! `-mean(log pi(a|s)) * shaped_return`.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use candle_core::{D, Device, Tensor};
use candle_nn::{AdamW, Optimizer, ParamsAdamW};
use pokergym_engine::env::PokerEnv;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use serde::Serialize;
use tracing::{debug, info};

use crate::Agent;
use crate::agent::{PolicyAgent, checkpoint_file_name};
use crate::config::TrainerConfig;
use crate::episode::play_hand;
use crate::errors::AgentError;
use crate::network::NUM_ACTIONS;
use crate::risk::RiskProfile;

/// Added to illegal logits during replay; finite so log-softmax stays NaN-free.
const ILLEGAL_LOGIT: f32 = -1e9;

/// One decision recorded during the inference phase.
#[derive(Debug, Clone)]
pub struct Transition {
    pub state: Vec<f32>,
    pub mask: [bool; NUM_ACTIONS],
    /// Sampled action index; the raise size is not a training target.
    pub action: usize,
}

/// Per-hand outcome across all seats.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EpisodeReport {
    pub episode: u64,
    pub raw: Vec<i64>,
    pub shaped: Vec<f64>,
    pub decisions: Vec<usize>,
    /// `None` for seats that never acted this hand.
    pub losses: Vec<Option<f32>>,
}

/// What [`MultiAgentTrainer::train`] produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrainingRun {
    pub summaries: Vec<SeatSummary>,
    /// Empty when no checkpoint directory is configured.
    pub checkpoints: Vec<PathBuf>,
}

/// Rolling per-seat statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeatSummary {
    pub seat: usize,
    pub profile: RiskProfile,
    pub episodes: u64,
    pub avg_raw: f64,
    pub avg_shaped: f64,
    pub total_raw: i64,
    pub stack: u32,
}

#[derive(Debug, Default)]
struct Rolling {
    window: VecDeque<(f64, f64)>,
    cap: usize,
    total_raw: i64,
    episodes: u64,
}

impl Rolling {
    fn new(cap: usize) -> Self {
        Self {
            window: VecDeque::with_capacity(cap),
            cap: cap.max(1),
            ..Self::default()
        }
    }

    fn push(&mut self, raw: i64, shaped: f64) {
        if self.window.len() == self.cap {
            self.window.pop_front();
        }
        self.window.push_back((raw as f64, shaped));
        self.total_raw += raw;
        self.episodes += 1;
    }

    fn averages(&self) -> (f64, f64) {
        if self.window.is_empty() {
            return (0.0, 0.0);
        }
        let n = self.window.len() as f64;
        let (raw, shaped) = self
            .window
            .iter()
            .fold((0.0, 0.0), |(r, s), &(x, y)| (r + x, s + y));
        (raw / n, shaped / n)
    }
}

struct SeatLearner {
    agent: PolicyAgent,
    profile: RiskProfile,
    opt: AdamW,
    stats: Rolling,
}

pub struct MultiAgentTrainer {
    config: TrainerConfig,
    env: PokerEnv,
    seats: Vec<SeatLearner>,
    rng: ChaCha20Rng,
    episodes_run: u64,
}

impl MultiAgentTrainer {
    pub fn new(config: TrainerConfig) -> Result<Self, AgentError> {
        config.validate()?;
        let env = PokerEnv::new(config.table.clone())?;
        let settings = config.agent_settings();
        let window = usize::try_from(config.log_every).unwrap_or(usize::MAX);
        let mut seats = Vec::with_capacity(config.table.num_seats);
        for seat in 0..config.table.num_seats {
            let profile = RiskProfile::for_seat(seat);
            let agent = PolicyAgent::new(settings, Device::Cpu)?
                .with_name(format!("seat{}_{}", seat, profile.name()));
            let params = ParamsAdamW {
                lr: config.learning_rate,
                ..ParamsAdamW::default()
            };
            let opt = AdamW::new(agent.varmap().all_vars(), params)?;
            seats.push(SeatLearner {
                agent,
                profile,
                opt,
                stats: Rolling::new(window),
            });
        }
        // decks and sampling draw from separate streams
        let rng = ChaCha20Rng::seed_from_u64(config.table.seed ^ 0x5EED_5A3E);
        info!(
            seed = config.table.seed,
            seats = config.table.num_seats,
            lr = config.learning_rate,
            "trainer ready"
        );
        Ok(Self {
            config,
            env,
            seats,
            rng,
            episodes_run: 0,
        })
    }

    pub fn config(&self) -> &TrainerConfig {
        &self.config
    }

    pub fn env(&self) -> &PokerEnv {
        &self.env
    }

    pub fn episodes_run(&self) -> u64 {
        self.episodes_run
    }

    pub fn profiles(&self) -> Vec<RiskProfile> {
        self.seats.iter().map(|s| s.profile).collect()
    }

    pub fn agent(&self, seat: usize) -> Option<&PolicyAgent> {
        self.seats.get(seat).map(|s| &s.agent)
    }

    /// Plays one hand with every seat's agent, then updates each seat that acted.
    pub fn run_episode(&mut self) -> Result<EpisodeReport, AgentError> {
        let n = self.seats.len();
        let mut trajectories: Vec<Vec<Transition>> = vec![Vec::new(); n];

        // inference phase
        let seats = &self.seats;
        let rng = &mut self.rng;
        let raw = play_hand(&mut self.env, |seat, state, legal| {
            let decision = seats[seat].agent.act(state, legal, &mut *rng)?;
            trajectories[seat].push(Transition {
                state: state.to_vec(),
                mask: legal.mask(),
                action: decision.sampled.index(),
            });
            Ok(decision)
        })?;

        // update phase
        let mut shaped = Vec::with_capacity(n);
        let mut losses = Vec::with_capacity(n);
        for (seat, learner) in self.seats.iter_mut().enumerate() {
            let r = learner.profile.shape(raw[seat] as f64);
            let loss = if trajectories[seat].is_empty() {
                None
            } else {
                Some(reinforce(learner, &trajectories[seat], r)?)
            };
            learner.stats.push(raw[seat], r);
            shaped.push(r);
            losses.push(loss);
        }

        self.episodes_run += 1;
        debug!(episode = self.episodes_run, ?raw, "episode done");
        if self.episodes_run % self.config.log_every == 0 {
            for (seat, learner) in self.seats.iter().enumerate() {
                let (avg_raw, avg_shaped) = learner.stats.averages();
                info!(
                    episode = self.episodes_run,
                    seat,
                    profile = %learner.profile,
                    avg_raw,
                    avg_shaped,
                    "progress"
                );
            }
        }

        Ok(EpisodeReport {
            episode: self.episodes_run,
            raw,
            shaped,
            decisions: trajectories.iter().map(Vec::len).collect(),
            losses,
        })
    }

    /// Plays `config.episodes` hands, then writes one checkpoint per seat
    /// into `config.checkpoint_dir` when it is set.
    pub fn train(&mut self) -> Result<TrainingRun, AgentError> {
        for _ in 0..self.config.episodes {
            self.run_episode()?;
        }
        let checkpoints = match self.config.checkpoint_dir.clone() {
            Some(dir) => self.save_checkpoints(&dir)?,
            None => Vec::new(),
        };
        Ok(TrainingRun {
            summaries: self.summaries(),
            checkpoints,
        })
    }

    pub fn summaries(&self) -> Vec<SeatSummary> {
        self.seats
            .iter()
            .enumerate()
            .map(|(seat, l)| {
                let (avg_raw, avg_shaped) = l.stats.averages();
                SeatSummary {
                    seat,
                    profile: l.profile,
                    episodes: l.stats.episodes,
                    avg_raw,
                    avg_shaped,
                    total_raw: l.stats.total_raw,
                    stack: self.env.table().seats()[seat].stack(),
                }
            })
            .collect()
    }

    /// Writes one `seat{i}_{profile}.safetensors` per seat into `dir`.
    pub fn save_checkpoints(&self, dir: &Path) -> Result<Vec<PathBuf>, AgentError> {
        let mut written = Vec::with_capacity(self.seats.len());
        for (seat, l) in self.seats.iter().enumerate() {
            let path = dir.join(checkpoint_file_name(seat, l.profile));
            l.agent.save(&path)?;
            written.push(path);
        }
        info!(dir = %dir.display(), count = written.len(), "checkpoints saved");
        Ok(written)
    }
}

/// Recomputes the seat's log-probabilities with gradients and takes one step.
fn reinforce(
    learner: &mut SeatLearner,
    trajectory: &[Transition],
    shaped: f64,
) -> Result<f32, AgentError> {
    let agent = &learner.agent;
    let device = agent.device();
    let b = trajectory.len();

    let states: Vec<&[f32]> = trajectory.iter().map(|t| t.state.as_slice()).collect();
    let out = agent.forward(&states)?;

    let penalty: Vec<f32> = trajectory
        .iter()
        .flat_map(|t| t.mask.map(|ok| if ok { 0.0 } else { ILLEGAL_LOGIT }))
        .collect();
    let penalty = Tensor::from_vec(penalty, (b, NUM_ACTIONS), device)?;
    let actions: Vec<u32> = trajectory.iter().map(|t| t.action as u32).collect();
    let actions = Tensor::from_vec(actions, (b, 1), device)?;

    let logits = out.action_logits.add(&penalty)?;
    let log_probs = candle_nn::ops::log_softmax(&logits, D::Minus1)?;
    let chosen = log_probs.gather(&actions, 1)?.squeeze(1)?;
    let loss = chosen.mean_all()?.affine(-shaped, 0.0)?;

    let grads = loss.backward()?;
    learner.opt.step(&grads)?;
    Ok(loss.to_scalar::<f32>()?)
}
