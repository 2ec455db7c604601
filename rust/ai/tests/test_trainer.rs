use pokergym_ai::config::TrainerConfig;
use pokergym_ai::risk::RiskProfile;
use pokergym_ai::trainer::MultiAgentTrainer;
use pokergym_engine::game::TableConfig;

fn config(seats: usize) -> TrainerConfig {
    TrainerConfig {
        table: TableConfig::with_seats(seats, 11),
        hidden_dim: 16,
        log_every: 5,
        ..TrainerConfig::default()
    }
}

#[test]
fn profiles_are_assigned_round_robin() {
    let t = MultiAgentTrainer::new(config(4)).expect("trainer");
    assert_eq!(
        t.profiles(),
        vec![
            RiskProfile::Neutral,
            RiskProfile::Averse,
            RiskProfile::Seeking,
            RiskProfile::Neutral
        ]
    );
}

#[test]
fn episodes_conserve_chips_and_update_actors() {
    let mut t = MultiAgentTrainer::new(config(3)).expect("trainer");
    for _ in 0..12 {
        let report = t.run_episode().expect("episode");
        assert_eq!(report.raw.iter().sum::<i64>(), 0);
        for seat in 0..3 {
            assert_eq!(report.losses[seat].is_some(), report.decisions[seat] > 0);
            if let Some(loss) = report.losses[seat] {
                assert!(loss.is_finite());
            }
        }
    }
    assert_eq!(t.episodes_run(), 12);
}

#[test]
fn shaped_rewards_follow_profiles() {
    let mut t = MultiAgentTrainer::new(config(3)).expect("trainer");
    let report = t.run_episode().expect("episode");
    for (seat, profile) in t.profiles().into_iter().enumerate() {
        assert_eq!(report.shaped[seat], profile.shape(report.raw[seat] as f64));
    }
}

#[test]
fn train_plays_the_configured_episodes() {
    let cfg = TrainerConfig {
        episodes: 6,
        ..config(2)
    };
    let mut t = MultiAgentTrainer::new(cfg).expect("trainer");
    let run = t.train().expect("train");
    assert_eq!(t.episodes_run(), 6);
    assert_eq!(run.summaries.len(), 2);
    assert!(run.summaries.iter().all(|s| s.episodes == 6));
    let total: i64 = run.summaries.iter().map(|s| s.total_raw).sum();
    assert_eq!(total, 0);
    assert!(run.checkpoints.is_empty());
}

#[test]
fn train_writes_checkpoints_named_by_seat_and_profile() {
    let dir = tempfile::tempdir().expect("tempdir");
    let cfg = TrainerConfig {
        episodes: 2,
        checkpoint_dir: Some(dir.path().join("ckpt")),
        ..config(3)
    };
    let mut t = MultiAgentTrainer::new(cfg).expect("trainer");
    let run = t.train().expect("train");
    let names: Vec<String> = run
        .checkpoints
        .iter()
        .filter_map(|p| p.file_name().and_then(|n| n.to_str()).map(String::from))
        .collect();
    assert_eq!(
        names,
        vec![
            "seat0_neutral.safetensors",
            "seat1_averse.safetensors",
            "seat2_seeking.safetensors"
        ]
    );
    assert!(run.checkpoints.iter().all(|p| p.exists()));
}

#[test]
fn invalid_config_is_rejected() {
    let cfg = TrainerConfig {
        hidden_dim: 0,
        ..config(2)
    };
    assert!(MultiAgentTrainer::new(cfg).is_err());
    let cfg = TrainerConfig {
        episodes: 0,
        ..config(2)
    };
    assert!(MultiAgentTrainer::new(cfg).is_err());
}
