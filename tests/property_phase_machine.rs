mod common;

use common::{frame, replay_env};
use contact_reward::domain::models::shaping::{DISCOVERY_BONUS, FORCE_EMA_ALPHA};
use contact_reward::{Action, Phase, StepOutcome};
use proptest::prelude::*;

fn rank(phase: Phase) -> u8 {
    match phase {
        Phase::Searching => 0,
        Phase::Discovered => 1,
        Phase::Withdrawing => 2,
    }
}

/// Play replayed frames to the end (or until terminal) and collect
/// `(outcome, force_ema, discovery_made, milestone_reached)` per tick.
fn play(frames: Vec<Vec<f64>>) -> Vec<(StepOutcome, f64, bool, bool)> {
    let ticks = frames.len();
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap();

    runtime.block_on(async move {
        let mut env = replay_env(frames, 10_000);
        env.reset().unwrap();
        let mut out = Vec::with_capacity(ticks);
        for _ in 0..ticks {
            let outcome = env.step(&Action::IDLE).await.unwrap();
            let terminal = outcome.is_terminal();
            let state = env.state();
            out.push((
                outcome,
                state.force_ema,
                state.discovery_made(),
                state.distance_milestone_reached(),
            ));
            if terminal {
                break;
            }
        }
        out
    })
}

fn frames_strategy() -> impl Strategy<Value = Vec<Vec<f64>>> {
    prop::collection::vec(
        (-0.4f64..0.1, -0.1f64..0.1, 0.0f64..3.0, -1.0f64..1.0),
        1..120,
    )
    .prop_map(|ticks| {
        ticks
            .into_iter()
            .map(|(x, z, fz, fx)| frame([x, 0.0, z], [0.0, 0.0, 0.0], [fx, 0.0, fz]))
            .collect()
    })
}

proptest! {
    /// Property: the smoothed force follows `0.8 * prev + 0.2 * |force|` every tick
    #[test]
    fn prop_force_ema_recurrence(frames in frames_strategy()) {
        let forces: Vec<f64> = frames
            .iter()
            .map(|raw| (raw[6] * raw[6] + raw[7] * raw[7] + raw[8] * raw[8]).sqrt())
            .collect();

        let mut prev = 0.0;
        for ((_, ema, _, _), magnitude) in play(frames).iter().zip(forces) {
            let expected = (1.0 - FORCE_EMA_ALPHA) * prev + FORCE_EMA_ALPHA * magnitude;
            prop_assert!((ema - expected).abs() < 1e-9, "ema {} expected {}", ema, expected);
            prev = *ema;
        }
    }

    /// Property: latches never clear and the phase never moves backwards
    #[test]
    fn prop_latches_are_monotonic(frames in frames_strategy()) {
        let mut last_rank = 0;
        let mut was_discovered = false;
        let mut was_withdrawn = false;

        for (outcome, _, discovered, withdrawn) in play(frames) {
            prop_assert!(rank(outcome.phase) >= last_rank);
            prop_assert!(discovered || !was_discovered);
            prop_assert!(withdrawn || !was_withdrawn);
            last_rank = rank(outcome.phase);
            was_discovered = discovered;
            was_withdrawn = withdrawn;
        }
    }

    /// Property: the discovery bonus is paid at most once, on the first
    /// tick the phase leaves `Searching`
    #[test]
    fn prop_discovery_bonus_paid_once(frames in frames_strategy()) {
        let mut bonuses = 0;
        let mut prev_phase = Phase::Searching;
        for (outcome, _, _, _) in play(frames) {
            if outcome.components.discovery_bonus > 0.0 {
                bonuses += 1;
                prop_assert_eq!(outcome.components.discovery_bonus, DISCOVERY_BONUS);
                prop_assert_eq!(prev_phase, Phase::Searching);
                prop_assert!(outcome.phase.is_discovered());
            }
            prev_phase = outcome.phase;
        }
        prop_assert!(bonuses <= 1);
    }

    /// Property: reward always equals the sum of its components and is finite
    #[test]
    fn prop_reward_is_component_sum(frames in frames_strategy()) {
        for (outcome, _, _, _) in play(frames) {
            prop_assert!(outcome.reward.is_finite());
            prop_assert!((outcome.reward - outcome.components.total()).abs() < 1e-9);
        }
    }
}
