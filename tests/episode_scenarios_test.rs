//! End-to-end episode scenarios over replayed sensor frames.

mod common;

use std::sync::Arc;

use common::{advised_env, frame, replay_env, rest_frame};
use contact_reward::adapters::advisor::{MockAdvisor, MockBehavior};
use contact_reward::domain::models::shaping::DISCOVERY_BONUS;
use contact_reward::{Action, DomainError, EpisodeState, Phase, TerminationReason};

const EPS: f64 = 1e-9;

/// Descending at 0.1 and moving forward at 0.05 without touching anything.
fn searching_frame() -> Vec<f64> {
    frame([0.0, 0.0, 0.0], [-0.05, 0.0, -0.1], [0.0, 0.0, 0.0])
}

fn contact_frame(x: f64, z: f64) -> Vec<f64> {
    frame([x, 0.0, z], [0.0, 0.0, 0.0], [0.0, 0.0, 5.0])
}

#[tokio::test]
async fn test_fifty_contact_free_ticks_only_earn_search_terms() {
    let mut env = replay_env(vec![searching_frame(); 50], 1000);
    env.reset().unwrap();

    for _ in 0..50 {
        let outcome = env.step(&Action::IDLE).await.unwrap();
        let c = outcome.components;

        assert_eq!(outcome.phase, Phase::Searching);
        assert!(env.state().force_ema < 1.0);
        assert_eq!(c.discovery_bonus, 0.0);
        assert_eq!(c.extraction_distance, 0.0);
        assert_eq!(c.pre_milestone_force, 0.0);
        assert_eq!(c.milestone_bonus, 0.0);
        assert!((outcome.reward - c.search_subtotal()).abs() < EPS);
        // -10 step, +10 descent, +10 forward, no speed penalty at exactly 0.05
        assert!((outcome.reward - 10.0).abs() < EPS);
        assert!(!outcome.is_terminal());
    }
}

#[tokio::test]
async fn test_discovery_at_tick_thirty_pays_bonus_once() {
    let mut frames = vec![rest_frame(); 29];
    // ema jumps from 0 to exactly 1.0
    frames.push(contact_frame(0.05, -0.03));
    frames.push(contact_frame(0.05, -0.03));
    let mut env = replay_env(frames, 1000);
    env.reset().unwrap();

    for _ in 0..29 {
        let outcome = env.step(&Action::IDLE).await.unwrap();
        assert_eq!(outcome.components.discovery_bonus, 0.0);
        assert_eq!(outcome.phase, Phase::Searching);
    }

    let tick30 = env.step(&Action::IDLE).await.unwrap();
    assert_eq!(env.state().step_index, 30);
    assert!((env.state().force_ema - 1.0).abs() < EPS);
    assert_eq!(tick30.phase, Phase::Discovered);
    assert_eq!(tick30.components.discovery_bonus, DISCOVERY_BONUS);
    assert!(tick30.components.extraction_distance > 0.0);
    assert_eq!(tick30.components.search_subtotal(), 0.0);
    assert!(tick30.reward > DISCOVERY_BONUS);

    let point = env.state().discovery_point.unwrap();
    assert_eq!((point.x, point.z), (0.05, -0.03));

    let tick31 = env.step(&Action::IDLE).await.unwrap();
    assert_eq!(tick31.components.discovery_bonus, 0.0);
    assert_eq!(tick31.phase, Phase::Discovered);
    assert!(tick31.reward < DISCOVERY_BONUS);
}

#[tokio::test]
async fn test_truncation_at_exactly_episode_length() {
    let mut env = replay_env(vec![], 1000);
    env.reset().unwrap();

    for tick in 1..1000 {
        let outcome = env.step(&Action::IDLE).await.unwrap();
        assert!(!outcome.truncated, "truncated early at tick {tick}");
        assert!(!outcome.done);
    }

    let last = env.step(&Action::IDLE).await.unwrap();
    assert!(last.truncated);
    assert!(!last.done);
    assert_eq!(last.termination, Some(TerminationReason::HorizonReached));
    assert!(env.is_finished());
    assert!(matches!(
        env.step(&Action::IDLE).await,
        Err(DomainError::EpisodeFinished(1000))
    ));
}

#[tokio::test]
async fn test_non_finite_sensor_ends_episode() {
    for bad in [
        frame([0.0, 0.0, 0.0], [0.0, 0.0, 0.0], [f64::NAN, 0.0, 0.0]),
        frame([f64::INFINITY, 0.0, 0.0], [0.0, 0.0, 0.0], [0.0, 0.0, 0.0]),
        frame([0.0, 0.0, 0.0], [0.0, f64::NEG_INFINITY, 0.0], [0.0, 0.0, 0.0]),
    ] {
        let mut env = replay_env(vec![rest_frame(), bad], 1000);
        env.reset().unwrap();

        assert!(!env.step(&Action::IDLE).await.unwrap().done);
        let outcome = env.step(&Action::IDLE).await.unwrap();
        assert!(outcome.done);
        assert_eq!(
            outcome.termination,
            Some(TerminationReason::NonFiniteObservation)
        );
        assert!(outcome.reward.is_finite());
    }
}

#[tokio::test]
async fn test_non_finite_sensor_after_discovery_still_done() {
    let bad = frame([f64::NAN, 0.0, 0.0], [0.0, 0.0, 0.0], [0.0, 0.0, 5.0]);
    let mut env = replay_env(vec![contact_frame(0.0, 0.0), bad], 1000);
    env.reset().unwrap();

    env.step(&Action::IDLE).await.unwrap();
    let outcome = env.step(&Action::IDLE).await.unwrap();
    assert!(outcome.done);
    assert!(outcome.reward.is_finite());
    assert_eq!(outcome.phase, Phase::Discovered);
}

#[tokio::test]
async fn test_withdrawal_milestone_then_termination() {
    let frames = vec![
        contact_frame(0.0, 0.0),
        frame([-0.1, 0.0, 0.0], [-0.1, 0.0, 0.0], [-0.4, 0.0, 0.0]),
        frame([-0.25, 0.0, 0.0], [-0.1, 0.0, 0.0], [0.0, 0.0, 0.0]),
        frame([-0.28, 0.0, 0.0], [-0.1, 0.0, 0.0], [0.0, 0.0, 0.0]),
        frame([-0.31, 0.0, 0.0], [-0.1, 0.0, 0.0], [0.0, 0.0, 0.0]),
    ];
    let mut env = replay_env(frames, 1000);
    env.reset().unwrap();

    let found = env.step(&Action::IDLE).await.unwrap();
    assert_eq!(found.phase, Phase::Discovered);

    let retracting = env.step(&Action::IDLE).await.unwrap();
    assert_eq!(retracting.phase, Phase::Discovered);
    assert!((retracting.components.pre_milestone_force - 10.0).abs() < EPS);
    assert!((retracting.components.pre_milestone_velocity - 10.0).abs() < EPS);

    let milestone = env.step(&Action::IDLE).await.unwrap();
    assert_eq!(milestone.phase, Phase::Withdrawing);
    assert_eq!(milestone.components.milestone_bonus, 20.0);
    assert_eq!(milestone.components.milestone_clearance, 100.0);
    assert_eq!(milestone.components.pre_milestone_force, 0.0);
    assert!(!milestone.is_terminal());

    let after = env.step(&Action::IDLE).await.unwrap();
    assert_eq!(after.phase, Phase::Withdrawing);
    assert_eq!(after.components.milestone_bonus, 0.0);
    assert!(after.components.extraction_distance > 40.0);

    let last = env.step(&Action::IDLE).await.unwrap();
    assert!(last.done);
    assert!(last.truncated);
    assert_eq!(last.termination, Some(TerminationReason::WithdrawalLimit));
}

#[tokio::test]
async fn test_reset_round_trip_after_withdrawal() {
    let frames = vec![
        contact_frame(0.0, 0.0),
        frame([-0.35, 0.0, 0.0], [0.0, 0.0, 0.0], [0.0, 0.0, 0.0]),
    ];
    let advisor = Arc::new(MockAdvisor::scoring(3.0));
    let mut env = advised_env(frames, 1000, advisor);
    env.reset().unwrap();
    env.step(&Action::IDLE).await.unwrap();
    let last = env.step(&Action::IDLE).await.unwrap();
    assert!(last.done);
    assert!(!env.state().transcript.is_empty());

    env.reset().unwrap();
    let state = env.state();
    assert_eq!(state, &EpisodeState::new());
    assert_eq!(state.force_ema, 0.0);
    assert!(!state.discovery_made());
    assert_eq!(state.lateral_distance, 0.0);
    assert!(state.transcript.is_empty());
    assert_eq!(env.physics().resets, 2);
}

#[tokio::test]
async fn test_advisor_score_folding_on_terminal_tick() {
    for (score, expected) in [(7.0, -70.0), (8.0, -80.0), (8.5, 85.0)] {
        let advisor = Arc::new(MockAdvisor::scoring(score));
        let mut env = advised_env(vec![], 3, advisor.clone());
        env.reset().unwrap();

        let mut last = None;
        for _ in 0..3 {
            last = Some(env.step(&Action::IDLE).await.unwrap());
        }
        let last = last.unwrap();
        assert!(last.truncated);
        assert!((last.components.advisor_score - expected).abs() < EPS);
        assert_eq!(advisor.call_count(), 1);

        let transcript = advisor.last_transcript().unwrap();
        assert_eq!(transcript.matches("Step ").count(), 3);
    }
}

#[tokio::test]
async fn test_advisor_lateral_penalty_only_when_enabled() {
    let sideways = frame([0.0, 0.0, 0.0], [0.0, -0.02, 0.0], [0.0, 0.0, 0.0]);

    let mut plain = replay_env(vec![sideways.clone()], 10);
    plain.reset().unwrap();
    let outcome = plain.step(&Action::IDLE).await.unwrap();
    assert_eq!(outcome.components.advisor_penalty, 0.0);

    let mut advised = advised_env(vec![sideways], 10, Arc::new(MockAdvisor::scoring(5.0)));
    advised.reset().unwrap();
    let outcome = advised.step(&Action::IDLE).await.unwrap();
    assert!((outcome.components.advisor_penalty + 20.0).abs() < EPS);
}

#[tokio::test]
async fn test_failed_advisor_contributes_zero_and_still_terminates() {
    let advisor = Arc::new(MockAdvisor::new(MockBehavior::Fail("offline".into())));
    let mut env = advised_env(vec![], 2, advisor.clone());
    env.reset().unwrap();

    env.step(&Action::IDLE).await.unwrap();
    let last = env.step(&Action::IDLE).await.unwrap();
    assert!(last.truncated);
    assert_eq!(last.components.advisor_score, 0.0);
    assert_eq!(advisor.call_count(), 1);
}

#[tokio::test]
async fn test_actions_are_forwarded_unclamped() {
    let mut env = replay_env(vec![], 10);
    env.reset().unwrap();
    env.step(&Action::new(3.0, -2.0, 0.5)).await.unwrap();
    assert_eq!(env.physics().actions, vec![Action::new(3.0, -2.0, 0.5)]);
}

#[tokio::test]
async fn test_overflowing_lateral_penalty_stays_a_penalty() {
    let runaway = frame([0.0, 0.0, 0.0], [0.0, 1e306, 0.0], [0.0, 0.0, 0.0]);
    let mut env = advised_env(vec![runaway], 10, Arc::new(MockAdvisor::scoring(5.0)));
    env.reset().unwrap();

    let outcome = env.step(&Action::IDLE).await.unwrap();
    assert!(!outcome.done);
    assert_eq!(outcome.components.advisor_penalty, f64::MIN);
    assert!(outcome.reward.is_finite());
    assert!(outcome.reward < -1e300);
}
