//! Wellness rule engine.
//!
//! Every operation here is a pure function from one `SessionState` to the
//! next. For each observation the engine:
//! - Bumps the interaction counter and the simulated inactivity streak
//! - Derives a wellness score from fixed penalties
//! - Composes the response from independently triggered fragments
//! - Raises a critical alert once the inactivity streak reaches the threshold

use crate::responses;
use crate::{
    Activity, AlertRecord, Emotion, HealthInputs, Observation, ResponsePayload, SessionState,
    Severity,
};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Glasses of water below which the hydration reminder fires
pub const HYDRATION_GOAL_GLASSES: u32 = 4;

/// Steps below which the walking reminder fires
pub const DAILY_STEP_GOAL: u32 = 2000;

const MAX_SCORE: i32 = 100;
const DISTRESS_PENALTY: i32 = 20;
const INACTIVITY_PENALTY: i32 = 10;
const MEDICATION_PENALTY: i32 = 15;
const HYDRATION_PENALTY: i32 = 10;
const STEPS_PENALTY: i32 = 10;

/// Process one observation against the wall clock
///
/// See [`process_at`] for the rules.
pub fn process(state: &SessionState, observation: &Observation) -> (SessionState, ResponsePayload) {
    process_at(state, observation, Utc::now())
}

/// Process one observation, stamping any new alert with `now`
///
/// ## Rules
///
/// 1. `interaction_count` increases by one.
/// 2. `inactive_hours` increases by one when inactive, otherwise resets to 0.
///    Each observation counts as one simulated hour.
/// 3. `wellness_score` is recomputed from scratch (see [`wellness_score`]).
/// 4. Response fragments, in order: emotion, activity, medication,
///    hydration, steps, echo.
/// 5. An inactive streak at or past the threshold raises a `High` alert,
///    which is appended to `alert_history`.
pub fn process_at(
    state: &SessionState,
    observation: &Observation,
    now: DateTime<Utc>,
) -> (SessionState, ResponsePayload) {
    let mut next = state.clone();

    if let Some(health) = observation.health {
        next.medication_taken = health.medication_taken;
        next.water_intake = health.water_intake;
        next.daily_steps = health.daily_steps;
    }

    next.interaction_count = next.interaction_count.saturating_add(1);

    next.inactive_hours = match observation.activity {
        Activity::Inactive => next.inactive_hours.saturating_add(1),
        Activity::Active => 0,
    };

    next.wellness_score = wellness_score(observation.emotion, observation.activity, next.health());
    let score_delta = i32::from(next.wellness_score) - i32::from(state.wellness_score);

    tracing::debug!(
        "Interaction {}: emotion={}, activity={}, inactive_hours={}, wellness={}",
        next.interaction_count,
        observation.emotion,
        observation.activity,
        next.inactive_hours,
        next.wellness_score
    );

    let mut fragments: Vec<String> = vec![responses::emotion_fragment(observation.emotion).into()];

    let threshold = observation.inactivity_threshold_hours.max(1);
    let mut alert = None;

    if observation.activity == Activity::Inactive && next.inactive_hours >= threshold {
        fragments.push(responses::INACTIVE_DISTRESS.into());
        let message = responses::critical_alert(next.inactive_hours);

        tracing::warn!(
            "Inactivity alert raised after {} hours (threshold {})",
            next.inactive_hours,
            threshold
        );

        next.alert_history.push(AlertRecord {
            id: Uuid::new_v4(),
            timestamp: now,
            message: message.clone(),
            severity: Severity::High,
        });
        alert = Some(message);
    } else if observation.activity == Activity::Inactive {
        fragments.push(responses::INACTIVE_REMINDER.into());
    }

    if !next.medication_taken {
        fragments.push(responses::MEDICATION.into());
    }

    if next.water_intake < HYDRATION_GOAL_GLASSES {
        fragments.push(responses::HYDRATION.into());
    }

    if next.daily_steps < DAILY_STEP_GOAL {
        fragments.push(responses::STEPS.into());
    }

    if let Some(text) = observation.spoken_text() {
        fragments.push(responses::echo_fragment(text));
    }

    let payload = ResponsePayload {
        response_text: fragments.join("\n"),
        alert,
        score_delta,
    };

    (next, payload)
}

/// Compute the 0-100 wellness score from fixed penalty deductions
pub fn wellness_score(emotion: Emotion, activity: Activity, health: HealthInputs) -> u8 {
    let mut score = MAX_SCORE;

    if emotion.is_distressed() {
        score -= DISTRESS_PENALTY;
    }
    if activity == Activity::Inactive {
        score -= INACTIVITY_PENALTY;
    }
    if !health.medication_taken {
        score -= MEDICATION_PENALTY;
    }
    if health.water_intake < HYDRATION_GOAL_GLASSES {
        score -= HYDRATION_PENALTY;
    }
    if health.daily_steps < DAILY_STEP_GOAL {
        score -= STEPS_PENALTY;
    }

    // Bounded by construction, still clamped before narrowing
    score.clamp(0, MAX_SCORE) as u8
}

/// Clear the inactivity streak, leaving everything else untouched
pub fn reset_timer(state: &SessionState) -> SessionState {
    tracing::debug!("Inactivity timer reset (was {} hours)", state.inactive_hours);
    SessionState {
        inactive_hours: 0,
        ..state.clone()
    }
}

/// Return the session-start defaults, dropping all alert history
pub fn clear_all(state: &SessionState) -> SessionState {
    tracing::debug!(
        "Clearing session after {} interactions and {} alerts",
        state.interaction_count,
        state.alert_history.len()
    );
    SessionState::default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap()
    }

    fn healthy() -> HealthInputs {
        HealthInputs {
            medication_taken: true,
            water_intake: 4,
            daily_steps: 2000,
        }
    }

    fn busy_state() -> SessionState {
        let mut state = SessionState {
            inactive_hours: 3,
            interaction_count: 7,
            wellness_score: 40,
            medication_taken: true,
            water_intake: 2,
            daily_steps: 1500,
            alert_history: vec![],
        };
        let (next, _) = process_at(
            &state,
            &Observation::new(Emotion::Sad, Activity::Inactive),
            fixed_now(),
        );
        state.alert_history = next.alert_history;
        state
    }

    #[test]
    fn test_scenario_sad_and_inactive_twice_raises_alert() {
        crate::logging::init_test();
        let obs = Observation::new(Emotion::Sad, Activity::Inactive).with_threshold(2);

        let (first, payload) = process_at(&SessionState::default(), &obs, fixed_now());
        assert_eq!(first.inactive_hours, 1);
        assert!(payload.alert.is_none());
        assert!(payload.response_text.contains(responses::INACTIVE_REMINDER));
        assert!(first.alert_history.is_empty());

        let (second, payload) = process_at(&first, &obs, fixed_now());
        assert_eq!(second.inactive_hours, 2);
        assert_eq!(second.interaction_count, 2);
        assert!(payload.alert.is_some());
        assert_eq!(second.alert_history.len(), 1);
        assert_eq!(second.alert_history[0].severity, Severity::High);
        assert_eq!(second.alert_history[0].timestamp, fixed_now());
        assert_eq!(Some(&second.alert_history[0].message), payload.alert.as_ref());
        assert!(payload.response_text.contains("feeling down"));
        assert!(payload.response_text.contains(responses::INACTIVE_DISTRESS));
        assert!(!payload.response_text.contains(responses::INACTIVE_REMINDER));
    }

    #[test]
    fn test_scenario_happy_and_healthy_scores_full() {
        let obs = Observation::new(Emotion::Happy, Activity::Active).with_health(healthy());

        let (next, payload) = process_at(&SessionState::default(), &obs, fixed_now());

        assert_eq!(next.wellness_score, 100);
        assert_eq!(payload.score_delta, 15);
        assert!(payload.alert.is_none());
        assert_eq!(payload.response_text, responses::HAPPY);
    }

    #[test]
    fn test_scenario_utterance_is_echoed_last() {
        let obs = Observation::new(Emotion::Neutral, Activity::Active).with_utterance("hello");

        let (_, payload) = process_at(&SessionState::default(), &obs, fixed_now());

        let last_line = payload.response_text.lines().last().unwrap();
        assert!(last_line.contains("hello"));
        assert_eq!(last_line, responses::echo_fragment("hello"));
    }

    #[test]
    fn test_scenario_clear_all_restores_defaults() {
        let cleared = clear_all(&SessionState::default());
        assert_eq!(
            cleared,
            SessionState {
                inactive_hours: 0,
                interaction_count: 0,
                wellness_score: 85,
                medication_taken: false,
                water_intake: 0,
                daily_steps: 0,
                alert_history: vec![],
            }
        );

        assert_eq!(clear_all(&busy_state()), SessionState::default());
    }

    #[test]
    fn test_reset_timer_only_touches_inactivity() {
        let state = busy_state();
        let reset = reset_timer(&state);

        assert_eq!(reset.inactive_hours, 0);
        assert_eq!(
            SessionState {
                inactive_hours: state.inactive_hours,
                ..reset.clone()
            },
            state
        );
        assert_eq!(reset_timer(&reset), reset);
    }

    #[test]
    fn test_activity_drives_inactive_hours() {
        let state = busy_state();

        let (next, _) = process_at(
            &state,
            &Observation::new(Emotion::Neutral, Activity::Active),
            fixed_now(),
        );
        assert_eq!(next.inactive_hours, 0);

        let (next, _) = process_at(
            &state,
            &Observation::new(Emotion::Neutral, Activity::Inactive).with_threshold(6),
            fixed_now(),
        );
        assert_eq!(next.inactive_hours, state.inactive_hours + 1);
    }

    #[test]
    fn test_alert_fires_iff_inactive_streak_reaches_threshold() {
        for threshold in 1..=6 {
            for emotion in Emotion::ALL {
                let mut state = SessionState::default();
                for _ in 0..8 {
                    for activity in [Activity::Inactive, Activity::Inactive, Activity::Active] {
                        let obs = Observation::new(emotion, activity).with_threshold(threshold);
                        let (next, payload) = process_at(&state, &obs, fixed_now());

                        let should_fire = activity == Activity::Inactive
                            && next.inactive_hours >= threshold;
                        assert_eq!(payload.alert.is_some(), should_fire);

                        let grown = next.alert_history.len() - state.alert_history.len();
                        assert_eq!(grown, usize::from(should_fire));
                        if should_fire {
                            let newest = next.alert_history.last().unwrap();
                            assert_eq!(newest.severity, Severity::High);
                            assert!(newest.message.contains(&next.inactive_hours.to_string()));
                        }
                        state = next;
                    }
                }
            }
        }
    }

    #[test]
    fn test_alert_history_is_append_only() {
        let obs = Observation::new(Emotion::Anxious, Activity::Inactive).with_threshold(1);
        let (first, _) = process_at(&SessionState::default(), &obs, fixed_now());
        let (second, _) = process_at(&first, &obs, fixed_now());
        let (third, _) = process_at(
            &second,
            &Observation::new(Emotion::Happy, Activity::Active),
            fixed_now(),
        );

        assert_eq!(second.alert_history.len(), 2);
        assert_eq!(second.alert_history[0], first.alert_history[0]);
        assert_eq!(third.alert_history, second.alert_history);
    }

    #[test]
    fn test_wellness_penalties() {
        let unwell = HealthInputs::default();
        assert_eq!(wellness_score(Emotion::Happy, Activity::Active, healthy()), 100);
        assert_eq!(wellness_score(Emotion::Sad, Activity::Active, healthy()), 80);
        assert_eq!(wellness_score(Emotion::Anxious, Activity::Inactive, healthy()), 70);
        assert_eq!(wellness_score(Emotion::Neutral, Activity::Active, unwell), 65);
        assert_eq!(wellness_score(Emotion::Sad, Activity::Inactive, unwell), 35);
    }

    #[test]
    fn test_wellness_score_stays_in_range_over_any_sequence() {
        let mut state = SessionState::default();
        let healths = [HealthInputs::default(), healthy()];
        for (i, emotion) in Emotion::ALL.iter().cycle().take(40).enumerate() {
            let activity = Activity::ALL[i % 2];
            let obs = Observation::new(*emotion, activity).with_health(healths[i % 3 % 2]);
            let (next, _) = process_at(&state, &obs, fixed_now());
            assert!(next.wellness_score <= 100);
            state = next;
        }
    }

    #[test]
    fn test_health_fragments_follow_inputs() {
        let obs = Observation::new(Emotion::Neutral, Activity::Active).with_health(HealthInputs {
            medication_taken: true,
            water_intake: 3,
            daily_steps: 5000,
        });
        let (next, payload) = process_at(&SessionState::default(), &obs, fixed_now());

        assert!(next.medication_taken);
        assert_eq!(next.water_intake, 3);
        assert!(!payload.response_text.contains(responses::MEDICATION));
        assert!(payload.response_text.contains(responses::HYDRATION));
        assert!(!payload.response_text.contains(responses::STEPS));
    }

    #[test]
    fn test_fragment_order_is_fixed() {
        let obs = Observation::new(Emotion::Sad, Activity::Inactive)
            .with_threshold(1)
            .with_utterance("I miss my daughter");
        let (_, payload) = process_at(&SessionState::default(), &obs, fixed_now());

        let lines: Vec<&str> = payload.response_text.lines().collect();
        assert_eq!(
            lines,
            vec![
                responses::SAD,
                responses::INACTIVE_DISTRESS,
                responses::MEDICATION,
                responses::HYDRATION,
                responses::STEPS,
                "You said: \"I miss my daughter\". I'm here to listen.",
            ]
        );
    }

    #[test]
    fn test_missing_health_keeps_session_values() {
        let mut state = SessionState::default();
        state.medication_taken = true;
        state.water_intake = 6;

        let (next, payload) = process_at(
            &state,
            &Observation::new(Emotion::Neutral, Activity::Active),
            fixed_now(),
        );
        assert!(next.medication_taken);
        assert_eq!(next.water_intake, 6);
        assert_eq!(next.wellness_score, 90);
        assert_eq!(payload.response_text.lines().count(), 2);
    }

    #[test]
    fn test_zero_threshold_behaves_like_one() {
        let obs = Observation::new(Emotion::Neutral, Activity::Inactive).with_threshold(0);
        let (_, payload) = process_at(&SessionState::default(), &obs, fixed_now());
        assert!(payload.alert.is_some());
    }
}
