//! Core domain types for the EVA wellness assistant.
//!
//! This module defines the fundamental types used throughout the system:
//! - Observation inputs (emotion, activity, health widgets)
//! - Session state and its defaults
//! - Alert records and response payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Wellness score assigned at session start
pub const DEFAULT_WELLNESS_SCORE: u8 = 85;

/// Inactivity threshold used when the host does not configure one
pub const DEFAULT_INACTIVITY_THRESHOLD_HOURS: u32 = 2;

// ============================================================================
// Observation Types
// ============================================================================

/// Emotional state reported for an interaction
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Emotion {
    #[default]
    Neutral,
    Happy,
    Sad,
    Anxious,
}

impl Emotion {
    pub const ALL: [Emotion; 4] = [
        Emotion::Neutral,
        Emotion::Happy,
        Emotion::Sad,
        Emotion::Anxious,
    ];

    /// Sad and anxious both count as emotional distress
    pub fn is_distressed(self) -> bool {
        matches!(self, Emotion::Sad | Emotion::Anxious)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Emotion::Neutral => "neutral",
            Emotion::Happy => "happy",
            Emotion::Sad => "sad",
            Emotion::Anxious => "anxious",
        }
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Emotion {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        Emotion::ALL
            .into_iter()
            .find(|e| e.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| crate::Error::InvalidInput(format!("unknown emotion: {}", s)))
    }
}

/// Activity state reported for an interaction
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Activity {
    #[default]
    Active,
    Inactive,
}

impl Activity {
    pub const ALL: [Activity; 2] = [Activity::Active, Activity::Inactive];

    pub fn as_str(self) -> &'static str {
        match self {
            Activity::Active => "active",
            Activity::Inactive => "inactive",
        }
    }
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Activity {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        Activity::ALL
            .into_iter()
            .find(|a| a.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| crate::Error::InvalidInput(format!("unknown activity: {}", s)))
    }
}

/// Medication, hydration and step inputs captured from the health widgets
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthInputs {
    pub medication_taken: bool,
    pub water_intake: u32,
    pub daily_steps: u32,
}

/// One snapshot of user-reported inputs submitted for processing
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Observation {
    pub emotion: Emotion,
    pub activity: Activity,
    pub utterance: Option<String>,
    /// When absent, the session's current health values are scored as-is
    pub health: Option<HealthInputs>,
    pub inactivity_threshold_hours: u32,
}

impl Observation {
    pub fn new(emotion: Emotion, activity: Activity) -> Self {
        Self {
            emotion,
            activity,
            utterance: None,
            health: None,
            inactivity_threshold_hours: DEFAULT_INACTIVITY_THRESHOLD_HOURS,
        }
    }

    pub fn with_utterance(mut self, utterance: impl Into<String>) -> Self {
        self.utterance = Some(utterance.into());
        self
    }

    pub fn with_health(mut self, health: HealthInputs) -> Self {
        self.health = Some(health);
        self
    }

    pub fn with_threshold(mut self, hours: u32) -> Self {
        self.inactivity_threshold_hours = hours;
        self
    }

    /// The utterance, if it has any visible content
    pub fn spoken_text(&self) -> Option<&str> {
        self.utterance
            .as_deref()
            .filter(|text| !text.trim().is_empty())
    }
}

// ============================================================================
// Alert Types
// ============================================================================

/// Alert severity
///
/// Only `High` is produced by the current rules.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    High,
}

/// A fired alert, kept for display in the session's alert history
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AlertRecord {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub message: String,
    pub severity: Severity,
}

// ============================================================================
// Session State and Payload
// ============================================================================

/// Per-session state, owned by the host and threaded through every engine call
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SessionState {
    pub inactive_hours: u32,
    pub interaction_count: u32,
    pub wellness_score: u8,
    pub medication_taken: bool,
    pub water_intake: u32,
    pub daily_steps: u32,
    /// Append-only, oldest first
    pub alert_history: Vec<AlertRecord>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            inactive_hours: 0,
            interaction_count: 0,
            wellness_score: DEFAULT_WELLNESS_SCORE,
            medication_taken: false,
            water_intake: 0,
            daily_steps: 0,
            alert_history: Vec::new(),
        }
    }
}

impl SessionState {
    pub fn health(&self) -> HealthInputs {
        HealthInputs {
            medication_taken: self.medication_taken,
            water_intake: self.water_intake,
            daily_steps: self.daily_steps,
        }
    }

    /// The last `limit` alerts, oldest to newest
    pub fn recent_alerts(&self, limit: usize) -> &[AlertRecord] {
        let start = self.alert_history.len().saturating_sub(limit);
        &self.alert_history[start..]
    }
}

/// What the engine hands back to the host for rendering
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResponsePayload {
    pub response_text: String,
    pub alert: Option<String>,
    /// New wellness score minus the previous one
    pub score_delta: i32,
}
