//! In-memory session hosting.
//!
//! A `Session` owns one `SessionState` for the lifetime of a user's visit and
//! routes every interaction through the engine. Nothing is persisted; dropping
//! the session discards its history.

use crate::engine;
use crate::{AlertRecord, Observation, ResponsePayload, SessionState};
use serde::Serialize;
use std::collections::HashMap;
use uuid::Uuid;

/// Counters shown alongside each response
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
pub struct SessionMetrics {
    pub wellness_score: u8,
    pub interaction_count: u32,
    pub inactive_hours: u32,
    pub alert_count: usize,
}

/// A single user's session
#[derive(Clone, Debug, Default)]
pub struct Session {
    state: SessionState,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Run one observation through the engine and keep the resulting state
    pub fn interact(&mut self, observation: &Observation) -> ResponsePayload {
        let (next, payload) = engine::process(&self.state, observation);
        self.state = next;
        payload
    }

    pub fn reset_timer(&mut self) {
        self.state = engine::reset_timer(&self.state);
    }

    pub fn clear_all(&mut self) {
        self.state = engine::clear_all(&self.state);
    }

    /// The last `limit` alerts, oldest to newest
    pub fn recent_alerts(&self, limit: usize) -> &[AlertRecord] {
        self.state.recent_alerts(limit)
    }

    pub fn metrics(&self) -> SessionMetrics {
        SessionMetrics {
            wellness_score: self.state.wellness_score,
            interaction_count: self.state.interaction_count,
            inactive_hours: self.state.inactive_hours,
            alert_count: self.state.alert_history.len(),
        }
    }
}

/// Independent sessions keyed by id, for hosts serving several users
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: HashMap<Uuid, Session>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a fresh session and return its id
    pub fn create(&mut self) -> Uuid {
        let id = Uuid::new_v4();
        self.sessions.insert(id, Session::new());
        tracing::info!("Started session {}", id);
        id
    }

    pub fn get(&self, id: &Uuid) -> Option<&Session> {
        self.sessions.get(id)
    }

    pub fn get_mut(&mut self, id: &Uuid) -> Option<&mut Session> {
        self.sessions.get_mut(id)
    }

    /// End a session, handing back its final state
    pub fn remove(&mut self, id: &Uuid) -> Option<Session> {
        let removed = self.sessions.remove(id);
        if removed.is_some() {
            tracing::info!("Ended session {}", id);
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
