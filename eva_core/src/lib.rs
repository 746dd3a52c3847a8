#![forbid(unsafe_code)]

//! Core domain model and rule engine for the EVA wellness assistant.
//!
//! This crate provides:
//! - Domain types (observations, session state, alerts, payloads)
//! - The wellness rule engine and its canned responses
//! - In-memory session hosting
//! - Configuration and logging setup for host binaries

pub mod types;
pub mod error;
pub mod config;
pub mod logging;
pub mod responses;
pub mod engine;
pub mod session;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use config::Config;
pub use engine::{clear_all, process, process_at, reset_timer, wellness_score};
pub use session::{Session, SessionMetrics, SessionRegistry};
