use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum SessionStatus {
    Running,
    Completed,
    Cancelled,
}

impl SessionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Running => "Running",
            SessionStatus::Completed => "Completed",
            SessionStatus::Cancelled => "Cancelled",
        }
    }
}

/// Summary record for one run through the stretch rotation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StretchSession {
    pub id: String,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub status: SessionStatus,
    pub stretches_completed: u32,
}

impl StretchSession {
    pub fn begin() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            started_at: Utc::now(),
            completed_at: None,
            status: SessionStatus::Running,
            stretches_completed: 0,
        }
    }
}

/// The session's mutable runtime state. Owned by the session loop and
/// mutated only there; everything a renderer needs is published as a
/// `StatusFrame` derived from this struct.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    pub current_stretch_index: usize,
    pub completed_count: u32,
    pub seconds_remaining: u32,
    pub timer_running: bool,
    pub done: bool,
}

impl SessionState {
    pub fn new(start_index: usize, countdown_secs: u32) -> Self {
        Self {
            current_stretch_index: start_index,
            completed_count: 0,
            seconds_remaining: countdown_secs,
            timer_running: false,
            done: false,
        }
    }
}
