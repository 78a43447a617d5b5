use serde::{Deserialize, Serialize};

use super::{Task, User};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerStatus {
    Active,
    Stopped,
}

/// Server-side record of an in-progress or completed work session.
///
/// Authoritative state lives on the remote service; the "no active timer"
/// response is just `{"status":"stopped"}`, so every field besides `status`
/// is defaulted.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Timer {
    pub status: TimerStatus,
    /// Seconds elapsed in the current session.
    #[serde(default)]
    pub duration: i64,
    /// Seconds tracked on this task today.
    #[serde(default)]
    pub today: i64,
    #[serde(default)]
    pub task: Option<Task>,
    /// Server-local timestamp, `YYYY-MM-DD HH:MM:SS`. Kept verbatim; only
    /// used for diagnostics.
    #[serde(default, rename = "startedAt")]
    pub started_at: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub comment: Option<String>,
}

impl Timer {
    /// True when the server reports a running session with a task attached.
    pub fn is_active(&self) -> bool {
        self.status == TimerStatus::Active && self.task.is_some()
    }
}
