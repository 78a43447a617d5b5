//! Reconciliation between the server-side timer and the locally displayed
//! one.
//!
//! The server is the single source of truth; the local once-per-second tick
//! is a display smoothing technique only. Every remote call is tagged with a
//! monotonic sequence number allocated before the request goes out, and a
//! response whose sequence number is older than the latest applied one is
//! discarded, so a poll that was already in flight when the user issued a
//! start or stop can never clobber the command's result.

use everhour::domain::{Task, Timer};

use crate::time_utils::format_hms;

pub type Seq = u64;

/// Locally held snapshot of the running timer, advanced by [`TimerSync::tick`]
/// between polls and replaced wholesale by each applied server response.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveTimer {
    pub task_id: String,
    pub task_name: String,
    pub project_id: Option<String>,
    pub duration_secs: i64,
    pub today_secs: i64,
    pub comment: Option<String>,
}

impl ActiveTimer {
    fn from_snapshot(timer: &Timer, task: &Task) -> Self {
        Self {
            task_id: task.id.clone(),
            task_name: task.name.clone(),
            project_id: task.primary_project().map(str::to_string),
            duration_secs: timer.duration,
            today_secs: timer.today,
            comment: timer.comment.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TimerPhase {
    /// Before the first poll has resolved.
    Unknown,
    /// Server reports no running timer.
    Idle,
    /// Server reports a running timer; the local tick display is live.
    Active(ActiveTimer),
    /// Stop requested, awaiting server confirmation. No ticking.
    Stopping(ActiveTimer),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Applied,
    /// The response was older than the latest applied one and was discarded.
    Stale,
}

#[derive(Debug)]
pub struct TimerSync {
    phase: TimerPhase,
    next_seq: Seq,
    applied_seq: Seq,
}

impl Default for TimerSync {
    fn default() -> Self {
        Self::new()
    }
}

impl TimerSync {
    pub fn new() -> Self {
        Self {
            phase: TimerPhase::Unknown,
            next_seq: 0,
            applied_seq: 0,
        }
    }

    pub fn phase(&self) -> &TimerPhase {
        &self.phase
    }

    pub fn is_ticking(&self) -> bool {
        matches!(self.phase, TimerPhase::Active(_))
    }

    /// Allocate the sequence number for a remote call, before the request is
    /// sent.
    pub fn begin_request(&mut self) -> Seq {
        self.next_seq += 1;
        self.next_seq
    }

    fn is_stale(&self, seq: Seq) -> bool {
        seq < self.applied_seq
    }

    /// Apply a poll result. Server truth wins: an active timer replaces the
    /// local snapshot (resetting tick drift to zero), anything else means
    /// idle.
    pub fn apply_refresh(&mut self, seq: Seq, timer: &Timer) -> Applied {
        if self.is_stale(seq) {
            return Applied::Stale;
        }
        self.applied_seq = seq;

        self.phase = match &timer.task {
            Some(task) if timer.is_active() => {
                TimerPhase::Active(ActiveTimer::from_snapshot(timer, task))
            }
            _ => TimerPhase::Idle,
        };
        Applied::Applied
    }

    /// Raise the sequence floor to a just-issued start command, so polls that
    /// were in flight before the user acted get discarded even if the start
    /// has not resolved yet.
    pub fn begin_start(&mut self, seq: Seq) {
        self.applied_seq = self.applied_seq.max(seq);
    }

    /// Apply a successful start. Transitions straight to Active from the
    /// returned snapshot instead of waiting for the next poll.
    pub fn apply_start(&mut self, seq: Seq, timer: &Timer) -> Applied {
        self.apply_refresh(seq, timer)
    }

    /// Transition Active -> Stopping while the stop request is in flight. The
    /// snapshot is remembered so a transport failure can revert.
    pub fn begin_stop(&mut self, seq: Seq) {
        self.applied_seq = self.applied_seq.max(seq);
        if let TimerPhase::Active(timer) = &self.phase {
            self.phase = TimerPhase::Stopping(timer.clone());
        }
    }

    /// The server confirmed the stop.
    pub fn apply_stop(&mut self, seq: Seq) -> Applied {
        if self.is_stale(seq) {
            return Applied::Stale;
        }
        self.applied_seq = seq;
        if matches!(self.phase, TimerPhase::Stopping(_)) {
            self.phase = TimerPhase::Idle;
        }
        Applied::Applied
    }

    /// The stop request failed. A conflict (server had no running timer)
    /// resolves to Idle; a transport failure reverts to Active, since the
    /// server-side timer presumably still runs.
    pub fn fail_stop(&mut self, seq: Seq, conflict: bool) -> Applied {
        if self.is_stale(seq) {
            return Applied::Stale;
        }
        self.applied_seq = seq;
        if let TimerPhase::Stopping(timer) = &self.phase {
            self.phase = if conflict {
                TimerPhase::Idle
            } else {
                TimerPhase::Active(timer.clone())
            };
        }
        Applied::Applied
    }

    /// Advance the cosmetic one-second display counter. Only ticks while
    /// Active; never written back to the server, fully superseded by the next
    /// applied snapshot.
    pub fn tick(&mut self) {
        if let TimerPhase::Active(timer) = &mut self.phase {
            timer.duration_secs += 1;
            timer.today_secs += 1;
        }
    }

    /// One line of status text for the display widget.
    pub fn status_line(&self) -> String {
        match &self.phase {
            TimerPhase::Unknown => "Syncing...".to_string(),
            TimerPhase::Idle => "No active timer".to_string(),
            TimerPhase::Active(t) | TimerPhase::Stopping(t) => {
                format!("{}: {}", t.task_name, format_hms(t.duration_secs))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use everhour::domain::TimerStatus;

    fn active_timer(task_id: &str, name: &str, duration: i64) -> Timer {
        Timer {
            status: TimerStatus::Active,
            duration,
            today: duration,
            task: Some(Task {
                id: task_id.to_string(),
                name: name.to_string(),
                projects: vec!["pr:1".to_string()],
            }),
            started_at: Some("2024-05-12 10:00:00".to_string()),
            user: None,
            comment: None,
        }
    }

    fn stopped_timer() -> Timer {
        Timer {
            status: TimerStatus::Stopped,
            duration: 0,
            today: 0,
            task: None,
            started_at: None,
            user: None,
            comment: None,
        }
    }

    #[test]
    fn first_refresh_with_stopped_status_goes_idle() {
        let mut sync = TimerSync::new();
        assert_eq!(sync.phase(), &TimerPhase::Unknown);
        assert_eq!(sync.status_line(), "Syncing...");

        let seq = sync.begin_request();
        assert_eq!(sync.apply_refresh(seq, &stopped_timer()), Applied::Applied);
        assert_eq!(sync.phase(), &TimerPhase::Idle);
        assert_eq!(sync.status_line(), "No active timer");
    }

    #[test]
    fn start_transitions_to_active_and_ticks() {
        let mut sync = TimerSync::new();
        let seq = sync.begin_request();
        sync.begin_start(seq);
        sync.apply_start(seq, &active_timer("T1", "Write spec", 0));

        assert!(sync.is_ticking());
        assert_eq!(sync.status_line(), "Write spec: 00:00:00");
        sync.tick();
        assert_eq!(sync.status_line(), "Write spec: 00:00:01");
    }

    #[test]
    fn refresh_resets_local_drift_to_server_truth() {
        let mut sync = TimerSync::new();
        let seq = sync.begin_request();
        sync.apply_start(seq, &active_timer("T1", "Write spec", 0));
        for _ in 0..5 {
            sync.tick();
        }

        // Next poll carries the authoritative duration; the display jumps to
        // it and resumes ticking from there.
        let seq = sync.begin_request();
        sync.apply_refresh(seq, &active_timer("T1", "Write spec", 42));
        assert_eq!(sync.status_line(), "Write spec: 00:00:42");
        sync.tick();
        assert_eq!(sync.status_line(), "Write spec: 00:00:43");
    }

    #[test]
    fn poll_in_flight_before_start_is_discarded() {
        let mut sync = TimerSync::new();
        let poll_seq = sync.begin_request(); // poll goes out first
        let start_seq = sync.begin_request(); // user starts a timer
        sync.begin_start(start_seq);
        sync.apply_start(start_seq, &active_timer("T1", "Write spec", 0));

        // The stale poll resolves afterwards claiming nothing is running.
        assert_eq!(sync.apply_refresh(poll_seq, &stopped_timer()), Applied::Stale);
        assert!(sync.is_ticking());
    }

    #[test]
    fn stale_poll_discarded_even_before_start_resolves() {
        let mut sync = TimerSync::new();
        let first = sync.begin_request();
        sync.apply_refresh(first, &active_timer("T1", "Write spec", 10));

        let poll_seq = sync.begin_request();
        let start_seq = sync.begin_request();
        sync.begin_start(start_seq);

        // Poll resolves while the start is still in flight; it must not win.
        assert_eq!(sync.apply_refresh(poll_seq, &stopped_timer()), Applied::Stale);
        assert!(sync.is_ticking());

        sync.apply_start(start_seq, &active_timer("T2", "Review", 0));
        assert_eq!(sync.status_line(), "Review: 00:00:00");
    }

    #[test]
    fn newer_refresh_supersedes_start() {
        let mut sync = TimerSync::new();
        let start_seq = sync.begin_request();
        sync.begin_start(start_seq);
        sync.apply_start(start_seq, &active_timer("T1", "Write spec", 0));

        // A poll issued after the start reports the timer was stopped by
        // another client. Newer wins.
        let poll_seq = sync.begin_request();
        assert_eq!(sync.apply_refresh(poll_seq, &stopped_timer()), Applied::Applied);
        assert_eq!(sync.phase(), &TimerPhase::Idle);
    }

    #[test]
    fn stop_conflict_resolves_to_idle() {
        let mut sync = TimerSync::new();
        let seq = sync.begin_request();
        sync.apply_start(seq, &active_timer("T1", "Write spec", 5));

        let stop_seq = sync.begin_request();
        sync.begin_stop(stop_seq);
        assert!(!sync.is_ticking());

        // Server says there was nothing to stop. Already idle, not an error.
        sync.fail_stop(stop_seq, true);
        assert_eq!(sync.phase(), &TimerPhase::Idle);
    }

    #[test]
    fn stop_transport_failure_reverts_to_active() {
        let mut sync = TimerSync::new();
        let seq = sync.begin_request();
        sync.apply_start(seq, &active_timer("T1", "Write spec", 5));

        let stop_seq = sync.begin_request();
        sync.begin_stop(stop_seq);
        sync.fail_stop(stop_seq, false);

        assert!(sync.is_ticking());
        assert_eq!(sync.status_line(), "Write spec: 00:00:05");
    }

    #[test]
    fn successful_stop_goes_idle_and_stops_ticking() {
        let mut sync = TimerSync::new();
        let seq = sync.begin_request();
        sync.apply_start(seq, &active_timer("T1", "Write spec", 5));

        let stop_seq = sync.begin_request();
        sync.begin_stop(stop_seq);
        sync.apply_stop(stop_seq);

        assert_eq!(sync.phase(), &TimerPhase::Idle);
        let before = sync.status_line();
        sync.tick();
        assert_eq!(sync.status_line(), before);
    }

    #[test]
    fn tick_is_a_noop_outside_active() {
        let mut sync = TimerSync::new();
        sync.tick();
        assert_eq!(sync.phase(), &TimerPhase::Unknown);

        let seq = sync.begin_request();
        sync.apply_refresh(seq, &stopped_timer());
        sync.tick();
        assert_eq!(sync.phase(), &TimerPhase::Idle);

        let seq = sync.begin_request();
        sync.apply_start(seq, &active_timer("T1", "Write spec", 0));
        let stop_seq = sync.begin_request();
        sync.begin_stop(stop_seq);
        sync.tick();
        match sync.phase() {
            TimerPhase::Stopping(t) => assert_eq!(t.duration_secs, 0),
            other => panic!("expected Stopping, got {:?}", other),
        }
    }

    #[test]
    fn stale_poll_cannot_resurrect_a_stopped_timer() {
        let mut sync = TimerSync::new();
        let seq = sync.begin_request();
        sync.apply_start(seq, &active_timer("T1", "Write spec", 5));

        let poll_seq = sync.begin_request(); // in flight, still sees the timer
        let stop_seq = sync.begin_request();
        sync.begin_stop(stop_seq);
        sync.apply_stop(stop_seq);

        assert_eq!(
            sync.apply_refresh(poll_seq, &active_timer("T1", "Write spec", 6)),
            Applied::Stale
        );
        assert_eq!(sync.phase(), &TimerPhase::Idle);
    }

    #[test]
    fn active_status_without_task_is_treated_as_idle() {
        let mut sync = TimerSync::new();
        let seq = sync.begin_request();
        let timer = Timer {
            task: None,
            ..active_timer("T1", "Write spec", 5)
        };
        sync.apply_refresh(seq, &timer);
        assert_eq!(sync.phase(), &TimerPhase::Idle);
    }
}
