//! Read-only values the front-end renders.

use serde::{Deserialize, Serialize};

use crate::timer::{Phase, PhaseTimer, RunState, TimerState};

/// Render seconds as `m:ss`. Minutes are not rolled over into hours.
pub fn format_remaining(secs: i64) -> String {
    format!("{}:{:02}", secs.div_euclid(60), secs.rem_euclid(60))
}

/// Everything needed to draw the timer at one instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: Phase,
    pub phase_label: String,
    pub run_state: RunState,
    pub running: bool,
    pub paused: bool,
    pub remaining_secs: i64,
    pub remaining: String,
    pub completed_work_sessions: u64,
    pub controls: Controls,
}

/// Which buttons the front-end should offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Controls {
    pub can_start: bool,
    pub can_pause: bool,
    pub can_resume: bool,
    pub can_reset: bool,
}

impl Controls {
    pub fn for_state(run_state: RunState) -> Self {
        Self {
            can_start: run_state == RunState::Idle,
            can_pause: run_state == RunState::Active,
            can_resume: run_state == RunState::Suspended,
            can_reset: run_state == RunState::Suspended,
        }
    }
}

impl Snapshot {
    pub fn of(state: &TimerState) -> Self {
        Self {
            phase: state.phase,
            phase_label: state.phase.label().to_string(),
            run_state: state.run_state,
            running: state.running(),
            paused: state.paused(),
            remaining_secs: state.remaining_secs,
            remaining: format_remaining(state.remaining_secs),
            completed_work_sessions: state.completed_work_sessions,
            controls: Controls::for_state(state.run_state),
        }
    }

    /// Single status line, e.g. `[Work Session] 24:59 | sessions: 0`.
    pub fn status_line(&self) -> String {
        let suffix = if self.paused { " (paused)" } else { "" };
        format!(
            "[{}] {} | sessions: {}{}",
            self.phase_label, self.remaining, self.completed_work_sessions, suffix
        )
    }
}

impl PhaseTimer {
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::of(self.state())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pads_seconds_below_ten() {
        assert_eq!(format_remaining(1500), "25:00");
        assert_eq!(format_remaining(1499), "24:59");
        assert_eq!(format_remaining(65), "1:05");
        assert_eq!(format_remaining(9), "0:09");
        assert_eq!(format_remaining(0), "0:00");
    }

    #[test]
    fn no_hour_rollover() {
        assert_eq!(format_remaining(90 * 60), "90:00");
    }

    #[test]
    fn negative_values_do_not_panic() {
        assert_eq!(format_remaining(-60), "-1:00");
        assert_eq!(format_remaining(-1), "-1:59");
    }

    #[test]
    fn controls_follow_run_state() {
        let idle = Controls::for_state(RunState::Idle);
        assert!(idle.can_start && !idle.can_pause && !idle.can_resume && !idle.can_reset);

        let active = Controls::for_state(RunState::Active);
        assert!(!active.can_start && active.can_pause && !active.can_resume);

        let suspended = Controls::for_state(RunState::Suspended);
        assert!(suspended.can_resume && suspended.can_reset && !suspended.can_pause);
    }

    #[test]
    fn snapshot_of_default_timer() {
        let snap = PhaseTimer::default().snapshot();
        assert_eq!(snap.phase, Phase::Work);
        assert_eq!(snap.phase_label, "Work Session");
        assert_eq!(snap.remaining, "25:00");
        assert!(!snap.running);
        assert_eq!(snap.status_line(), "[Work Session] 25:00 | sessions: 0");
    }

    #[test]
    fn status_line_marks_pause() {
        let mut timer = PhaseTimer::default();
        timer.start();
        timer.pause();
        assert_eq!(
            timer.snapshot().status_line(),
            "[Work Session] 25:00 | sessions: 0 (paused)"
        );
    }
}
