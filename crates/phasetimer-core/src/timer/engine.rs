//! Phase timer implementation.
//!
//! The timer is a tick-driven state machine. It does not use internal
//! threads - the caller is responsible for calling `tick()` once per second
//! (see [`crate::ticker::Ticker`]).
//!
//! ## State Transitions
//!
//! ```text
//! Idle --start--> Active --pause--> Suspended --resume--> Active
//! {Active, Suspended} --reset--> Idle
//! ```
//!
//! `tick()` only has an effect in `Active`. It never changes the run state,
//! only the phase, the remaining time and the session count.
//!
//! ## Usage
//!
//! ```ignore
//! let mut timer = PhaseTimer::new(Durations::default());
//! timer.start();
//! // Once per second:
//! let transition = timer.tick();
//! for effect in transition.effects { /* deliver notifications */ }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::phase::{Durations, Phase};
use crate::events::{Effect, Event, NotificationRequest};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunState {
    Idle,
    Active,
    /// Running, but frozen until resumed.
    Suspended,
}

/// Complete countdown state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerState {
    pub durations: Durations,
    pub remaining_secs: i64,
    pub run_state: RunState,
    pub phase: Phase,
    pub completed_work_sessions: u64,
}

impl TimerState {
    /// Fresh state: idle, at the start of a work phase.
    pub fn new(durations: Durations) -> Self {
        Self {
            durations,
            remaining_secs: durations.secs(Phase::Work),
            run_state: RunState::Idle,
            phase: Phase::Work,
            completed_work_sessions: 0,
        }
    }

    pub fn running(&self) -> bool {
        self.run_state != RunState::Idle
    }

    pub fn paused(&self) -> bool {
        self.run_state == RunState::Suspended
    }
}

impl Default for TimerState {
    fn default() -> Self {
        Self::new(Durations::default())
    }
}

/// Result of a single tick: the next state plus what happened.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: TimerState,
    pub event: Option<Event>,
    pub effects: Vec<Effect>,
}

/// Advance `state` by one second.
///
/// Pure: the caller decides where the new state goes and how effects are
/// delivered. When the countdown would reach zero the phase flips within the
/// same tick and the new phase starts at its full length.
pub fn tick(state: &TimerState, notification: &NotificationRequest, at: DateTime<Utc>) -> Transition {
    let mut next = state.clone();
    if state.run_state != RunState::Active {
        return Transition {
            state: next,
            event: None,
            effects: Vec::new(),
        };
    }

    let remaining = state.remaining_secs.saturating_sub(1);
    if remaining > 0 {
        next.remaining_secs = remaining;
        return Transition {
            event: Some(Event::Ticked {
                phase: next.phase,
                remaining_secs: remaining,
                at,
            }),
            state: next,
            effects: Vec::new(),
        };
    }

    let completed = state.phase;
    next.phase = completed.next();
    next.remaining_secs = next.durations.secs(next.phase);
    if completed == Phase::Work {
        next.completed_work_sessions = next.completed_work_sessions.saturating_add(1);
    }

    Transition {
        event: Some(Event::PhaseCompleted {
            completed,
            next: next.phase,
            remaining_secs: next.remaining_secs,
            completed_work_sessions: next.completed_work_sessions,
            at,
        }),
        state: next,
        effects: vec![Effect::Notify(notification.clone())],
    }
}

/// Owns a [`TimerState`] and applies the five transitions to it.
#[derive(Debug, Clone)]
pub struct PhaseTimer {
    state: TimerState,
    notification: NotificationRequest,
}

impl PhaseTimer {
    /// Create an idle timer at the start of a work phase.
    pub fn new(durations: Durations) -> Self {
        Self {
            state: TimerState::new(durations),
            notification: NotificationRequest::default(),
        }
    }

    /// Replace the text sent on every phase flip.
    pub fn with_notification(mut self, notification: NotificationRequest) -> Self {
        self.notification = notification;
        self
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> &TimerState {
        &self.state
    }

    pub fn run_state(&self) -> RunState {
        self.state.run_state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn remaining_secs(&self) -> i64 {
        self.state.remaining_secs
    }

    pub fn durations(&self) -> Durations {
        self.state.durations
    }

    pub fn completed_work_sessions(&self) -> u64 {
        self.state.completed_work_sessions
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn start(&mut self) -> Option<Event> {
        match self.state.run_state {
            RunState::Idle => {
                self.state.run_state = RunState::Active;
                tracing::debug!(phase = ?self.state.phase, remaining = self.state.remaining_secs, "timer started");
                Some(Event::TimerStarted {
                    phase: self.state.phase,
                    remaining_secs: self.state.remaining_secs,
                    at: Utc::now(),
                })
            }
            RunState::Active | RunState::Suspended => None,
        }
    }

    pub fn pause(&mut self) -> Option<Event> {
        match self.state.run_state {
            RunState::Active => {
                self.state.run_state = RunState::Suspended;
                tracing::debug!(remaining = self.state.remaining_secs, "timer paused");
                Some(Event::TimerPaused {
                    remaining_secs: self.state.remaining_secs,
                    at: Utc::now(),
                })
            }
            _ => None,
        }
    }

    pub fn resume(&mut self) -> Option<Event> {
        match self.state.run_state {
            RunState::Suspended => {
                self.state.run_state = RunState::Active;
                tracing::debug!(remaining = self.state.remaining_secs, "timer resumed");
                Some(Event::TimerResumed {
                    remaining_secs: self.state.remaining_secs,
                    at: Utc::now(),
                })
            }
            _ => None,
        }
    }

    /// Back to an idle work phase with the session count cleared.
    pub fn reset(&mut self) -> Option<Event> {
        self.state = TimerState::new(self.state.durations);
        tracing::debug!(remaining = self.state.remaining_secs, "timer reset");
        Some(Event::TimerReset { at: Utc::now() })
    }

    /// Store new durations and restart the current phase's countdown from
    /// its (possibly new) length. While idle that is always the work length.
    pub fn apply_durations(&mut self, work_minutes: i64, break_minutes: i64) -> Option<Event> {
        let durations = Durations::new(work_minutes, break_minutes);
        self.state.durations = durations;
        self.state.remaining_secs = durations.secs(self.state.phase);
        tracing::debug!(work_minutes, break_minutes, "durations applied");
        Some(Event::DurationsApplied {
            durations,
            remaining_secs: self.state.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Call once per second. A no-op unless active.
    pub fn tick(&mut self) -> Transition {
        let transition = tick(&self.state, &self.notification, Utc::now());
        if let Some(Event::PhaseCompleted {
            completed, next, completed_work_sessions, ..
        }) = &transition.event
        {
            tracing::info!(?completed, ?next, completed_work_sessions, "phase completed");
        }
        self.state = transition.state.clone();
        transition
    }
}

impl Default for PhaseTimer {
    fn default() -> Self {
        Self::new(Durations::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tick_n(timer: &mut PhaseTimer, n: usize) -> Vec<Transition> {
        (0..n).map(|_| timer.tick()).collect()
    }

    #[test]
    fn start_pause_resume() {
        let mut timer = PhaseTimer::default();
        assert_eq!(timer.run_state(), RunState::Idle);

        assert!(timer.start().is_some());
        assert_eq!(timer.run_state(), RunState::Active);

        assert!(timer.pause().is_some());
        assert_eq!(timer.run_state(), RunState::Suspended);

        assert!(timer.resume().is_some());
        assert_eq!(timer.run_state(), RunState::Active);
    }

    #[test]
    fn start_while_running_is_noop() {
        let mut timer = PhaseTimer::default();
        timer.start();
        assert!(timer.start().is_none());
        timer.pause();
        assert!(timer.start().is_none());
        assert_eq!(timer.run_state(), RunState::Suspended);
    }

    #[test]
    fn pause_and_resume_require_matching_state() {
        let mut timer = PhaseTimer::default();
        assert!(timer.pause().is_none());
        assert!(timer.resume().is_none());
        timer.start();
        assert!(timer.resume().is_none());
        assert_eq!(timer.run_state(), RunState::Active);
    }

    #[test]
    fn tick_decrements_when_active() {
        let mut timer = PhaseTimer::default();
        timer.start();
        let t = timer.tick();
        assert_eq!(timer.remaining_secs(), 1499);
        assert!(t.effects.is_empty());
        assert!(matches!(t.event, Some(Event::Ticked { remaining_secs: 1499, .. })));
    }

    #[test]
    fn tick_is_noop_when_idle_or_suspended() {
        let mut timer = PhaseTimer::default();
        let t = timer.tick();
        assert!(t.event.is_none());
        assert_eq!(timer.remaining_secs(), 1500);

        timer.start();
        timer.tick();
        timer.pause();
        tick_n(&mut timer, 10);
        assert_eq!(timer.remaining_secs(), 1499);
    }

    #[test]
    fn default_cycle_scenario() {
        let mut timer = PhaseTimer::default();
        timer.start();

        let transitions = tick_n(&mut timer, 1499);
        assert!(transitions.iter().all(|t| t.effects.is_empty()));
        assert_eq!(timer.phase(), Phase::Work);
        assert_eq!(timer.remaining_secs(), 1);

        let flip = timer.tick();
        assert_eq!(timer.phase(), Phase::Break);
        assert_eq!(timer.remaining_secs(), 300);
        assert_eq!(timer.completed_work_sessions(), 1);
        assert_eq!(
            flip.effects,
            vec![Effect::Notify(NotificationRequest::default())]
        );

        tick_n(&mut timer, 300);
        assert_eq!(timer.phase(), Phase::Work);
        assert_eq!(timer.remaining_secs(), 1500);
        assert_eq!(timer.completed_work_sessions(), 1);
        assert_eq!(timer.run_state(), RunState::Active);
    }

    #[test]
    fn zero_work_duration_flips_on_first_tick() {
        let mut timer = PhaseTimer::new(Durations::new(0, 5));
        timer.start();
        let t = timer.tick();
        assert_eq!(timer.phase(), Phase::Break);
        assert_eq!(timer.remaining_secs(), 300);
        assert_eq!(timer.completed_work_sessions(), 1);
        assert_eq!(t.effects.len(), 1);
    }

    #[test]
    fn negative_durations_flip_every_tick() {
        let mut timer = PhaseTimer::new(Durations::new(-1, -2));
        timer.start();
        timer.tick();
        assert_eq!(timer.phase(), Phase::Break);
        assert_eq!(timer.remaining_secs(), -120);
        timer.tick();
        assert_eq!(timer.phase(), Phase::Work);
        assert_eq!(timer.remaining_secs(), -60);
        assert_eq!(timer.completed_work_sessions(), 1);
    }

    #[test]
    fn reset_goes_to_beginning() {
        let mut timer = PhaseTimer::new(Durations::new(1, 1));
        timer.start();
        tick_n(&mut timer, 60);
        assert_eq!(timer.phase(), Phase::Break);
        timer.pause();

        assert!(timer.reset().is_some());
        assert_eq!(timer.run_state(), RunState::Idle);
        assert_eq!(timer.phase(), Phase::Work);
        assert_eq!(timer.remaining_secs(), 60);
        assert_eq!(timer.completed_work_sessions(), 0);
    }

    #[test]
    fn apply_durations_while_idle_resets_to_new_work_length() {
        let mut timer = PhaseTimer::default();
        timer.apply_durations(50, 10);
        assert_eq!(timer.remaining_secs(), 3000);
        assert_eq!(timer.durations(), Durations::new(50, 10));
        assert_eq!(timer.run_state(), RunState::Idle);
    }

    #[test]
    fn apply_durations_mid_break_uses_break_length() {
        let mut timer = PhaseTimer::new(Durations::new(0, 5));
        timer.start();
        timer.tick();
        assert_eq!(timer.phase(), Phase::Break);

        timer.apply_durations(25, 2);
        assert_eq!(timer.remaining_secs(), 120);
        assert_eq!(timer.run_state(), RunState::Active);
    }

    #[test]
    fn custom_notification_text_is_emitted() {
        let text = NotificationRequest::new("Focus", "Switch phases");
        let mut timer = PhaseTimer::new(Durations::new(0, 0)).with_notification(text.clone());
        timer.start();
        let t = timer.tick();
        assert_eq!(t.effects, vec![Effect::Notify(text)]);
    }

    #[test]
    fn pure_tick_does_not_touch_input() {
        let mut state = TimerState::default();
        state.run_state = RunState::Active;
        let before = state.clone();
        let t = tick(&state, &NotificationRequest::default(), Utc::now());
        assert_eq!(state, before);
        assert_eq!(t.state.remaining_secs, 1499);
    }

    #[test]
    fn running_and_paused_flags_follow_run_state() {
        let mut state = TimerState::default();
        assert!(!state.running() && !state.paused());
        state.run_state = RunState::Active;
        assert!(state.running() && !state.paused());
        state.run_state = RunState::Suspended;
        assert!(state.running() && state.paused());
    }
}
