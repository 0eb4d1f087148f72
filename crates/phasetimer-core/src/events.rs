use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::{Durations, Phase};

/// Every state change of the phase timer produces an Event.
/// The front-end renders from them; nothing else subscribes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    TimerStarted {
        phase: Phase,
        remaining_secs: i64,
        at: DateTime<Utc>,
    },
    TimerPaused {
        remaining_secs: i64,
        at: DateTime<Utc>,
    },
    TimerResumed {
        remaining_secs: i64,
        at: DateTime<Utc>,
    },
    TimerReset {
        at: DateTime<Utc>,
    },
    DurationsApplied {
        durations: Durations,
        remaining_secs: i64,
        at: DateTime<Utc>,
    },
    /// One second elapsed within the current phase.
    Ticked {
        phase: Phase,
        remaining_secs: i64,
        at: DateTime<Utc>,
    },
    /// The countdown ran out and the timer flipped into `next`.
    PhaseCompleted {
        completed: Phase,
        next: Phase,
        remaining_secs: i64,
        completed_work_sessions: u64,
        at: DateTime<Utc>,
    },
}

/// Side effects requested by a transition. Executing them is up to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Effect {
    Notify(NotificationRequest),
}

/// Title/body pair handed to the notification sink on every phase flip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationRequest {
    pub title: String,
    pub body: String,
}

impl NotificationRequest {
    pub const DEFAULT_TITLE: &'static str = "Pomodoro Timer";
    pub const DEFAULT_BODY: &'static str = "Time is up!";

    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }
}

impl Default for NotificationRequest {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TITLE, Self::DEFAULT_BODY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_serialize_with_type_tag() {
        let event = Event::TimerReset { at: Utc::now() };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "timer_reset");

        let event = Event::PhaseCompleted {
            completed: Phase::Work,
            next: Phase::Break,
            remaining_secs: 300,
            completed_work_sessions: 1,
            at: Utc::now(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "phase_completed");
        assert_eq!(json["next"], "break");
    }

    #[test]
    fn default_notification_text() {
        let n = NotificationRequest::default();
        assert_eq!(n.title, "Pomodoro Timer");
        assert_eq!(n.body, "Time is up!");
    }
}
