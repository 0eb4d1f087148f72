use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Work,
    Break,
}

impl Phase {
    /// The phase that follows this one. Phases strictly alternate.
    pub fn next(self) -> Self {
        match self {
            Phase::Work => Phase::Break,
            Phase::Break => Phase::Work,
        }
    }

    pub fn is_break(self) -> bool {
        self == Phase::Break
    }

    pub fn label(self) -> &'static str {
        match self {
            Phase::Work => "Work Session",
            Phase::Break => "Break",
        }
    }
}

/// Configured phase lengths in minutes.
///
/// Values are taken as-is from user input. Zero and negative lengths are
/// accepted and produce a degenerate countdown that flips on every tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Durations {
    pub work_minutes: i64,
    pub break_minutes: i64,
}

impl Durations {
    pub const DEFAULT_WORK_MINUTES: i64 = 25;
    pub const DEFAULT_BREAK_MINUTES: i64 = 5;

    pub fn new(work_minutes: i64, break_minutes: i64) -> Self {
        Self {
            work_minutes,
            break_minutes,
        }
    }

    pub fn minutes(&self, phase: Phase) -> i64 {
        match phase {
            Phase::Work => self.work_minutes,
            Phase::Break => self.break_minutes,
        }
    }

    /// Full length of `phase` in seconds.
    ///
    /// Uses saturating arithmetic so absurd user input cannot overflow.
    pub fn secs(&self, phase: Phase) -> i64 {
        self.minutes(phase).saturating_mul(60)
    }
}

impl Default for Durations {
    fn default() -> Self {
        Self::new(Self::DEFAULT_WORK_MINUTES, Self::DEFAULT_BREAK_MINUTES)
    }
}
