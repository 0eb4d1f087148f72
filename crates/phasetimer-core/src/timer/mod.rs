mod engine;
mod phase;

pub use engine::{tick, PhaseTimer, RunState, TimerState, Transition};
pub use phase::{Durations, Phase};
