//! # Phasetimer Core Library
//!
//! This library provides the core logic for a Pomodoro work/break timer.
//! The CLI binary is a thin front-end over the same core library.
//!
//! ## Architecture
//!
//! - **Timer**: A tick-driven phase state machine; the caller invokes `tick()`
//!   once per second and delivers the returned effects
//! - **Ticker**: The one-second tick source, cancelled and restarted whenever
//!   the timer's run state, phase or durations change
//! - **Session**: Async loop joining ticks, user commands and notifications
//! - **Storage**: TOML-based configuration
//!
//! ## Key Components
//!
//! - [`PhaseTimer`]: Core timer state machine
//! - [`tick`]: Pure one-second transition
//! - [`Notifier`]: Notification sink
//! - [`Config`]: Application configuration management

pub mod display;
pub mod error;
pub mod events;
pub mod notify;
pub mod session;
pub mod storage;
pub mod ticker;
pub mod timer;

pub use display::{format_remaining, Controls, Snapshot};
pub use error::{ConfigError, CoreError};
pub use events::{Effect, Event, NotificationRequest};
pub use notify::{Notifier, NullNotifier, RecordingNotifier};
pub use session::Command;
pub use storage::Config;
pub use ticker::{TickKey, Ticker};
pub use timer::{tick, Durations, Phase, PhaseTimer, RunState, TimerState, Transition};
