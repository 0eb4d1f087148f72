//! One-second tick source.
//!
//! A [`Ticker`] owns at most one interval task. Every time the timer's
//! run state, phase or durations change the owner calls [`Ticker::sync`];
//! the running task is aborted before a replacement is spawned, so two
//! intervals never overlap. Each task stamps its ticks with a generation
//! number and ticks from an aborted generation are discarded by
//! [`Ticker::is_current`].

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use crate::timer::{Durations, Phase, RunState, TimerState};

pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// The slice of timer state that decides whether (and how) the tick source runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickKey {
    pub run_state: RunState,
    pub phase: Phase,
    pub durations: Durations,
}

impl TickKey {
    pub fn of(state: &TimerState) -> Self {
        Self {
            run_state: state.run_state,
            phase: state.phase,
            durations: state.durations,
        }
    }

    /// Ticks only need to flow while the countdown is active.
    pub fn wants_ticks(&self) -> bool {
        self.run_state == RunState::Active
    }
}

#[derive(Debug)]
pub struct Ticker {
    period: Duration,
    tx: mpsc::Sender<u64>,
    task: Option<JoinHandle<()>>,
    key: Option<TickKey>,
    generation: u64,
}

impl Ticker {
    /// Create an idle ticker and the receiving end of its tick channel.
    pub fn new() -> (Self, mpsc::Receiver<u64>) {
        Self::with_period(TICK_PERIOD)
    }

    pub fn with_period(period: Duration) -> (Self, mpsc::Receiver<u64>) {
        let (tx, rx) = mpsc::channel(16);
        let ticker = Self {
            period,
            tx,
            task: None,
            key: None,
            generation: 0,
        };
        (ticker, rx)
    }

    /// Re-evaluate the tick source against `key`.
    ///
    /// Returns `true` when the previous source was cancelled or a new one
    /// was started. Must be called from within a tokio runtime.
    pub fn sync(&mut self, key: TickKey) -> bool {
        if self.key == Some(key) {
            return false;
        }
        self.key = Some(key);
        self.stop();

        if key.wants_ticks() {
            self.generation += 1;
            let generation = self.generation;
            let period = self.period;
            let tx = self.tx.clone();
            self.task = Some(tokio::spawn(async move {
                let mut interval = interval_at(Instant::now() + period, period);
                interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
                loop {
                    interval.tick().await;
                    if tx.send(generation).await.is_err() {
                        break;
                    }
                }
            }));
            tracing::debug!(generation, ?key, "tick source started");
        }
        true
    }

    /// Cancel the current source, if any.
    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            tracing::debug!(generation = self.generation, "tick source stopped");
        }
    }

    pub fn is_active(&self) -> bool {
        self.task.is_some()
    }

    /// Whether a tick stamped `generation` came from the live source.
    pub fn is_current(&self, generation: u64) -> bool {
        self.task.is_some() && generation == self.generation
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.stop();
    }
}
