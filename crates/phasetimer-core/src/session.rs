//! Async driver that mounts one [`PhaseTimer`].
//!
//! Commands and ticks are serialized through a single `select!` loop, so a
//! tick always sees the durations and run state left by the last command.
//! After every change the [`Ticker`] is re-synced against the new state.

use tokio::sync::mpsc;

use crate::display::Snapshot;
use crate::events::{Effect, Event};
use crate::notify::Notifier;
use crate::ticker::{TickKey, Ticker};
use crate::timer::PhaseTimer;

/// User input accepted by a running session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Pause,
    Resume,
    Reset,
    ApplyDurations { work_minutes: i64, break_minutes: i64 },
    /// Re-render without changing anything.
    Status,
    Quit,
}

impl std::str::FromStr for Command {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let head = parts.next().ok_or_else(|| "empty command".to_string())?;
        let cmd = match head.to_ascii_lowercase().as_str() {
            "start" => Command::Start,
            "pause" => Command::Pause,
            "resume" => Command::Resume,
            "reset" => Command::Reset,
            "status" => Command::Status,
            "quit" | "exit" => Command::Quit,
            "apply" => {
                let mut minutes = || -> Result<i64, String> {
                    let raw = parts
                        .next()
                        .ok_or_else(|| "usage: apply <work-minutes> <break-minutes>".to_string())?;
                    raw.parse::<i64>()
                        .map_err(|_| format!("cannot parse '{raw}' as minutes"))
                };
                let work_minutes = minutes()?;
                let break_minutes = minutes()?;
                Command::ApplyDurations {
                    work_minutes,
                    break_minutes,
                }
            }
            other => return Err(format!("unknown command: {other}")),
        };
        if parts.next().is_some() {
            return Err(format!("unexpected arguments to '{head}'"));
        }
        Ok(cmd)
    }
}

impl PhaseTimer {
    /// Apply a command. `Status` and `Quit` leave the timer untouched.
    pub fn handle(&mut self, command: Command) -> Option<Event> {
        match command {
            Command::Start => self.start(),
            Command::Pause => self.pause(),
            Command::Resume => self.resume(),
            Command::Reset => self.reset(),
            Command::ApplyDurations {
                work_minutes,
                break_minutes,
            } => self.apply_durations(work_minutes, break_minutes),
            Command::Status | Command::Quit => None,
        }
    }
}

/// Drive `timer` until `Quit` arrives or the command channel closes.
///
/// `render` is called after every command and every effective tick with the
/// event (if any) and a fresh snapshot. Returns the timer as it was at exit.
pub async fn run<N, R>(
    mut timer: PhaseTimer,
    mut commands: mpsc::Receiver<Command>,
    notifier: N,
    mut render: R,
) -> PhaseTimer
where
    N: Notifier,
    R: FnMut(Option<&Event>, &Snapshot),
{
    let (mut ticker, mut ticks) = Ticker::new();
    ticker.sync(TickKey::of(timer.state()));

    loop {
        tokio::select! {
            Some(generation) = ticks.recv() => {
                if !ticker.is_current(generation) {
                    continue;
                }
                let transition = timer.tick();
                for effect in transition.effects {
                    match effect {
                        Effect::Notify(request) => notifier.notify(request),
                    }
                }
                if transition.event.is_some() {
                    render(transition.event.as_ref(), &timer.snapshot());
                }
            }
            command = commands.recv() => {
                let command = match command {
                    None | Some(Command::Quit) => break,
                    Some(command) => command,
                };
                let event = timer.handle(command);
                render(event.as_ref(), &timer.snapshot());
            }
        }
        ticker.sync(TickKey::of(timer.state()));
    }

    ticker.stop();
    tracing::debug!(sessions = timer.completed_work_sessions(), "session ended");
    timer
}
