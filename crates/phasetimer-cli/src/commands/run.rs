use std::time::Duration;

use clap::Args;
use phasetimer_core::session::{self, Command};
use phasetimer_core::{Config, Event, Notifier, NullNotifier, Snapshot};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use crate::notifier::DesktopNotifier;

#[derive(Args)]
pub struct RunArgs {
    /// Work phase length in minutes (defaults to config)
    #[arg(long = "work", allow_negative_numbers = true)]
    work_minutes: Option<i64>,
    /// Break phase length in minutes (defaults to config)
    #[arg(long = "break", allow_negative_numbers = true)]
    break_minutes: Option<i64>,
    /// Start counting down immediately
    #[arg(long)]
    start: bool,
    /// Disable desktop notifications
    #[arg(long)]
    no_notify: bool,
    /// Print events and snapshots as JSON lines instead of status lines
    #[arg(long)]
    json: bool,
}

fn render(json: bool, event: Option<&Event>, snapshot: &Snapshot) {
    if json {
        if let Some(event) = event {
            if let Ok(line) = serde_json::to_string(event) {
                println!("{line}");
            }
        }
        if let Ok(line) = serde_json::to_string(snapshot) {
            println!("{line}");
        }
        return;
    }

    if let Some(Event::PhaseCompleted { completed, next, .. }) = event {
        println!("{} complete, starting {}", completed.label(), next.label());
    }
    println!("{}", snapshot.status_line());
}

/// Forward stdin lines to the session until EOF or `quit`.
async fn read_commands(tx: mpsc::Sender<Command>) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                tracing::warn!(error = %e, "failed to read stdin");
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }
        match line.parse::<Command>() {
            Ok(command) => {
                if tx.send(command).await.is_err() || command == Command::Quit {
                    break;
                }
            }
            Err(e) => eprintln!("error: {e}"),
        }
    }
}

pub fn run(args: RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let mut timer = config.timer();
    if args.work_minutes.is_some() || args.break_minutes.is_some() {
        let durations = timer.durations();
        timer.apply_durations(
            args.work_minutes.unwrap_or(durations.work_minutes),
            args.break_minutes.unwrap_or(durations.break_minutes),
        );
    }

    let notifier: Box<dyn Notifier> = if args.no_notify || !config.notifications.enabled {
        Box::new(NullNotifier)
    } else {
        Box::new(DesktopNotifier)
    };

    let json = args.json;
    render(json, None, &timer.snapshot());

    let runtime = tokio::runtime::Runtime::new()?;
    let start = args.start;
    let timer = runtime.block_on(async move {
        let (tx, rx) = mpsc::channel(16);
        if start {
            tx.send(Command::Start).await.ok();
        }
        tokio::spawn(read_commands(tx));
        session::run(timer, rx, notifier, |event, snapshot| render(json, event, snapshot)).await
    });
    // stdin reads sit on a blocking thread that cannot be interrupted.
    runtime.shutdown_timeout(Duration::from_millis(100));

    tracing::info!(
        sessions = timer.completed_work_sessions(),
        "timer stopped"
    );
    Ok(())
}
