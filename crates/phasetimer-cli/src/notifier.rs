//! Desktop notifications via `notify-rust`.

use notify_rust::Notification;
use phasetimer_core::{NotificationRequest, Notifier};

const APP_NAME: &str = "phasetimer";

/// Shows a desktop notification on a blocking worker so the tick loop
/// never waits on the notification daemon. Failures are logged and dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct DesktopNotifier;

impl Notifier for DesktopNotifier {
    fn notify(&self, request: NotificationRequest) {
        tokio::task::spawn_blocking(move || {
            let result = Notification::new()
                .summary(&request.title)
                .body(&request.body)
                .appname(APP_NAME)
                .show();
            if let Err(e) = result {
                tracing::debug!(error = %e, "desktop notification unavailable");
            }
        });
    }
}
