//! Notification sink.
//!
//! Delivery is fire-and-forget: implementations must return immediately and
//! swallow their own failures. The countdown never waits on a notification.

use std::sync::{Arc, Mutex};

use crate::events::NotificationRequest;

pub trait Notifier: Send + Sync {
    fn notify(&self, request: NotificationRequest);
}

/// Drops every request. Used when notifications are disabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&self, request: NotificationRequest) {
        tracing::trace!(title = %request.title, "notification suppressed");
    }
}

/// Keeps every request in memory. Clones share the same log.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    sent: Arc<Mutex<Vec<NotificationRequest>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<NotificationRequest> {
        match self.sent.lock() {
            Ok(sent) => sent.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, request: NotificationRequest) {
        match self.sent.lock() {
            Ok(mut sent) => sent.push(request),
            Err(poisoned) => poisoned.into_inner().push(request),
        }
    }
}

impl<N: Notifier + ?Sized> Notifier for Arc<N> {
    fn notify(&self, request: NotificationRequest) {
        (**self).notify(request)
    }
}

impl<N: Notifier + ?Sized> Notifier for Box<N> {
    fn notify(&self, request: NotificationRequest) {
        (**self).notify(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_notifier_shares_log_between_clones() {
        let notifier = RecordingNotifier::new();
        let handle = notifier.clone();
        notifier.notify(NotificationRequest::default());
        assert_eq!(handle.sent(), vec![NotificationRequest::default()]);
    }

    #[test]
    fn boxed_notifier_forwards() {
        let recorder = RecordingNotifier::new();
        let boxed: Box<dyn Notifier> = Box::new(recorder.clone());
        boxed.notify(NotificationRequest::new("a", "b"));
        assert_eq!(recorder.sent().len(), 1);
    }
}
