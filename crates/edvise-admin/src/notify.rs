//! Single-slot transient notifications.
//!
//! Every terminal outcome of a flow produces exactly one notification. The
//! slot never queues: a new notification replaces whatever is showing, and
//! the auto-dismiss timer is restarted rather than stacked. Dropping the slot
//! aborts the timer, so no dismiss callback can outlive the view that owns
//! the slot.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

/// How long a notification stays up without user action.
pub const DISMISS_AFTER: Duration = Duration::from_secs(3);

/// Outcome flavor of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    /// The flow completed.
    Success,
    /// The flow failed; the list is untouched and the action is retryable.
    Error,
}

/// One user-facing transient message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Success or error.
    pub kind: NotificationKind,
    /// User-facing text.
    pub message: String,
}

/// The one visible notification, with its auto-dismiss timer.
pub struct NotificationSlot {
    tx: Arc<watch::Sender<Option<Notification>>>,
    timer: Mutex<Option<JoinHandle<()>>>,
    dismiss_after: Duration,
}

impl NotificationSlot {
    /// Create an empty slot with the standard 3-second dismiss delay.
    pub fn new() -> Self {
        Self::with_delay(DISMISS_AFTER)
    }

    /// Create an empty slot with a custom dismiss delay.
    pub fn with_delay(dismiss_after: Duration) -> Self {
        let (tx, _rx) = watch::channel(None);
        Self {
            tx: Arc::new(tx),
            timer: Mutex::new(None),
            dismiss_after,
        }
    }

    /// The currently visible notification, if any.
    pub fn current(&self) -> Option<Notification> {
        self.tx.borrow().clone()
    }

    /// Observe notification changes.
    pub fn subscribe(&self) -> watch::Receiver<Option<Notification>> {
        self.tx.subscribe()
    }

    /// Show a success notification.
    pub fn success(&self, message: impl Into<String>) {
        self.publish(NotificationKind::Success, message.into());
    }

    /// Show an error notification.
    pub fn error(&self, message: impl Into<String>) {
        self.publish(NotificationKind::Error, message.into());
    }

    /// Replace the visible notification and restart the dismiss timer.
    pub fn publish(&self, kind: NotificationKind, message: String) {
        self.tx.send_replace(Some(Notification { kind, message }));

        let tx = Arc::clone(&self.tx);
        let sleep = tokio::time::sleep(self.dismiss_after);
        let handle = tokio::spawn(async move {
            sleep.await;
            tx.send_replace(None);
        });
        self.replace_timer(Some(handle));
    }

    /// Dismiss early by explicit user action.
    pub fn dismiss(&self) {
        self.tx.send_replace(None);
        self.replace_timer(None);
    }

    fn replace_timer(&self, next: Option<JoinHandle<()>>) {
        let previous = match self.timer.lock() {
            Ok(mut guard) => std::mem::replace(&mut *guard, next),
            Err(_) => None,
        };
        if let Some(handle) = previous {
            handle.abort();
        }
    }
}

impl Default for NotificationSlot {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for NotificationSlot {
    fn drop(&mut self) {
        self.replace_timer(None);
    }
}

impl std::fmt::Debug for NotificationSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationSlot")
            .field("current", &self.current())
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_notification_auto_dismisses_after_delay() {
        let slot = NotificationSlot::new();
        slot.success("College added");
        assert!(slot.current().is_some());

        tokio::time::advance(Duration::from_millis(2_900)).await;
        tokio::task::yield_now().await;
        assert!(slot.current().is_some());

        tokio::time::advance(Duration::from_millis(200)).await;
        tokio::task::yield_now().await;
        assert_eq!(slot.current(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_notification_replaces_and_restarts_timer() {
        let slot = NotificationSlot::new();
        slot.error("first");
        tokio::time::advance(Duration::from_millis(2_000)).await;

        slot.success("second");
        let current = slot.current().unwrap();
        assert_eq!(current.kind, NotificationKind::Success);
        assert_eq!(current.message, "second");

        // The first timer would have fired here; the restarted one must not.
        tokio::time::advance(Duration::from_millis(1_500)).await;
        tokio::task::yield_now().await;
        assert!(slot.current().is_some());

        tokio::time::advance(Duration::from_millis(1_600)).await;
        tokio::task::yield_now().await;
        assert_eq!(slot.current(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_explicit_dismiss_clears_immediately() {
        let slot = NotificationSlot::new();
        slot.success("done");
        slot.dismiss();
        assert_eq!(slot.current(), None);

        // No stale timer callback resurrects or re-clears anything.
        tokio::time::advance(Duration::from_secs(5)).await;
        tokio::task::yield_now().await;
        assert_eq!(slot.current(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_aborts_timer() {
        let slot = NotificationSlot::new();
        let rx = slot.subscribe();
        slot.success("going away");
        drop(slot);

        // The dismiss timer died with the slot: nothing clears the value the
        // subscriber last saw.
        tokio::time::advance(Duration::from_secs(5)).await;
        tokio::task::yield_now().await;
        assert!(rx.borrow().is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_subscriber_sees_publish_and_dismiss() {
        let slot = NotificationSlot::new();
        let rx = slot.subscribe();
        slot.error("problem");
        assert_eq!(rx.borrow().as_ref().unwrap().message, "problem");

        tokio::time::advance(Duration::from_secs(4)).await;
        tokio::task::yield_now().await;
        assert!(rx.borrow().is_none());
    }
}
