//! # Notification Hub
//!
//! Process-wide publish/subscribe sink for user-facing notifications.
//!
//! ## Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Notification Hub                                     │
//! │                                                                         │
//! │  producer ──► notify(kind, message)                                     │
//! │                     │                                                   │
//! │                     ├──► list.push(notification)                        │
//! │                     ├──► every listener receives the FULL current list  │
//! │                     └──► expiry timer (5 s) ──► dismiss ──► replay      │
//! │                                                                         │
//! │  kinds: success | error | info                                          │
//! │                                                                         │
//! │  The hub is an owned object constructed once per application instance  │
//! │  and handed around by clone (it is an Arc inside) — there is no        │
//! │  module-level mutable state and no global listener array.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// How long a notification stays visible before it expires on its own.
pub const DISPLAY_WINDOW: Duration = Duration::from_secs(5);

// =============================================================================
// Notification
// =============================================================================

/// Severity/flavor of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
    Info,
}

/// One entry in the notification list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: u64,
    pub kind: NotificationKind,
    pub message: String,
}

/// Handle returned by [`NotificationHub::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenerId(u64);

type Listener = Box<dyn Fn(&[Notification]) + Send + Sync>;

// =============================================================================
// Hub
// =============================================================================

struct HubInner {
    notifications: Mutex<Vec<Notification>>,
    listeners: Mutex<Vec<(ListenerId, Listener)>>,
    next_id: AtomicU64,
    next_listener_id: AtomicU64,
}

/// The notification hub.
///
/// Cheap to clone (shared Arc); clones publish into and observe the same
/// list. Auto-expiry timers run on the tokio runtime, so `notify` must be
/// called from within one.
#[derive(Clone)]
pub struct NotificationHub {
    inner: Arc<HubInner>,
}

impl NotificationHub {
    /// Creates an empty hub with no listeners.
    pub fn new() -> Self {
        NotificationHub {
            inner: Arc::new(HubInner {
                notifications: Mutex::new(Vec::new()),
                listeners: Mutex::new(Vec::new()),
                next_id: AtomicU64::new(1),
                next_listener_id: AtomicU64::new(1),
            }),
        }
    }

    /// Publishes a notification and schedules its expiry.
    ///
    /// Every subscribed listener is replayed the full current list. After
    /// [`DISPLAY_WINDOW`] the entry is dismissed automatically.
    pub fn notify(&self, kind: NotificationKind, message: impl Into<String>) -> u64 {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        let notification = Notification {
            id,
            kind,
            message: message.into(),
        };

        debug!(id, ?kind, message = %notification.message, "Notification posted");
        {
            let mut list = self.inner.notifications.lock().expect("hub mutex poisoned");
            list.push(notification);
        }
        self.broadcast();

        // Auto remove after the display window
        let hub = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(DISPLAY_WINDOW).await;
            hub.dismiss(id);
        });

        id
    }

    /// Publishes a success notification.
    pub fn success(&self, message: impl Into<String>) -> u64 {
        self.notify(NotificationKind::Success, message)
    }

    /// Publishes an error notification.
    pub fn error(&self, message: impl Into<String>) -> u64 {
        self.notify(NotificationKind::Error, message)
    }

    /// Publishes an info notification.
    pub fn info(&self, message: impl Into<String>) -> u64 {
        self.notify(NotificationKind::Info, message)
    }

    /// Removes a notification early (user dismissed it, or its timer fired).
    /// No-op when the id already expired.
    pub fn dismiss(&self, id: u64) {
        let removed = {
            let mut list = self.inner.notifications.lock().expect("hub mutex poisoned");
            let before = list.len();
            list.retain(|n| n.id != id);
            list.len() != before
        };

        if removed {
            self.broadcast();
        }
    }

    /// Returns a snapshot of the currently visible notifications.
    pub fn active(&self) -> Vec<Notification> {
        self.inner
            .notifications
            .lock()
            .expect("hub mutex poisoned")
            .clone()
    }

    /// Registers a listener that receives the full list on every change.
    pub fn subscribe(&self, listener: impl Fn(&[Notification]) + Send + Sync + 'static) -> ListenerId {
        let id = ListenerId(self.inner.next_listener_id.fetch_add(1, Ordering::Relaxed));
        let mut listeners = self.inner.listeners.lock().expect("hub mutex poisoned");
        listeners.push((id, Box::new(listener)));
        id
    }

    /// Drops a listener. No-op for unknown ids.
    pub fn unsubscribe(&self, id: ListenerId) {
        let mut listeners = self.inner.listeners.lock().expect("hub mutex poisoned");
        listeners.retain(|(lid, _)| *lid != id);
    }

    /// Replays the current list to every listener.
    ///
    /// Listeners run with the listener table locked, so they must not call
    /// back into the hub.
    fn broadcast(&self) {
        let snapshot = self.active();
        let listeners = self.inner.listeners.lock().expect("hub mutex poisoned");
        for (_, listener) in listeners.iter() {
            listener(&snapshot);
        }
    }
}

impl Default for NotificationHub {
    fn default() -> Self {
        NotificationHub::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
