// clauseguard-client/src/notifications.rs

use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationVariant {
    Default,
    Destructive,
}

/// A transient, dismissable message raised by a form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub variant: NotificationVariant,
}

impl Notification {
    pub fn is_destructive(&self) -> bool {
        self.variant == NotificationVariant::Destructive
    }
}

/// Collects notifications until they are dismissed. Shared by every form on a screen.
#[derive(Default)]
pub struct Notifier {
    next_id: AtomicU64,
    active: Mutex<Vec<Notification>>,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(
        &self,
        title: impl Into<String>,
        description: impl Into<String>,
        variant: NotificationVariant,
    ) -> u64 {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let notification = Notification {
            id,
            title: title.into(),
            description: description.into(),
            variant,
        };
        self.lock().push(notification);
        id
    }

    /// Returns false if `id` was already gone.
    pub fn dismiss(&self, id: u64) -> bool {
        let mut active = self.lock();
        let before = active.len();
        active.retain(|n| n.id != id);
        active.len() != before
    }

    pub fn active(&self) -> Vec<Notification> {
        self.lock().clone()
    }

    /// Removes and returns everything pending, oldest first.
    pub fn drain(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.lock())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Notification>> {
        self.active.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
