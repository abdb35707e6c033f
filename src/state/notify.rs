/// Notification queue
///
/// Transient success/error messages owned by the UI root. Entries are
/// removed by `dismiss` or once they are older than [`NOTIFICATION_TIMEOUT`].
use std::time::{Duration, Instant};

pub const NOTIFICATION_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    Default,
    Destructive,
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub variant: Variant,
    pub created: Instant,
}

type Listener = Box<dyn Fn(&Notification)>;

#[derive(Default)]
pub struct NotificationQueue {
    entries: Vec<Notification>,
    listeners: Vec<Listener>,
    next_id: u64,
}

impl NotificationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notify(&mut self, title: impl Into<String>, description: impl Into<String>, variant: Variant) -> u64 {
        self.notify_at(title, description, variant, Instant::now())
    }

    pub fn notify_at(
        &mut self,
        title: impl Into<String>,
        description: impl Into<String>,
        variant: Variant,
        now: Instant,
    ) -> u64 {
        self.next_id += 1;
        let notification = Notification {
            id: self.next_id,
            title: title.into(),
            description: description.into(),
            variant,
            created: now,
        };
        for listener in &self.listeners {
            listener(&notification);
        }
        self.entries.push(notification);
        self.next_id
    }

    pub fn success(&mut self, description: impl Into<String>) -> u64 {
        self.notify("Success", description, Variant::Default)
    }

    pub fn error(&mut self, description: impl Into<String>) -> u64 {
        self.notify("Error", description, Variant::Destructive)
    }

    /// Register a callback run for every new notification
    pub fn subscribe(&mut self, listener: impl Fn(&Notification) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn dismiss(&mut self, id: u64) {
        self.entries.retain(|n| n.id != id);
    }

    /// Drop every entry older than the timeout
    pub fn expire(&mut self, now: Instant) {
        self.entries
            .retain(|n| now.saturating_duration_since(n.created) < NOTIFICATION_TIMEOUT);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.entries.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Debug for NotificationQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationQueue")
            .field("entries", &self.entries)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
