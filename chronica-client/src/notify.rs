use std::{collections::VecDeque, time::Duration};
use tokio::time::Instant;

/// How long a banner stays up before dismissing itself.
pub const NOTIFICATION_TTL: Duration = Duration::from_millis(3000);

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Severity {
    Success,
    Error,
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
    expires_at: Instant,
}

/// Stack of transient banners. Banners expire individually, so several can be
/// up at once; expired ones are dropped on access.
pub struct NotificationCenter {
    items: VecDeque<Notification>,
    ttl: Duration,
}

impl NotificationCenter {
    #[must_use]
    pub fn new() -> Self {
        Self {
            items: VecDeque::new(),
            ttl: NOTIFICATION_TTL,
        }
    }

    pub fn push(&mut self, message: impl Into<String>, severity: Severity) {
        self.items.push_back(Notification {
            message: message.into(),
            severity,
            expires_at: Instant::now() + self.ttl,
        });
    }

    /// Live banners, oldest first.
    pub fn active(&mut self) -> impl Iterator<Item = &Notification> {
        let now = Instant::now();
        self.items.retain(|notification| notification.expires_at > now);

        self.items.iter()
    }
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new()
    }
}
