use std::fmt;
use std::time::Duration;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Severity {
    Info,
    Success,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let severity_str = match self {
            Severity::Info => "info",
            Severity::Success => "success",
            Severity::Error => "error",
        };
        write!(f, "{}", severity_str)
    }
}

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct NotificationId(u64);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    pub id: NotificationId,
    pub message: String,
    pub severity: Severity,
    pub expires_at: Duration,
}

/// Holds the one visible notification. Posting replaces whatever was showing.
#[derive(Default)]
pub struct NotificationQueue {
    current: Option<Notification>,
    next_id: u64,
}

impl NotificationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn post(
        &mut self,
        message: impl Into<String>,
        severity: Severity,
        expires_at: Duration,
    ) -> NotificationId {
        let id = NotificationId(self.next_id);
        self.next_id += 1;
        self.current = Some(Notification {
            id,
            message: message.into(),
            severity,
            expires_at,
        });
        id
    }

    /// Clears the notification `id` if it is still the visible one. A notification that was
    /// already replaced is left alone so the newer one keeps its full lifetime.
    pub fn expire(&mut self, id: NotificationId) -> bool {
        if self.current.as_ref().map(|n| n.id) == Some(id) {
            self.current = None;
            true
        } else {
            false
        }
    }

    pub fn current(&self) -> Option<&Notification> {
        self.current.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_notification_replaces_prior() {
        let mut queue = NotificationQueue::new();
        let first = queue.post("AI is thinking...", Severity::Info, Duration::from_secs(3));
        let second = queue.post("Invalid move! Try again.", Severity::Error, Duration::from_secs(4));

        assert!(!queue.expire(first));
        let current = queue.current().unwrap();
        assert_eq!(current.message, "Invalid move! Try again.");
        assert_eq!(current.severity, Severity::Error);

        assert!(queue.expire(second));
        assert!(queue.current().is_none());
    }
}
