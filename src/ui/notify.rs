use std::vec::Vec;

use time::OffsetDateTime;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

#[derive(Clone, Debug)]
pub struct Notification {
    pub id: String,
    pub kind: NotificationKind,
    pub message: String,
    pub raised_at: OffsetDateTime,
}

/// Transient, auto-dismissing banner queue. Entries drop out after the TTL
/// (`sweep`) or when explicitly dismissed via their close control.
pub struct Notifier {
    ttl_millis: u64,
    entries: Vec<Notification>,
}

impl Notifier {
    pub fn new(ttl_millis: u64) -> Self {
        Notifier {
            ttl_millis,
            entries: Vec::new(),
        }
    }

    pub fn notify(&mut self, message: impl Into<String>, kind: NotificationKind) -> String {
        let id = scru128::new_string();
        let n = Notification {
            id: id.clone(),
            kind,
            message: message.into(),
            raised_at: OffsetDateTime::now_utc(),
        };
        log::debug!("notification [{:?}] {}", n.kind, &n.message);
        self.entries.push(n);
        id
    }

    pub fn dismiss(&mut self, id: &str) {
        self.entries.retain(|n| n.id != id);
    }

    pub fn sweep(&mut self, now: OffsetDateTime) {
        let ttl = time::Duration::milliseconds(self.ttl_millis as i64);
        self.entries.retain(|n| now - n.raised_at < ttl);
    }

    pub fn entries(&self) -> &[Notification] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sweep_drops_expired_entries() {
        let mut n = Notifier::new(5000);
        n.notify("Student added successfully!", NotificationKind::Success);
        let raised = n.entries()[0].raised_at;
        n.sweep(raised + time::Duration::milliseconds(4999));
        assert_eq!(n.entries().len(), 1);
        n.sweep(raised + time::Duration::milliseconds(5000));
        assert!(n.entries().is_empty());
    }

    #[test]
    fn dismiss_removes_only_the_target() {
        let mut n = Notifier::new(5000);
        let first = n.notify("one", NotificationKind::Error);
        n.notify("two", NotificationKind::Success);
        n.dismiss(&first);
        assert_eq!(n.entries().len(), 1);
        assert_eq!(n.entries()[0].message, "two");
    }
}
