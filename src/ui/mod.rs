pub mod modal;
pub mod notify;

use time::OffsetDateTime;

use crate::man::settings::Settings;
use self::notify::Notifier;

/// Explicit UI-state object handed to the controllers instead of a shared
/// global. Holds the one notification queue and the pending view reload.
pub struct UiContext {
    pub notifier: Notifier,
    reload_delay_millis: u64,
    reload_due: Option<OffsetDateTime>,
}

impl UiContext {
    pub fn new(settings: &Settings) -> Self {
        UiContext {
            notifier: Notifier::new(settings.notification_ttl_millis),
            reload_delay_millis: settings.reload_delay_millis,
            reload_due: None,
        }
    }

    /// Records a full view reload due after the configured short delay, so
    /// the success notification renders before the view is torn down.
    pub fn schedule_reload(&mut self, now: OffsetDateTime) {
        self.reload_due = Some(now + time::Duration::milliseconds(self.reload_delay_millis as i64));
    }

    pub fn reload_pending(&self) -> bool {
        self.reload_due.is_some()
    }

    /// Polled by the view loop; returns true exactly once per schedule, when
    /// the delay has elapsed.
    pub fn take_due_reload(&mut self, now: OffsetDateTime) -> bool {
        match self.reload_due {
            Some(due) if now >= due => {
                self.reload_due = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reload_fires_once_after_delay() {
        let mut ui = UiContext::new(&Settings::default());
        let t0 = OffsetDateTime::UNIX_EPOCH;
        assert!(!ui.take_due_reload(t0));
        ui.schedule_reload(t0);
        assert!(ui.reload_pending());
        assert!(!ui.take_due_reload(t0 + time::Duration::milliseconds(999)));
        assert!(ui.take_due_reload(t0 + time::Duration::milliseconds(1000)));
        assert!(!ui.take_due_reload(t0 + time::Duration::milliseconds(2000)));
    }
}
