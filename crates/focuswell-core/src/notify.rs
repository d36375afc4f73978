//! Notification sink abstraction.
//!
//! The core emits transient, auto-dismissing messages (nudges, phase
//! toasts, inline reminders) through this trait and never manages their
//! display lifecycle. Hosts decide what a notification looks like: the
//! CLI prints to the console, tests record into memory.

use std::cell::RefCell;
use std::rc::Rc;

/// Receiver for transient notifications.
pub trait NotificationSink {
    /// Display `message` for roughly `duration_ms` milliseconds.
    fn notify(&mut self, message: &str, duration_ms: u64);
}

/// Shared handle to a sink.
///
/// All core components run on a single control thread, so a plain
/// `Rc<RefCell<..>>` is the ownership model; no locking is involved.
pub type SharedSink = Rc<RefCell<dyn NotificationSink>>;

/// Sink that collects notifications in memory.
///
/// Useful for tests and headless hosts that inspect messages after the
/// fact instead of displaying them.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub messages: Vec<(String, u64)>,
}

impl NotificationSink for RecordingSink {
    fn notify(&mut self, message: &str, duration_ms: u64) {
        self.messages.push((message.to_string(), duration_ms));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_sink_keeps_order() {
        let sink: Rc<RefCell<RecordingSink>> = Rc::new(RefCell::new(RecordingSink::default()));
        let shared: SharedSink = sink.clone();

        shared.borrow_mut().notify("first", 1000);
        shared.borrow_mut().notify("second", 2000);

        let messages = &sink.borrow().messages;
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0], ("first".to_string(), 1000));
        assert_eq!(messages[1], ("second".to_string(), 2000));
    }
}
