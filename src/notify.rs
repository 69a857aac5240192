//! Transient notifications.
//!
//! Every component reports outcomes through a [`NoticeSink`]. The page's sink
//! is a [`Notifier`], which owns the single live [`Notification`]: showing a
//! new one unconditionally replaces the previous one (last writer wins), and
//! each instance walks through a fixed lifecycle:
//!
//! ```text
//! shown ──display_ms──▶ exiting ──exit_ms──▶ removed
//! ```
//!
//! Timers that fire for a notification that has already been replaced are
//! no-ops, because every transition is keyed by the instance id.

use crate::config::NotificationConfig;
use std::fmt;

/// Notification severity. Selects the background color and CSS class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
}

impl Severity {
    /// Class suffix used in `notification-{severity}`.
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request to show a message. What components hand to a [`NoticeSink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub severity: Severity,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Success,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Error,
        }
    }
}

/// Anything that accepts notices. Shared by every component.
pub trait NoticeSink {
    fn post(&mut self, notice: Notice);
}

/// Collects notices in order. Handy wherever outcomes are inspected rather
/// than displayed.
impl NoticeSink for Vec<Notice> {
    fn post(&mut self, notice: Notice) {
        self.push(notice);
    }
}

/// Identifies one shown notification across its timers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NotificationId(u64);

/// Where a live notification is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Entrance animation played, waiting for the display duration.
    Shown,
    /// Exit animation running; removal follows.
    Exiting,
}

/// The live notification instance.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: NotificationId,
    pub notice: Notice,
    /// Milliseconds on the page clock when the notification was shown.
    pub created_at: f64,
    pub phase: Phase,
}

/// Display and exit durations, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    pub display_ms: u32,
    pub exit_ms: u32,
}

impl From<&NotificationConfig> for Timing {
    fn from(config: &NotificationConfig) -> Self {
        Self {
            display_ms: config.display_ms,
            exit_ms: config.exit_ms,
        }
    }
}

/// Result of [`Notifier::show`].
#[derive(Debug, Clone, PartialEq)]
pub struct Shown {
    pub id: NotificationId,
    /// The instance that was live before, now discarded.
    pub replaced: Option<Notification>,
}

/// Owner of the single notification slot.
#[derive(Debug)]
pub struct Notifier {
    timing: Timing,
    current: Option<Notification>,
    next_id: u64,
}

impl Notifier {
    pub fn new(timing: Timing) -> Self {
        Self {
            timing,
            current: None,
            next_id: 0,
        }
    }

    pub fn timing(&self) -> Timing {
        self.timing
    }

    /// The live notification, if any.
    pub fn current(&self) -> Option<&Notification> {
        self.current.as_ref()
    }

    /// Show `notice`, replacing whatever was live.
    pub fn show(&mut self, notice: Notice, now: f64) -> Shown {
        let id = NotificationId(self.next_id);
        self.next_id += 1;
        let replaced = self.current.replace(Notification {
            id,
            notice,
            created_at: now,
            phase: Phase::Shown,
        });
        Shown { id, replaced }
    }

    /// Start the exit animation of `id`. False if `id` is no longer live or
    /// already exiting.
    pub fn begin_exit(&mut self, id: NotificationId) -> bool {
        match &mut self.current {
            Some(n) if n.id == id && n.phase == Phase::Shown => {
                n.phase = Phase::Exiting;
                true
            }
            _ => false,
        }
    }

    /// Drop `id` from the slot. False if it was already replaced or removed.
    pub fn remove(&mut self, id: NotificationId) -> bool {
        if self.current.as_ref().is_some_and(|n| n.id == id) {
            self.current = None;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notifier() -> Notifier {
        Notifier::new(Timing {
            display_ms: 3000,
            exit_ms: 300,
        })
    }

    #[test]
    fn show_fills_empty_slot() {
        let mut n = notifier();
        let shown = n.show(Notice::success("saved"), 10.0);
        assert!(shown.replaced.is_none());
        let live = n.current().unwrap();
        assert_eq!(live.id, shown.id);
        assert_eq!(live.notice.message, "saved");
        assert_eq!(live.phase, Phase::Shown);
        assert_eq!(live.created_at, 10.0);
    }

    #[test]
    fn second_show_replaces_first() {
        let mut n = notifier();
        let first = n.show(Notice::success("one"), 0.0);
        let second = n.show(Notice::error("two"), 1.0);
        assert_ne!(first.id, second.id);
        assert_eq!(second.replaced.unwrap().id, first.id);
        let live = n.current().unwrap();
        assert_eq!(live.notice, Notice::error("two"));
    }

    #[test]
    fn stale_timers_do_not_touch_newer_notification() {
        let mut n = notifier();
        let first = n.show(Notice::success("one"), 0.0);
        let second = n.show(Notice::success("two"), 5.0);
        assert!(!n.begin_exit(first.id));
        assert!(!n.remove(first.id));
        assert_eq!(n.current().unwrap().id, second.id);
        assert_eq!(n.current().unwrap().phase, Phase::Shown);
    }

    #[test]
    fn exit_then_remove() {
        let mut n = notifier();
        let shown = n.show(Notice::success("bye"), 0.0);
        assert!(n.begin_exit(shown.id));
        assert!(!n.begin_exit(shown.id));
        assert_eq!(n.current().unwrap().phase, Phase::Exiting);
        assert!(n.remove(shown.id));
        assert!(n.current().is_none());
    }

    #[test]
    fn vec_sink_records_in_order() {
        let mut sink: Vec<Notice> = Vec::new();
        sink.post(Notice::success("a"));
        sink.post(Notice::error("b"));
        assert_eq!(sink, vec![Notice::success("a"), Notice::error("b")]);
    }

    #[test]
    fn severity_class_names() {
        assert_eq!(Severity::Success.to_string(), "success");
        assert_eq!(Severity::Error.as_str(), "error");
    }
}
