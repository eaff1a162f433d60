//! # Notifications
//!
//! Transient messages shown after add / remove / clear. A notification
//! carries its own creation time and display duration; hiding it when it
//! expires is up to whoever draws it.

use std::io::Write;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use crate::config::NotificationSink;

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Success,
    Info,
    Warning,
    Error,
}

impl std::fmt::Display for NotificationLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotificationLevel::Success => write!(f, "success"),
            NotificationLevel::Info => write!(f, "info"),
            NotificationLevel::Warning => write!(f, "warning"),
            NotificationLevel::Error => write!(f, "error"),
        }
    }
}

/// A message with a visibility window.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
    pub created_at: DateTime<Utc>,
    #[serde(skip)]
    pub duration: Duration,
}

impl Notification {
    /// Creates a notification stamped with the current time.
    pub fn new(level: NotificationLevel, message: impl Into<String>, duration: Duration) -> Self {
        Notification {
            message: message.into(),
            level,
            created_at: Utc::now(),
            duration,
        }
    }

    /// When the notification should disappear. Durations too large for the
    /// calendar never expire.
    pub fn expires_at(&self) -> DateTime<Utc> {
        chrono::Duration::from_std(self.duration)
            .ok()
            .and_then(|duration| self.created_at.checked_add_signed(duration))
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    /// True while `at` falls inside the visibility window.
    pub fn is_visible_at(&self, at: DateTime<Utc>) -> bool {
        at >= self.created_at && at < self.expires_at()
    }
}

/// Displays notifications.
pub trait Notifier {
    fn show(&self, notification: &Notification);
}

/// Sends notifications to the tracing log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn show(&self, notification: &Notification) {
        match notification.level {
            NotificationLevel::Warning | NotificationLevel::Error => {
                warn!(level = %notification.level, "{}", notification.message)
            }
            _ => info!(level = %notification.level, "{}", notification.message),
        }
    }
}

/// Prints notifications to stdout, one per line.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

impl ConsoleNotifier {
    fn prefix(level: NotificationLevel) -> &'static str {
        match level {
            NotificationLevel::Success => "✔",
            NotificationLevel::Info => "ℹ",
            NotificationLevel::Warning => "!",
            NotificationLevel::Error => "✖",
        }
    }
}

impl Notifier for ConsoleNotifier {
    fn show(&self, notification: &Notification) {
        let mut out = std::io::stdout().lock();
        // A closed stdout only loses the toast.
        let _ = writeln!(out, "{} {}", Self::prefix(notification.level), notification.message);
    }
}

/// The notifier configured by `[notifications] sink`.
pub fn notifier_for(sink: NotificationSink) -> Box<dyn Notifier> {
    match sink {
        NotificationSink::Console => Box::new(ConsoleNotifier),
        NotificationSink::Log => Box::new(LogNotifier),
    }
}
