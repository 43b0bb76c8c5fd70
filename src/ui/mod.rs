//! Seams between the controllers and whatever renders them.

pub mod location;
pub mod pagination;

use std::time::Duration;
use tracing::{error, info};

pub use location::Location;
pub use pagination::{PageItem, page_window};

/// How long transient notifications stay on screen.
pub const AUTO_CLOSE: Duration = Duration::from_millis(2000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Error,
}

/// A dismissible toast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
    pub auto_close: Duration,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            message: message.into(),
            auto_close: AUTO_CLOSE,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
            auto_close: AUTO_CLOSE,
        }
    }
}

pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

pub trait Navigator: Send + Sync {
    /// Move to an in-app route.
    fn navigate(&self, path: &str, replace: bool);
    /// Leave the app for an external URL (payment page).
    fn redirect(&self, url: &str);
    fn scroll_to_top(&self);
}

/// Writes notifications to the log. Used by the command-line front-end.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notification: Notification) {
        match notification.level {
            NotificationLevel::Success => info!("{}", notification.message),
            NotificationLevel::Error => error!("{}", notification.message),
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct LogNavigator;

impl Navigator for LogNavigator {
    fn navigate(&self, path: &str, replace: bool) {
        info!(path, replace, "Navigate");
    }

    fn redirect(&self, url: &str) {
        info!(url, "Redirect");
    }

    fn scroll_to_top(&self) {}
}
