//! Toast notifications for terminal widgets.
//!
//! Toasts are short messages that stack in a corner of the screen and
//! disappear on their own after a few seconds. [`Toasts`] is a cheap, cloneable
//! handle to a shared stack: hand one clone to any widget as its
//! [`Notifier`](crate::sink::Notifier) and render another in your `view()`.
//!
//! ```rust
//! use countdown_widgets::sink::Notifier;
//! use countdown_widgets::toast::{Level, Toasts};
//!
//! let toasts = Toasts::new();
//! let notifier = toasts.clone();
//! notifier.error("Please choose a date in the future");
//!
//! let entries = toasts.entries();
//! assert_eq!(entries.len(), 1);
//! assert_eq!(entries[0].level, Level::Error);
//! ```

use crate::sink::Notifier;
use lipgloss_extras::lipgloss;
use lipgloss_extras::prelude::*;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// How long a toast stays visible unless overridden.
pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_secs(3);

/// Toasts beyond this count push the oldest ones out.
pub const MAX_TOASTS: usize = 5;

/// Severity of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    /// Something went as asked.
    Success,
    /// Something was rejected or failed.
    Error,
}

impl Level {
    /// Leading glyph shown before the message.
    pub fn icon(&self) -> &'static str {
        match self {
            Level::Success => "✓",
            Level::Error => "✗",
        }
    }
}

/// A single notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    /// Message text.
    pub message: String,
    /// Severity.
    pub level: Level,
    /// When the toast was raised.
    pub created_at: Instant,
    /// How long the toast is shown.
    pub duration: Duration,
}

impl Toast {
    /// Creates a toast raised now with the default duration.
    pub fn new(message: impl Into<String>, level: Level) -> Self {
        Self {
            message: message.into(),
            level,
            created_at: Instant::now(),
            duration: DEFAULT_TOAST_DURATION,
        }
    }

    /// Overrides how long the toast is shown.
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Whether the toast should be gone at `now`.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.created_at) >= self.duration
    }
}

/// Styles used when rendering toasts.
#[derive(Debug, Clone)]
pub struct Styles {
    /// Style of success toasts.
    pub success: Style,
    /// Style of error toasts.
    pub error: Style,
}

impl Default for Styles {
    fn default() -> Self {
        use lipgloss::AdaptiveColor;

        Self {
            success: Style::new().bold(true).foreground(AdaptiveColor {
                Light: "#1E7832",
                Dark: "#64DC78",
            }),
            error: Style::new().bold(true).foreground(AdaptiveColor {
                Light: "#B42828",
                Dark: "#FF7878",
            }),
        }
    }
}

/// Shared stack of active toasts.
#[derive(Debug, Clone, Default)]
pub struct Toasts {
    inner: Arc<Mutex<Vec<Toast>>>,
}

impl Toasts {
    /// Creates an empty stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pushes a toast, dropping the oldest once more than [`MAX_TOASTS`] are
    /// stacked.
    pub fn push(&self, toast: Toast) {
        let mut toasts = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        toasts.push(toast);
        if toasts.len() > MAX_TOASTS {
            let overflow = toasts.len() - MAX_TOASTS;
            toasts.drain(..overflow);
        }
    }

    /// Snapshot of the stacked toasts, oldest first.
    pub fn entries(&self) -> Vec<Toast> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Returns true when nothing is stacked.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().unwrap_or_else(|e| e.into_inner()).is_empty()
    }

    /// Removes every toast that has expired at `now`.
    pub fn cleanup_at(&self, now: Instant) {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .retain(|t| !t.is_expired_at(now));
    }

    /// Removes every toast.
    pub fn clear(&self) {
        self.inner.lock().unwrap_or_else(|e| e.into_inner()).clear();
    }

    /// Renders the live toasts with the default styles, newest last.
    pub fn view(&self) -> String {
        self.view_with(&Styles::default())
    }

    /// Renders the live toasts with custom styles.
    ///
    /// Expired toasts are pruned first, so calling this from a widget's
    /// `view()` on every frame keeps the stack short.
    pub fn view_with(&self, styles: &Styles) -> String {
        self.cleanup_at(Instant::now());
        self.entries()
            .iter()
            .map(|toast| {
                let style = match toast.level {
                    Level::Success => &styles.success,
                    Level::Error => &styles.error,
                };
                style
                    .clone()
                    .inline(true)
                    .render(&format!("{} {}", toast.level.icon(), toast.message))
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Notifier for Toasts {
    fn success(&self, message: &str) {
        self.push(Toast::new(message, Level::Success));
    }

    fn error(&self, message: &str) {
        self.push(Toast::new(message, Level::Error));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(s: &str) -> String {
        String::from_utf8(strip_ansi_escapes::strip(s)).unwrap()
    }

    #[test]
    fn test_notifier_pushes_levels() {
        let toasts = Toasts::new();
        toasts.success("saved");
        toasts.error("nope");

        let entries = toasts.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].level, Level::Success);
        assert_eq!(entries[0].message, "saved");
        assert_eq!(entries[1].level, Level::Error);
    }

    #[test]
    fn test_oldest_toasts_are_dropped() {
        let toasts = Toasts::new();
        for i in 0..MAX_TOASTS + 2 {
            toasts.success(&format!("toast {}", i));
        }

        let entries = toasts.entries();
        assert_eq!(entries.len(), MAX_TOASTS);
        assert_eq!(entries[0].message, "toast 2");
    }

    #[test]
    fn test_cleanup_removes_expired() {
        let toasts = Toasts::new();
        toasts.push(Toast::new("short", Level::Success).with_duration(Duration::from_millis(10)));
        toasts.push(Toast::new("long", Level::Error).with_duration(Duration::from_secs(60)));

        toasts.cleanup_at(Instant::now() + Duration::from_secs(1));

        let entries = toasts.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].message, "long");
    }

    #[test]
    fn test_view_renders_icon_and_message() {
        let toasts = Toasts::new();
        toasts.success("Fulfilled promise in 50ms");
        toasts.error("Rejected promise in 50ms");

        let view = plain(&toasts.view());
        let lines: Vec<&str> = view.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("✓ Fulfilled promise in 50ms"));
        assert!(lines[1].contains("✗ Rejected promise in 50ms"));
    }

    #[test]
    fn test_view_empty() {
        let toasts = Toasts::new();
        assert!(toasts.is_empty());
        assert_eq!(toasts.view(), "");
    }
}
