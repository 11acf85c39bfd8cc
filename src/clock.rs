//! Wall-clock sources for the countdown engine.
//!
//! The engine never reads the system time directly. It asks an injected
//! [`Clock`], which lets applications use [`SystemClock`] while tests and
//! demos drive time by hand with [`ManualClock`].
//!
//! ```rust
//! use countdown_widgets::clock::{Clock, ManualClock};
//! use std::time::Duration;
//!
//! let clock = ManualClock::new();
//! let before = clock.now();
//! clock.advance(Duration::from_secs(1));
//! assert_eq!((clock.now() - before).num_milliseconds(), 1_000);
//! ```

use chrono::{DateTime, Local, TimeDelta};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// A source of "now".
///
/// Implementations must be `Send + Sync` so that models holding them can be
/// moved into the bubbletea-rs runtime.
pub trait Clock: Send + Sync {
    /// The current local time.
    fn now(&self) -> DateTime<Local>;
}

/// Reads the operating system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// A clock that only moves when told to.
///
/// Clones share the same underlying instant, so a test can hand one clone to
/// an engine and keep another to advance time.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<Mutex<DateTime<Local>>>,
}

impl ManualClock {
    /// Creates a manual clock frozen at the current system time.
    pub fn new() -> Self {
        Self::at(Local::now())
    }

    /// Creates a manual clock frozen at `instant`.
    pub fn at(instant: DateTime<Local>) -> Self {
        Self {
            now: Arc::new(Mutex::new(instant)),
        }
    }

    /// Moves the clock to `instant`. Moving backwards is allowed.
    pub fn set(&self, instant: DateTime<Local>) {
        let mut now = self.now.lock().unwrap_or_else(|e| e.into_inner());
        *now = instant;
    }

    /// Moves the clock forward by `by`.
    pub fn advance(&self, by: Duration) {
        let Ok(delta) = TimeDelta::from_std(by) else {
            return;
        };
        let mut now = self.now.lock().unwrap_or_else(|e| e.into_inner());
        *now = now.checked_add_signed(delta).unwrap_or(*now);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Local> {
        *self.now.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
    fn now(&self) -> DateTime<Local> {
        (**self).now()
    }
}
