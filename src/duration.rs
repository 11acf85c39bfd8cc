//! Millisecond-to-units conversion for countdown displays.
//!
//! A countdown shows its remaining time as four cells: days, hours, minutes
//! and seconds. This module turns a raw millisecond count into those cells
//! using floor division, so the display is exact to the second and never
//! rounds up.
//!
//! # Basic Usage
//!
//! ```rust
//! use countdown_widgets::duration::{decompose, pad2, Units};
//!
//! let units = decompose(90_061_000);
//! assert_eq!(units, Units { days: 1, hours: 1, minutes: 1, seconds: 1 });
//! assert_eq!(units.to_string(), "01:01:01:01");
//!
//! assert_eq!(pad2(5), "05");
//! assert_eq!(pad2(12), "12");
//! ```

use chrono::{DateTime, TimeZone};
use std::fmt;
use std::time::Duration;

/// Milliseconds in one second.
pub const SECOND_MS: u64 = 1_000;
/// Milliseconds in one minute.
pub const MINUTE_MS: u64 = SECOND_MS * 60;
/// Milliseconds in one hour.
pub const HOUR_MS: u64 = MINUTE_MS * 60;
/// Milliseconds in one day.
pub const DAY_MS: u64 = HOUR_MS * 24;

/// A duration split into display units.
///
/// `hours` is always below 24, `minutes` and `seconds` below 60. `days` is
/// unbounded, so a countdown to a far-away date simply shows a wider day cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Units {
    /// Whole days.
    pub days: u64,
    /// Hours left over after whole days, `0..24`.
    pub hours: u64,
    /// Minutes left over after whole hours, `0..60`.
    pub minutes: u64,
    /// Seconds left over after whole minutes, `0..60`.
    pub seconds: u64,
}

impl Units {
    /// All four units at zero; what a finished countdown shows.
    pub const ZERO: Units = Units {
        days: 0,
        hours: 0,
        minutes: 0,
        seconds: 0,
    };

    /// Decomposes a std `Duration`, discarding anything below one millisecond.
    pub fn from_duration(d: Duration) -> Self {
        let ms = u64::try_from(d.as_millis()).unwrap_or(u64::MAX);
        decompose(ms)
    }

    /// Milliseconds represented by these units.
    ///
    /// This is the floor of the value that was decomposed, truncated to the
    /// whole second.
    pub fn total_millis(&self) -> u64 {
        self.days * DAY_MS + self.hours * HOUR_MS + self.minutes * MINUTE_MS + self.seconds * SECOND_MS
    }

    /// Returns true when every unit is zero.
    pub fn is_zero(&self) -> bool {
        *self == Units::ZERO
    }

    /// The four cells as zero-padded strings, in display order
    /// (days, hours, minutes, seconds).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use countdown_widgets::duration::decompose;
    ///
    /// let cells = decompose(90_000).cells();
    /// assert_eq!(cells, ["00".to_string(), "00".into(), "01".into(), "30".into()]);
    /// ```
    pub fn cells(&self) -> [String; 4] {
        [
            pad2(self.days),
            pad2(self.hours),
            pad2(self.minutes),
            pad2(self.seconds),
        ]
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [d, h, m, s] = self.cells();
        write!(f, "{}:{}:{}:{}", d, h, m, s)
    }
}

impl From<Duration> for Units {
    fn from(d: Duration) -> Self {
        Units::from_duration(d)
    }
}

/// Splits a millisecond count into days, hours, minutes and seconds.
///
/// Every step is integer floor division on what is left after the larger
/// unit, so sub-second remainders are dropped rather than rounded.
///
/// # Arguments
///
/// * `ms` - The duration in milliseconds. Callers clamp negative remainders
///   to zero before calling; see [`remaining_millis`].
///
/// # Examples
///
/// ```rust
/// use countdown_widgets::duration::{decompose, Units};
///
/// assert_eq!(decompose(0), Units::ZERO);
/// assert_eq!(decompose(90_000), Units { days: 0, hours: 0, minutes: 1, seconds: 30 });
/// ```
pub fn decompose(ms: u64) -> Units {
    let days = ms / DAY_MS;
    let hours = (ms % DAY_MS) / HOUR_MS;
    let minutes = (ms % DAY_MS % HOUR_MS) / MINUTE_MS;
    let seconds = (ms % DAY_MS % HOUR_MS % MINUTE_MS) / SECOND_MS;

    Units {
        days,
        hours,
        minutes,
        seconds,
    }
}

/// Renders `n` with at least two digits, padding with a leading zero.
///
/// Values of 100 and above are rendered in full; only the day cell ever
/// reaches that range.
pub fn pad2(n: u64) -> String {
    format!("{:02}", n)
}

/// Milliseconds from `now` until `target`, clamped to zero once `target`
/// has passed.
pub fn remaining_millis<Tz: TimeZone>(target: &DateTime<Tz>, now: &DateTime<Tz>) -> u64 {
    let delta = target.clone().signed_duration_since(now.clone()).num_milliseconds();
    u64::try_from(delta).unwrap_or(0)
}
