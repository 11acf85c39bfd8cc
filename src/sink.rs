//! Collaborator seams used by the widgets.
//!
//! The countdown engine and the promise form never render or notify on their
//! own. They push values into these traits, and the host application decides
//! what a "display", an "input toggle" or a "notification" actually is.

use crate::duration::Units;
use log::{error, info};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// Receives the four countdown cells on every tick.
pub trait DisplaySink: Send {
    /// Shows `units` in place of whatever was displayed before.
    fn show(&mut self, units: Units);
}

impl<F> DisplaySink for F
where
    F: FnMut(Units) + Send,
{
    fn show(&mut self, units: Units) {
        self(units)
    }
}

/// Shared slot holding the most recently displayed units.
///
/// Handy when the display lives in another component: the engine writes
/// through one clone, the view reads through another.
#[derive(Debug, Clone, Default)]
pub struct DisplayCell {
    units: Arc<Mutex<Units>>,
}

impl DisplayCell {
    /// Creates a cell showing `00:00:00:00`.
    pub fn new() -> Self {
        Self::default()
    }

    /// The units most recently shown.
    pub fn get(&self) -> Units {
        *self.units.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl DisplaySink for DisplayCell {
    fn show(&mut self, units: Units) {
        *self.units.lock().unwrap_or_else(|e| e.into_inner()) = units;
    }
}

/// Toggles whether the user may pick a new date.
pub trait InputSink: Send {
    /// Enables or disables date input.
    fn set_input_enabled(&mut self, enabled: bool);
}

/// A shared on/off flag for date input.
///
/// The countdown engine holds one clone and flips it; the date picker holds
/// another and ignores keys while it is off. Input starts enabled.
#[derive(Debug, Clone)]
pub struct InputGate {
    enabled: Arc<AtomicBool>,
}

impl InputGate {
    /// Creates an open gate.
    pub fn new() -> Self {
        Self {
            enabled: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Whether input is currently allowed.
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }
}

impl Default for InputGate {
    fn default() -> Self {
        Self::new()
    }
}

impl InputSink for InputGate {
    fn set_input_enabled(&mut self, enabled: bool) {
        self.enabled.store(enabled, Ordering::SeqCst);
    }
}

/// Fire-and-forget user notifications.
///
/// Implementations must not panic; a notification that cannot be shown is
/// simply dropped.
pub trait Notifier: Send + Sync {
    /// Reports a positive outcome.
    fn success(&self, message: &str);
    /// Reports a failure or a rejected action.
    fn error(&self, message: &str);
}

impl<N: Notifier + ?Sized> Notifier for Arc<N> {
    fn success(&self, message: &str) {
        (**self).success(message)
    }

    fn error(&self, message: &str) {
        (**self).error(message)
    }
}

/// Sends notifications to the `log` facade instead of the screen.
///
/// This is the default notifier for widgets constructed without one.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn success(&self, message: &str) {
        info!("{}", message);
    }

    fn error(&self, message: &str) {
        error!("{}", message);
    }
}
