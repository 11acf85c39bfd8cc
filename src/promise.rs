//! Delayed settlement form.
//!
//! The form takes a delay in milliseconds and a desired outcome. Submitting
//! it schedules a one-shot task that waits for the delay and then settles as
//! fulfilled or rejected; the settlement is reported through a
//! [`Notifier`] as a success or an error.
//!
//! Every submission is independent. Submitting again before an earlier
//! settlement arrives does not cancel it, and a settlement is always
//! reported, even if the form has been edited in the meantime.
//!
//! # Settling without the form
//!
//! ```rust
//! use countdown_widgets::promise::{settle, Outcome, Settlement};
//!
//! # tokio_test_block_on(async {
//! let settlement = settle(10, Outcome::Rejected).await;
//! assert_eq!(settlement, Settlement::Rejected(10));
//! # });
//! # fn tokio_test_block_on<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Builder::new_current_thread().enable_time().build().unwrap().block_on(f)
//! # }
//! ```

use crate::key::{self, Binding};
use crate::sink::{LogNotifier, Notifier};
use bubbletea_rs::{Cmd, KeyMsg, Model as BubbleTeaModel, Msg};
use crossterm::event::KeyCode;
use lipgloss_extras::prelude::*;
use log::{debug, info};
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;
use thiserror::Error;

// Internal ID management for form instances
static LAST_ID: AtomicI64 = AtomicI64::new(0);

fn next_id() -> i64 {
    LAST_ID.fetch_add(1, Ordering::SeqCst) + 1
}

/// Longest delay the field accepts, in digits.
pub const MAX_DELAY_DIGITS: usize = 9;

/// Errors raised by the form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    /// The delay field is empty or not a non-negative whole number.
    #[error("invalid delay {0:?}: expected a whole number of milliseconds")]
    InvalidDelay(String),
    /// An outcome name other than `fulfilled` or `rejected`.
    #[error("unknown outcome {0:?}")]
    UnknownOutcome(String),
}

/// The outcome the user asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Outcome {
    /// Settle successfully.
    #[default]
    Fulfilled,
    /// Settle with a rejection.
    Rejected,
}

impl Outcome {
    /// The other outcome.
    pub fn toggled(self) -> Self {
        match self {
            Outcome::Fulfilled => Outcome::Rejected,
            Outcome::Rejected => Outcome::Fulfilled,
        }
    }

    /// Form value of the outcome.
    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::Fulfilled => "fulfilled",
            Outcome::Rejected => "rejected",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Outcome {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "fulfilled" => Ok(Outcome::Fulfilled),
            "rejected" => Ok(Outcome::Rejected),
            other => Err(FormError::UnknownOutcome(other.to_string())),
        }
    }
}

/// How a scheduled task settled. Both variants carry the delay in
/// milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settlement {
    /// The task was fulfilled after the delay.
    Fulfilled(u64),
    /// The task was rejected after the delay.
    Rejected(u64),
}

impl Settlement {
    /// The delay the task waited for.
    pub fn delay(&self) -> u64 {
        match *self {
            Settlement::Fulfilled(ms) | Settlement::Rejected(ms) => ms,
        }
    }

    /// User-facing text for this settlement.
    pub fn message(&self) -> String {
        match *self {
            Settlement::Fulfilled(ms) => format!("✅ Fulfilled promise in {}ms", ms),
            Settlement::Rejected(ms) => format!("❌ Rejected promise in {}ms", ms),
        }
    }

    /// Sends the settlement to `notifier`: fulfilled as success, rejected as
    /// error.
    pub fn report(&self, notifier: &dyn Notifier) {
        match self {
            Settlement::Fulfilled(_) => notifier.success(&self.message()),
            Settlement::Rejected(_) => notifier.error(&self.message()),
        }
    }
}

/// Waits `delay_ms` milliseconds, then settles with `outcome`.
///
/// The wait is a tokio timer, so it never blocks a thread and runs on
/// virtual time under a paused test runtime.
pub async fn settle(delay_ms: u64, outcome: Outcome) -> Settlement {
    tokio::time::sleep(Duration::from_millis(delay_ms)).await;
    match outcome {
        Outcome::Fulfilled => Settlement::Fulfilled(delay_ms),
        Outcome::Rejected => Settlement::Rejected(delay_ms),
    }
}

/// Delivered when a task scheduled by [`settle_cmd`] settles.
#[derive(Debug, Clone)]
pub struct SettledMsg {
    /// The form that scheduled the task.
    pub id: i64,
    /// The result.
    pub settlement: Settlement,
}

/// Wraps [`settle`] into a command that yields a [`SettledMsg`] for form `id`.
pub fn settle_cmd(id: i64, delay_ms: u64, outcome: Outcome) -> Cmd {
    Box::pin(async move {
        let settlement = settle(delay_ms, outcome).await;
        Some(Box::new(SettledMsg { id, settlement }) as Msg)
    })
}

/// Key bindings of the form.
#[derive(Debug, Clone)]
pub struct KeyMap {
    /// Switch between fulfilled and rejected.
    pub toggle_outcome: Binding,
    /// Delete the last delay digit.
    pub delete: Binding,
    /// Submit the form.
    pub submit: Binding,
}

impl Default for KeyMap {
    fn default() -> Self {
        Self {
            toggle_outcome: Binding::new(vec![KeyCode::Tab, KeyCode::Left, KeyCode::Right])
                .with_help("tab")
                .with_description("outcome"),
            delete: Binding::new(vec![KeyCode::Backspace])
                .with_help("⌫")
                .with_description("delete"),
            submit: Binding::new(vec![KeyCode::Enter])
                .with_help("enter")
                .with_description("create promise"),
        }
    }
}

/// Form model.
pub struct Model {
    /// Key bindings.
    pub key_map: KeyMap,
    /// Style of field labels.
    pub label_style: Style,
    /// Style of the chosen outcome.
    pub selected_style: Style,

    id: i64,
    delay: String,
    outcome: Outcome,
    pending: usize,
    notifier: Box<dyn Notifier>,
}

impl fmt::Debug for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Model")
            .field("id", &self.id)
            .field("delay", &self.delay)
            .field("outcome", &self.outcome)
            .field("pending", &self.pending)
            .finish_non_exhaustive()
    }
}

/// Creates an empty form reporting to `notifier`.
pub fn new(notifier: impl Notifier + 'static) -> Model {
    Model {
        key_map: KeyMap::default(),
        label_style: Style::new().bold(true),
        selected_style: Style::new().reverse(true),
        id: next_id(),
        delay: String::new(),
        outcome: Outcome::default(),
        pending: 0,
        notifier: Box::new(notifier),
    }
}

impl Model {
    /// Unique identifier used to route settlements.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Raw contents of the delay field.
    pub fn delay_input(&self) -> &str {
        &self.delay
    }

    /// Replaces the delay field, keeping digits only.
    pub fn set_delay(&mut self, input: &str) {
        self.delay = input
            .chars()
            .filter(char::is_ascii_digit)
            .take(MAX_DELAY_DIGITS)
            .collect();
    }

    /// The selected outcome.
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Selects an outcome.
    pub fn set_outcome(&mut self, outcome: Outcome) {
        self.outcome = outcome;
    }

    /// Submissions that have not settled yet.
    pub fn pending(&self) -> usize {
        self.pending
    }

    /// Parses the delay field.
    ///
    /// # Errors
    ///
    /// [`FormError::InvalidDelay`] when the field is empty or does not parse.
    pub fn delay(&self) -> Result<u64, FormError> {
        self.delay
            .parse::<u64>()
            .map_err(|_| FormError::InvalidDelay(self.delay.clone()))
    }

    /// Submits the form and returns the settlement command.
    ///
    /// An invalid delay is reported through the notifier and returned as an
    /// error; nothing is scheduled in that case.
    pub fn submit(&mut self) -> Result<Cmd, FormError> {
        let delay = match self.delay() {
            Ok(delay) => delay,
            Err(err) => {
                self.notifier.error(&err.to_string());
                return Err(err);
            }
        };

        self.pending += 1;
        debug!(
            "promise form {}: scheduled {} after {}ms",
            self.id, self.outcome, delay
        );
        Ok(settle_cmd(self.id, delay, self.outcome))
    }

    /// Handles key presses and settlements.
    pub fn update(&mut self, msg: Msg) -> std::option::Option<Cmd> {
        if let Some(settled) = msg.downcast_ref::<SettledMsg>() {
            if settled.id != self.id {
                return None;
            }
            self.pending = self.pending.saturating_sub(1);
            info!("promise form {}: {:?}", self.id, settled.settlement);
            settled.settlement.report(self.notifier.as_ref());
            return None;
        }

        let key_msg = msg.downcast_ref::<KeyMsg>()?;

        if self.key_map.submit.matches(key_msg) {
            return self.submit().ok();
        }
        if self.key_map.toggle_outcome.matches(key_msg) {
            self.outcome = self.outcome.toggled();
        } else if self.key_map.delete.matches(key_msg) {
            self.delay.pop();
        } else if let KeyCode::Char(c) = key_msg.key {
            if c.is_ascii_digit() && self.delay.len() < MAX_DELAY_DIGITS {
                self.delay.push(c);
            }
        }
        None
    }

    /// Renders the delay field and the outcome choice.
    pub fn view(&self) -> String {
        let label = |text: &str| self.label_style.clone().inline(true).render(text);
        let choice = |outcome: Outcome| {
            let text = format!(" {} ", outcome);
            if outcome == self.outcome {
                self.selected_style.clone().inline(true).render(&text)
            } else {
                text
            }
        };

        format!(
            "{} {}ms\n{} {}{}",
            label("Delay"),
            self.delay,
            label("State"),
            choice(Outcome::Fulfilled),
            choice(Outcome::Rejected)
        )
    }

    /// One-line key hints.
    pub fn help_view(&self) -> String {
        let k = &self.key_map;
        key::short_help(&[&k.toggle_outcome, &k.delete, &k.submit])
    }
}

impl Default for Model {
    fn default() -> Self {
        new(LogNotifier)
    }
}

impl BubbleTeaModel for Model {
    fn init() -> (Self, std::option::Option<Cmd>) {
        (Model::default(), None)
    }

    fn update(&mut self, msg: Msg) -> std::option::Option<Cmd> {
        self.update(msg)
    }

    fn view(&self) -> String {
        self.view()
    }
}
