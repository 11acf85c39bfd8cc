//! Keyboard date and time picker.
//!
//! The picker edits a local date and time in three fields (date, hour,
//! minute) and emits a [`CommitMsg`] when the user confirms. It does not
//! judge the value itself: whoever receives the commit (usually a
//! [`countdown`](crate::countdown) model) decides whether it is acceptable.
//!
//! Options are fixed: 24-hour display, one-minute granularity, and the
//! current time as the starting value.
//!
//! Input can be switched off from outside through a shared
//! [`InputGate`]; while the gate is closed all keys are ignored and the
//! picker renders dimmed.
//!
//! ```rust
//! use countdown_widgets::clock::ManualClock;
//! use countdown_widgets::date_picker::{new, Field};
//! use countdown_widgets::sink::InputGate;
//!
//! let clock = ManualClock::new();
//! let mut picker = new(&clock, InputGate::new());
//! let start = picker.value();
//!
//! picker.set_field(Field::Hour);
//! picker.increment();
//! assert_eq!((picker.value() - start).num_minutes(), 60);
//! ```

use crate::clock::Clock;
use crate::key::{self, Binding};
use crate::sink::InputGate;
use bubbletea_rs::{tick as bubbletea_tick, Cmd, KeyMsg, Msg};
use chrono::{DateTime, Local, TimeDelta, Timelike};
use crossterm::event::KeyCode;
use lipgloss_extras::prelude::*;
use log::debug;
use std::time::Duration;

/// Minutes added or removed by one step on the minute field.
pub const MINUTE_INCREMENT: i64 = 1;

/// Display format of the picked value (24-hour clock).
pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Emitted when the user confirms the picked value.
#[derive(Debug, Clone)]
pub struct CommitMsg {
    /// The picked date and time.
    pub instant: DateTime<Local>,
}

/// The part of the value that arrow keys adjust.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// Whole days.
    Date,
    /// Hours.
    Hour,
    /// Minutes, in steps of [`MINUTE_INCREMENT`].
    Minute,
}

impl Field {
    fn next(self) -> Self {
        match self {
            Field::Date => Field::Hour,
            Field::Hour => Field::Minute,
            Field::Minute => Field::Date,
        }
    }

    fn prev(self) -> Self {
        match self {
            Field::Date => Field::Minute,
            Field::Hour => Field::Date,
            Field::Minute => Field::Hour,
        }
    }

    fn step(self) -> TimeDelta {
        match self {
            Field::Date => TimeDelta::days(1),
            Field::Hour => TimeDelta::hours(1),
            Field::Minute => TimeDelta::minutes(MINUTE_INCREMENT),
        }
    }
}

/// Key bindings of the picker.
#[derive(Debug, Clone)]
pub struct KeyMap {
    /// Focus the next field.
    pub next_field: Binding,
    /// Focus the previous field.
    pub prev_field: Binding,
    /// Step the focused field forward.
    pub increment: Binding,
    /// Step the focused field back.
    pub decrement: Binding,
    /// Confirm the value.
    pub commit: Binding,
}

impl Default for KeyMap {
    fn default() -> Self {
        Self {
            next_field: Binding::new(vec![KeyCode::Right, KeyCode::Char('l')])
                .with_help("→")
                .with_description("next field"),
            prev_field: Binding::new(vec![KeyCode::Left, KeyCode::Char('h')])
                .with_help("←")
                .with_description("prev field"),
            increment: Binding::new(vec![KeyCode::Up, KeyCode::Char('k')])
                .with_help("↑")
                .with_description("later"),
            decrement: Binding::new(vec![KeyCode::Down, KeyCode::Char('j')])
                .with_help("↓")
                .with_description("earlier"),
            commit: Binding::new(vec![KeyCode::Enter])
                .with_help("enter")
                .with_description("pick"),
        }
    }
}

/// Date picker model.
#[derive(Debug, Clone)]
pub struct Model {
    /// Key bindings.
    pub key_map: KeyMap,
    /// Style of unfocused fields.
    pub text_style: Style,
    /// Style of the focused field.
    pub focused_style: Style,
    /// Style of the whole value while input is disabled.
    pub disabled_style: Style,

    value: DateTime<Local>,
    field: Field,
    gate: InputGate,
}

/// Creates a picker showing the current time of `clock`, truncated to the
/// minute.
pub fn new(clock: &dyn Clock, gate: InputGate) -> Model {
    Model {
        key_map: KeyMap::default(),
        text_style: Style::new(),
        focused_style: Style::new().reverse(true),
        disabled_style: Style::new().faint(true),
        value: truncate_to_minute(clock.now()),
        field: Field::Minute,
        gate,
    }
}

fn truncate_to_minute(instant: DateTime<Local>) -> DateTime<Local> {
    instant
        .with_second(0)
        .and_then(|v| v.with_nanosecond(0))
        .unwrap_or(instant)
}

impl Model {
    /// The value currently shown.
    pub fn value(&self) -> DateTime<Local> {
        self.value
    }

    /// Replaces the shown value, truncated to the minute.
    pub fn set_value(&mut self, instant: DateTime<Local>) {
        self.value = truncate_to_minute(instant);
    }

    /// The focused field.
    pub fn field(&self) -> Field {
        self.field
    }

    /// Focuses `field`.
    pub fn set_field(&mut self, field: Field) {
        self.field = field;
    }

    /// Whether the picker currently accepts input.
    pub fn enabled(&self) -> bool {
        self.gate.is_enabled()
    }

    /// Steps the focused field forward.
    pub fn increment(&mut self) {
        self.shift(self.field.step());
    }

    /// Steps the focused field back.
    pub fn decrement(&mut self) {
        self.shift(-self.field.step());
    }

    fn shift(&mut self, by: TimeDelta) {
        if let Some(v) = self.value.checked_add_signed(by) {
            self.value = v;
        }
    }

    /// The message a commit delivers.
    pub fn commit_msg(&self) -> CommitMsg {
        CommitMsg {
            instant: self.value,
        }
    }

    /// A command delivering [`CommitMsg`] with the current value.
    pub fn commit(&self) -> Cmd {
        let msg = self.commit_msg();
        debug!("date picker: committing {}", msg.instant);
        bubbletea_tick(Duration::from_nanos(1), move |_| Box::new(msg.clone()) as Msg)
    }

    /// Handles key presses. Returns a commit command on confirm.
    ///
    /// All input is ignored while the gate is closed.
    pub fn update(&mut self, msg: &Msg) -> std::option::Option<Cmd> {
        if !self.enabled() {
            return None;
        }
        let key_msg = msg.downcast_ref::<KeyMsg>()?;

        if self.key_map.commit.matches(key_msg) {
            return Some(self.commit());
        }
        if self.key_map.next_field.matches(key_msg) {
            self.field = self.field.next();
        } else if self.key_map.prev_field.matches(key_msg) {
            self.field = self.field.prev();
        } else if self.key_map.increment.matches(key_msg) {
            self.increment();
        } else if self.key_map.decrement.matches(key_msg) {
            self.decrement();
        }
        None
    }

    /// Renders the value, highlighting the focused field.
    pub fn view(&self) -> String {
        let date = self.value.format("%Y-%m-%d").to_string();
        let hour = self.value.format("%H").to_string();
        let minute = self.value.format("%M").to_string();

        if !self.enabled() {
            return self
                .disabled_style
                .clone()
                .inline(true)
                .render(&format!("{} {}:{}", date, hour, minute));
        }

        let part = |field: Field, text: &str| {
            let style = if field == self.field {
                &self.focused_style
            } else {
                &self.text_style
            };
            style.clone().inline(true).render(text)
        };

        format!(
            "{} {}:{}",
            part(Field::Date, &date),
            part(Field::Hour, &hour),
            part(Field::Minute, &minute)
        )
    }

    /// One-line key hints.
    pub fn help_view(&self) -> String {
        let k = &self.key_map;
        key::short_help(&[
            &k.prev_field,
            &k.next_field,
            &k.increment,
            &k.decrement,
            &k.commit,
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::sink::InputSink;
    use chrono::TimeZone;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> Msg {
        Box::new(KeyMsg {
            key: code,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn plain(s: &str) -> String {
        String::from_utf8(strip_ansi_escapes::strip(s)).unwrap()
    }

    fn fixed_clock() -> ManualClock {
        let instant = Local
            .with_ymd_and_hms(2030, 1, 2, 15, 4, 37)
            .single()
            .expect("unambiguous local time");
        ManualClock::at(instant)
    }

    #[test]
    fn test_new_starts_at_now_truncated() {
        let clock = fixed_clock();
        let picker = new(&clock, InputGate::new());

        assert_eq!(picker.value().second(), 0);
        assert_eq!(picker.value().minute(), 4);
        assert!(picker.value() <= clock.now());
        assert_eq!(picker.field(), Field::Minute);
    }

    #[test]
    fn test_view_is_24_hour() {
        let picker = new(&fixed_clock(), InputGate::new());
        assert_eq!(plain(&picker.view()), "2030-01-02 15:04");
        assert_eq!(picker.value().format(TIME_FORMAT).to_string(), "2030-01-02 15:04");
    }

    #[test]
    fn test_arrow_keys_adjust_focused_field() {
        let mut picker = new(&fixed_clock(), InputGate::new());
        let start = picker.value();

        picker.update(&key(KeyCode::Up));
        assert_eq!((picker.value() - start).num_minutes(), MINUTE_INCREMENT);

        picker.update(&key(KeyCode::Left));
        assert_eq!(picker.field(), Field::Hour);
        picker.update(&key(KeyCode::Down));
        assert_eq!((picker.value() - start).num_minutes(), MINUTE_INCREMENT - 60);

        picker.update(&key(KeyCode::Left));
        assert_eq!(picker.field(), Field::Date);
        picker.update(&key(KeyCode::Up));
        assert_eq!(
            (picker.value() - start).num_minutes(),
            24 * 60 + MINUTE_INCREMENT - 60
        );
    }

    #[test]
    fn test_field_focus_wraps() {
        let mut picker = new(&fixed_clock(), InputGate::new());
        picker.update(&key(KeyCode::Right));
        assert_eq!(picker.field(), Field::Date);
        picker.update(&key(KeyCode::Left));
        assert_eq!(picker.field(), Field::Minute);
    }

    #[test]
    fn test_enter_commits_current_value() {
        let mut picker = new(&fixed_clock(), InputGate::new());
        picker.increment();

        assert!(picker.update(&key(KeyCode::Enter)).is_some());
        assert_eq!(picker.commit_msg().instant, picker.value());
    }

    #[test]
    fn test_closed_gate_ignores_keys() {
        let gate = InputGate::new();
        let mut picker = new(&fixed_clock(), gate.clone());
        let start = picker.value();

        let mut engine_side = gate.clone();
        engine_side.set_input_enabled(false);

        assert!(!picker.enabled());
        assert!(picker.update(&key(KeyCode::Up)).is_none());
        assert!(picker.update(&key(KeyCode::Enter)).is_none());
        assert_eq!(picker.value(), start);
        assert_eq!(plain(&picker.view()), "2030-01-02 15:04");
    }

    #[test]
    fn test_non_key_messages_are_ignored() {
        let mut picker = new(&fixed_clock(), InputGate::new());
        let msg: Msg = Box::new(42_u32);
        assert!(picker.update(&msg).is_none());
    }

    #[test]
    fn test_help_view_lists_bindings() {
        let picker = new(&fixed_clock(), InputGate::new());
        let help = picker.help_view();
        assert!(help.contains("enter pick"));
        assert!(help.contains("↑ later"));
    }
}
