//! Countdown component driven by a picked date.
//!
//! The countdown holds a target instant chosen by the user and, once started,
//! ticks once per [`TICK_INTERVAL`]. Every tick compares the target with the
//! injected [`Clock`], pushes the remaining days, hours, minutes and seconds
//! to a [`DisplaySink`], and stops on its own when the target is reached.
//!
//! While the countdown runs, date input is switched off through an
//! [`InputSink`]; it is switched back on when the countdown finishes or is
//! stopped.
//!
//! # Basic Usage
//!
//! ```rust
//! use countdown_widgets::countdown::new;
//! use countdown_widgets::clock::{Clock, ManualClock};
//! use countdown_widgets::sink::{DisplayCell, InputGate};
//! use chrono::TimeDelta;
//!
//! let clock = ManualClock::new();
//! let display = DisplayCell::new();
//! let gate = InputGate::new();
//!
//! let mut countdown = new(clock.clone(), display.clone(), gate.clone());
//! countdown
//!     .select(clock.now() + TimeDelta::minutes(5))
//!     .expect("five minutes ahead is in the future");
//! assert!(countdown.start_enabled());
//!
//! let _first_tick = countdown.start().expect("selection is still valid");
//! assert!(countdown.running());
//! assert!(!gate.is_enabled());
//! ```
//!
//! # bubbletea-rs Integration
//!
//! ```rust
//! use bubbletea_rs::{Model as BubbleTeaModel, Msg, Cmd};
//! use countdown_widgets::countdown::{FinishedMsg, Model};
//!
//! struct MyApp {
//!     countdown: Model,
//!     done: bool,
//! }
//!
//! impl BubbleTeaModel for MyApp {
//!     fn init() -> (Self, Option<Cmd>) {
//!         (Self { countdown: Model::default(), done: false }, None)
//!     }
//!
//!     fn update(&mut self, msg: Msg) -> Option<Cmd> {
//!         if let Some(finished) = msg.downcast_ref::<FinishedMsg>() {
//!             if finished.id == self.countdown.id() {
//!                 self.done = true;
//!                 return None;
//!             }
//!         }
//!         // Ticks, start requests and date commits are all handled here
//!         self.countdown.update(msg)
//!     }
//!
//!     fn view(&self) -> String {
//!         format!("Time remaining: {}", self.countdown.view())
//!     }
//! }
//! ```

use crate::clock::{Clock, SystemClock};
use crate::date_picker::CommitMsg;
use crate::duration::{decompose, remaining_millis, Units};
use crate::sink::{DisplaySink, InputGate, InputSink, LogNotifier, Notifier};
use bubbletea_rs::{tick as bubbletea_tick, Cmd, Model as BubbleTeaModel, Msg};
use chrono::{DateTime, Local};
use log::{debug, info, warn};
use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;
use thiserror::Error;

/// Time between two ticks of a running countdown.
///
/// Ticks are scheduled one after another and are not corrected for drift;
/// each tick re-reads the clock, so the display never falls behind by more
/// than one interval.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Message shown when a picked date is not in the future.
pub const INVALID_SELECTION_MESSAGE: &str = "Please choose a date in the future";

// Internal ID management for countdown instances
static LAST_ID: AtomicI64 = AtomicI64::new(0);

fn next_id() -> i64 {
    LAST_ID.fetch_add(1, Ordering::SeqCst) + 1
}

/// Reasons a selection or a start request is refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CountdownError {
    /// The picked instant is not strictly after the current time.
    ///
    /// Raised both when the date is picked and when start is pressed after a
    /// previously valid date has lapsed.
    #[error("selected instant {selected} is not after {now}")]
    InvalidSelection {
        /// The instant that was checked.
        selected: DateTime<Local>,
        /// The clock reading it was checked against.
        now: DateTime<Local>,
    },
    /// Start was requested before any date was picked.
    #[error("no date has been selected")]
    NoSelection,
    /// Start was requested but is disabled until a new date is picked.
    #[error("start is disabled until a new date is selected")]
    StartDisabled,
    /// The countdown is already running.
    #[error("countdown is already running")]
    AlreadyRunning,
}

/// Checks that `selected` lies strictly after `now`.
///
/// # Errors
///
/// Returns [`CountdownError::InvalidSelection`] when `selected <= now`.
pub fn validate_selection(
    selected: DateTime<Local>,
    now: DateTime<Local>,
) -> Result<(), CountdownError> {
    if selected <= now {
        return Err(CountdownError::InvalidSelection { selected, now });
    }
    Ok(())
}

/// Requests that a countdown start.
///
/// Produced by [`Model::start_cmd`]; only the countdown with the matching
/// `id` reacts to it.
#[derive(Debug, Clone)]
pub struct StartMsg {
    /// The countdown this message targets.
    pub id: i64,
}

/// Sent once per interval while a countdown runs.
///
/// A tick is only honored when both its `id` and its private tag match the
/// countdown's current tick handle. Stopping a countdown drops the handle,
/// so a tick already in flight is ignored.
#[derive(Debug, Clone)]
pub struct TickMsg {
    /// The countdown that scheduled this tick.
    pub id: i64,
    tag: i64,
}

/// Sent once when a countdown reaches zero.
#[derive(Debug, Clone)]
pub struct FinishedMsg {
    /// The countdown that finished.
    pub id: i64,
}

/// Lifecycle of a countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Not ticking. A date may be picked.
    Idle,
    /// Ticking towards the target. Date input is disabled.
    Running,
}

// Ownership of the single scheduled tick. Replaced on start, dropped on stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TickHandle {
    tag: i64,
}

/// Countdown component.
///
/// Holds the selected target, the running state and the tick handle, plus
/// the injected collaborators. All mutation goes through [`select`](Self::select),
/// [`start`](Self::start), [`stop`](Self::stop) and [`update`](Self::update).
pub struct Model {
    interval: Duration,
    id: i64,
    tag: i64,
    state: State,
    ticker: Option<TickHandle>,
    target: Option<DateTime<Local>>,
    start_enabled: bool,
    units: Units,

    clock: Box<dyn Clock>,
    display: Box<dyn DisplaySink>,
    input: Box<dyn InputSink>,
    notifier: Box<dyn Notifier>,
}

impl fmt::Debug for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Model")
            .field("interval", &self.interval)
            .field("id", &self.id)
            .field("tag", &self.tag)
            .field("state", &self.state)
            .field("target", &self.target)
            .field("start_enabled", &self.start_enabled)
            .field("units", &self.units)
            .finish_non_exhaustive()
    }
}

/// Creates an idle countdown with no date selected.
///
/// Invalid selections are reported through [`LogNotifier`] until a different
/// notifier is set with [`Model::with_notifier`].
///
/// # Arguments
///
/// * `clock` - Source of "now" for validation and every tick
/// * `display` - Receives the remaining units on every tick
/// * `input` - Switched off while the countdown runs
pub fn new(
    clock: impl Clock + 'static,
    display: impl DisplaySink + 'static,
    input: impl InputSink + 'static,
) -> Model {
    Model {
        interval: TICK_INTERVAL,
        id: next_id(),
        tag: 0,
        state: State::Idle,
        ticker: None,
        target: None,
        start_enabled: false,
        units: Units::ZERO,
        clock: Box::new(clock),
        display: Box::new(display),
        input: Box::new(input),
        notifier: Box::new(LogNotifier),
    }
}

impl Model {
    /// Replaces the notifier used for invalid selections.
    pub fn with_notifier(mut self, notifier: impl Notifier + 'static) -> Self {
        self.notifier = Box::new(notifier);
        self
    }

    /// Unique identifier used to route this countdown's messages.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Current lifecycle state.
    pub fn state(&self) -> State {
        self.state
    }

    /// Whether the countdown is ticking.
    pub fn running(&self) -> bool {
        self.state == State::Running
    }

    /// Whether the start action is currently available.
    ///
    /// Becomes true on each valid selection and false again on start or on a
    /// rejected selection.
    pub fn start_enabled(&self) -> bool {
        self.start_enabled
    }

    /// The stored target instant, if one was ever accepted.
    pub fn selected(&self) -> Option<DateTime<Local>> {
        self.target
    }

    /// The units most recently pushed to the display.
    pub fn units(&self) -> Units {
        self.units
    }

    /// Time left until the target according to the clock, clamped to zero.
    pub fn remaining(&self) -> Option<Units> {
        let target = self.target?;
        Some(decompose(remaining_millis(&target, &self.clock.now())))
    }

    /// Pushes the initial `00:00:00:00` frame to the display.
    ///
    /// Call this once when the widget is first shown.
    pub fn init(&mut self) {
        self.show(Units::ZERO);
    }

    /// Accepts a picked date.
    ///
    /// This is the handler for the date picker's commit event. A date that is
    /// not strictly in the future is refused: an error notification is shown,
    /// start is disabled, and the previously stored date (if any) is kept.
    ///
    /// # Errors
    ///
    /// - [`CountdownError::AlreadyRunning`] while the countdown runs
    /// - [`CountdownError::InvalidSelection`] for dates at or before now
    pub fn select(&mut self, instant: DateTime<Local>) -> Result<(), CountdownError> {
        if self.running() {
            warn!("countdown {}: ignoring selection while running", self.id);
            return Err(CountdownError::AlreadyRunning);
        }

        let now = self.clock.now();
        if let Err(err) = validate_selection(instant, now) {
            warn!("countdown {}: {}", self.id, err);
            self.reject();
            return Err(err);
        }

        debug!("countdown {}: target set to {}", self.id, instant);
        self.target = Some(instant);
        self.start_enabled = true;
        Ok(())
    }

    /// Starts ticking towards the stored target.
    ///
    /// The stored date is checked again against the clock, so a date that
    /// was valid when picked but has since passed is refused the same way a
    /// past date is refused by [`select`](Self::select).
    ///
    /// On success date input and the start action are disabled and the first
    /// tick command is returned.
    ///
    /// # Errors
    ///
    /// - [`CountdownError::AlreadyRunning`] if already ticking
    /// - [`CountdownError::NoSelection`] if no date was ever accepted
    /// - [`CountdownError::StartDisabled`] if start was already used for the
    ///   current selection, or the last selection was refused
    /// - [`CountdownError::InvalidSelection`] if the stored date has lapsed
    pub fn start(&mut self) -> Result<Cmd, CountdownError> {
        if self.running() {
            warn!("countdown {}: start ignored, already running", self.id);
            return Err(CountdownError::AlreadyRunning);
        }
        let target = self.target.ok_or(CountdownError::NoSelection)?;
        if !self.start_enabled {
            return Err(CountdownError::StartDisabled);
        }

        let now = self.clock.now();
        if let Err(err) = validate_selection(target, now) {
            warn!("countdown {}: stale selection at start: {}", self.id, err);
            self.reject();
            return Err(err);
        }

        self.state = State::Running;
        self.start_enabled = false;
        self.input.set_input_enabled(false);
        self.tag += 1;
        self.ticker = Some(TickHandle { tag: self.tag });
        info!("countdown {}: started, target {}", self.id, target);

        Ok(self.tick())
    }

    /// Returns a command that asks this countdown to start.
    ///
    /// Useful from a key handler of a parent model; the resulting
    /// [`StartMsg`] is handled by [`update`](Self::update).
    pub fn start_cmd(&self) -> Cmd {
        let id = self.id;
        bubbletea_tick(Duration::from_nanos(1), move |_| {
            Box::new(StartMsg { id }) as Msg
        })
    }

    /// Stops ticking and re-enables date input.
    ///
    /// Any tick already scheduled is ignored when it arrives. Stopping an idle
    /// countdown does nothing.
    pub fn stop(&mut self) {
        if self.state == State::Idle {
            return;
        }
        self.ticker = None;
        self.state = State::Idle;
        self.input.set_input_enabled(true);
        debug!("countdown {}: stopped", self.id);
    }

    /// Handles countdown messages.
    ///
    /// - [`CommitMsg`] from the date picker is forwarded to [`select`](Self::select)
    /// - [`StartMsg`] for this countdown calls [`start`](Self::start)
    /// - [`TickMsg`] for the current tick handle advances the countdown
    ///
    /// Refused requests are already reported through the notifier, so they
    /// only show up here as a `None` command.
    pub fn update(&mut self, msg: Msg) -> std::option::Option<Cmd> {
        if let Some(commit) = msg.downcast_ref::<CommitMsg>() {
            if let Err(err) = self.select(commit.instant) {
                debug!("countdown {}: commit refused: {}", self.id, err);
            }
            return None;
        }

        if let Some(start) = msg.downcast_ref::<StartMsg>() {
            if start.id != self.id {
                return None;
            }
            return match self.start() {
                Ok(cmd) => Some(cmd),
                Err(err) => {
                    debug!("countdown {}: start refused: {}", self.id, err);
                    None
                }
            };
        }

        if let Some(tick) = msg.downcast_ref::<TickMsg>() {
            if tick.id != self.id {
                return None;
            }
            // Only the tick belonging to the current handle may advance us.
            match self.ticker {
                Some(handle) if handle.tag == tick.tag => {}
                _ => return None,
            }
            return self.advance();
        }

        None
    }

    /// Renders the last displayed units as `DD:HH:MM:SS`.
    pub fn view(&self) -> String {
        self.units.to_string()
    }

    fn advance(&mut self) -> std::option::Option<Cmd> {
        let target = self.target?;
        let remaining = remaining_millis(&target, &self.clock.now());

        if remaining == 0 {
            self.show(Units::ZERO);
            self.stop();
            info!("countdown {}: finished", self.id);
            let id = self.id;
            return Some(bubbletea_tick(Duration::from_nanos(1), move |_| {
                Box::new(FinishedMsg { id }) as Msg
            }));
        }

        self.show(decompose(remaining));
        Some(self.tick())
    }

    fn tick(&self) -> Cmd {
        let id = self.id;
        let tag = self.tag;
        bubbletea_tick(self.interval, move |_| Box::new(TickMsg { id, tag }) as Msg)
    }

    fn show(&mut self, units: Units) {
        self.units = units;
        self.display.show(units);
    }

    fn reject(&mut self) {
        self.start_enabled = false;
        self.notifier.error(INVALID_SELECTION_MESSAGE);
    }
}

impl Default for Model {
    /// A countdown on the system clock with no display and its own input gate.
    fn default() -> Self {
        new(SystemClock, |_: Units| {}, InputGate::new())
    }
}

impl BubbleTeaModel for Model {
    fn init() -> (Self, std::option::Option<Cmd>) {
        let mut model = Model::default();
        model.init();
        (model, None)
    }

    fn update(&mut self, msg: Msg) -> std::option::Option<Cmd> {
        self.update(msg)
    }

    fn view(&self) -> String {
        self.view()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::toast::{Level, Toasts};
    use chrono::TimeDelta;
    use std::sync::{Arc, Mutex};

    struct Fixture {
        countdown: Model,
        clock: ManualClock,
        frames: Arc<Mutex<Vec<Units>>>,
        gate: InputGate,
        toasts: Toasts,
    }

    fn fixture() -> Fixture {
        let clock = ManualClock::new();
        let frames = Arc::new(Mutex::new(Vec::new()));
        let gate = InputGate::new();
        let toasts = Toasts::new();

        let sink_frames = frames.clone();
        let countdown = new(
            clock.clone(),
            move |u: Units| sink_frames.lock().unwrap().push(u),
            gate.clone(),
        )
        .with_notifier(toasts.clone());

        Fixture {
            countdown,
            clock,
            frames,
            gate,
            toasts,
        }
    }

    fn current_tick(countdown: &Model) -> Msg {
        Box::new(TickMsg {
            id: countdown.id(),
            tag: countdown.tag,
        })
    }

    fn last_frame(frames: &Arc<Mutex<Vec<Units>>>) -> Option<Units> {
        frames.lock().unwrap().last().copied()
    }

    #[test]
    fn test_new_is_idle() {
        let f = fixture();
        assert_eq!(f.countdown.state(), State::Idle);
        assert!(!f.countdown.running());
        assert!(!f.countdown.start_enabled());
        assert!(f.countdown.selected().is_none());
        assert_eq!(f.countdown.interval, TICK_INTERVAL);
        assert_eq!(f.countdown.view(), "00:00:00:00");
    }

    #[test]
    fn test_unique_ids() {
        let a = fixture();
        let b = fixture();
        assert_ne!(a.countdown.id(), b.countdown.id());
    }

    #[test]
    fn test_init_shows_zero() {
        let mut f = fixture();
        f.countdown.init();
        assert_eq!(last_frame(&f.frames), Some(Units::ZERO));
    }

    #[test]
    fn test_select_future_enables_start() {
        let mut f = fixture();
        let target = f.clock.now() + TimeDelta::seconds(10);

        assert!(f.countdown.select(target).is_ok());
        assert_eq!(f.countdown.selected(), Some(target));
        assert!(f.countdown.start_enabled());
        assert!(f.toasts.is_empty());
    }

    #[test]
    fn test_select_now_or_past_is_refused() {
        let mut f = fixture();
        let now = f.clock.now();

        for instant in [now, now - TimeDelta::seconds(1)] {
            let err = f.countdown.select(instant).unwrap_err();
            assert_eq!(
                err,
                CountdownError::InvalidSelection {
                    selected: instant,
                    now
                }
            );
        }

        assert!(f.countdown.selected().is_none());
        assert!(!f.countdown.start_enabled());

        let toasts = f.toasts.entries();
        assert_eq!(toasts.len(), 2);
        assert_eq!(toasts[0].level, Level::Error);
        assert_eq!(toasts[0].message, INVALID_SELECTION_MESSAGE);
    }

    #[test]
    fn test_refused_selection_keeps_previous_target() {
        let mut f = fixture();
        let good = f.clock.now() + TimeDelta::minutes(1);
        f.countdown.select(good).unwrap();

        let bad = f.clock.now() - TimeDelta::minutes(1);
        assert!(f.countdown.select(bad).is_err());

        assert_eq!(f.countdown.selected(), Some(good));
        assert!(!f.countdown.start_enabled());
        assert_eq!(
            f.countdown.start().err().expect("start must be refused"),
            CountdownError::StartDisabled
        );
    }

    #[test]
    fn test_start_without_selection() {
        let mut f = fixture();
        assert_eq!(
            f.countdown.start().err().expect("start must be refused"),
            CountdownError::NoSelection
        );
        assert!(!f.countdown.running());
        assert!(f.gate.is_enabled());
    }

    #[test]
    fn test_start_disables_input_and_start() {
        let mut f = fixture();
        f.countdown
            .select(f.clock.now() + TimeDelta::seconds(5))
            .unwrap();

        assert!(f.countdown.start().is_ok());
        assert!(f.countdown.running());
        assert!(!f.countdown.start_enabled());
        assert!(!f.gate.is_enabled());
    }

    #[test]
    fn test_double_start_is_refused() {
        let mut f = fixture();
        f.countdown
            .select(f.clock.now() + TimeDelta::seconds(5))
            .unwrap();
        f.countdown.start().unwrap();
        let tag = f.countdown.tag;

        assert_eq!(
            f.countdown.start().err().expect("start must be refused"),
            CountdownError::AlreadyRunning
        );
        assert_eq!(f.countdown.tag, tag);
    }

    #[test]
    fn test_select_while_running_is_refused() {
        let mut f = fixture();
        let target = f.clock.now() + TimeDelta::seconds(5);
        f.countdown.select(target).unwrap();
        f.countdown.start().unwrap();

        let other = f.clock.now() + TimeDelta::hours(1);
        assert_eq!(
            f.countdown.select(other).unwrap_err(),
            CountdownError::AlreadyRunning
        );
        assert_eq!(f.countdown.selected(), Some(target));
    }

    #[test]
    fn test_stale_selection_is_refused_at_start() {
        let mut f = fixture();
        let target = f.clock.now() + TimeDelta::seconds(1);
        f.countdown.select(target).unwrap();

        f.clock.advance(Duration::from_secs(2));

        let err = f.countdown.start().err().expect("start must be refused");
        assert!(matches!(err, CountdownError::InvalidSelection { .. }));
        assert!(!f.countdown.running());
        assert!(!f.countdown.start_enabled());
        assert!(f.gate.is_enabled());
        assert!(f.frames.lock().unwrap().is_empty());

        let toasts = f.toasts.entries();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].message, INVALID_SELECTION_MESSAGE);
    }

    #[test]
    fn test_countdown_runs_to_zero() {
        let mut f = fixture();
        f.countdown
            .select(f.clock.now() + TimeDelta::milliseconds(2_500))
            .unwrap();
        f.countdown.start().unwrap();

        // 1500ms left
        f.clock.advance(Duration::from_secs(1));
        assert!(f.countdown.update(current_tick(&f.countdown)).is_some());
        assert_eq!(
            last_frame(&f.frames),
            Some(Units {
                days: 0,
                hours: 0,
                minutes: 0,
                seconds: 1
            })
        );
        assert_eq!(f.countdown.view(), "00:00:00:01");
        assert!(f.countdown.running());

        // 500ms left: still running, shows zero seconds
        f.clock.advance(Duration::from_secs(1));
        assert!(f.countdown.update(current_tick(&f.countdown)).is_some());
        assert_eq!(last_frame(&f.frames), Some(Units::ZERO));
        assert!(f.countdown.running());

        // past the target
        f.clock.advance(Duration::from_secs(1));
        assert!(f.countdown.update(current_tick(&f.countdown)).is_some());
        assert_eq!(last_frame(&f.frames), Some(Units::ZERO));
        assert_eq!(f.countdown.view(), "00:00:00:00");
        assert!(!f.countdown.running());
        assert!(f.gate.is_enabled());
        assert!(!f.countdown.start_enabled());
        assert_eq!(f.frames.lock().unwrap().len(), 3);

        f.countdown.stop();
        f.countdown.stop();
        assert_eq!(f.countdown.state(), State::Idle);
        assert!(f.gate.is_enabled());
    }

    #[test]
    fn test_tick_exactly_at_target_finishes() {
        let mut f = fixture();
        f.countdown
            .select(f.clock.now() + TimeDelta::seconds(1))
            .unwrap();
        f.countdown.start().unwrap();

        f.clock.advance(Duration::from_secs(1));
        f.countdown.update(current_tick(&f.countdown));

        assert!(!f.countdown.running());
        assert_eq!(last_frame(&f.frames), Some(Units::ZERO));
    }

    #[test]
    fn test_ticks_after_stop_are_ignored() {
        let mut f = fixture();
        f.countdown
            .select(f.clock.now() + TimeDelta::minutes(10))
            .unwrap();
        f.countdown.start().unwrap();
        let in_flight = current_tick(&f.countdown);

        f.countdown.stop();
        assert!(f.gate.is_enabled());

        f.clock.advance(Duration::from_secs(1));
        assert!(f.countdown.update(in_flight).is_none());
        assert!(f.frames.lock().unwrap().is_empty());
    }

    #[test]
    fn test_stop_when_idle_is_noop() {
        let mut f = fixture();
        let mut gate = f.gate.clone();
        gate.set_input_enabled(false);

        f.countdown.stop();

        // An idle countdown does not touch the gate.
        assert!(!f.gate.is_enabled());
        assert_eq!(f.countdown.state(), State::Idle);
    }

    #[test]
    fn test_ticks_for_other_countdowns_are_ignored() {
        let mut f = fixture();
        f.countdown
            .select(f.clock.now() + TimeDelta::minutes(10))
            .unwrap();
        f.countdown.start().unwrap();

        let foreign = TickMsg {
            id: f.countdown.id() + 999,
            tag: f.countdown.tag,
        };
        assert!(f.countdown.update(Box::new(foreign)).is_none());

        let stale_tag = TickMsg {
            id: f.countdown.id(),
            tag: f.countdown.tag + 1,
        };
        assert!(f.countdown.update(Box::new(stale_tag)).is_none());
        assert!(f.frames.lock().unwrap().is_empty());
    }

    #[test]
    fn test_restart_after_new_selection_uses_fresh_handle() {
        let mut f = fixture();
        f.countdown
            .select(f.clock.now() + TimeDelta::minutes(10))
            .unwrap();
        f.countdown.start().unwrap();
        let first_run = current_tick(&f.countdown);
        f.countdown.stop();

        f.countdown
            .select(f.clock.now() + TimeDelta::minutes(20))
            .unwrap();
        f.countdown.start().unwrap();

        assert!(f.countdown.update(first_run).is_none());
        assert!(f.countdown.update(current_tick(&f.countdown)).is_some());
        assert_eq!(last_frame(&f.frames).map(|u| u.minutes), Some(20));
    }

    #[test]
    fn test_update_handles_commit_and_start_messages() {
        let mut f = fixture();
        let target = f.clock.now() + TimeDelta::hours(2);

        assert!(f
            .countdown
            .update(Box::new(CommitMsg { instant: target }))
            .is_none());
        assert_eq!(f.countdown.selected(), Some(target));

        let other = StartMsg {
            id: f.countdown.id() + 1,
        };
        assert!(f.countdown.update(Box::new(other)).is_none());
        assert!(!f.countdown.running());

        let mine = StartMsg {
            id: f.countdown.id(),
        };
        assert!(f.countdown.update(Box::new(mine)).is_some());
        assert!(f.countdown.running());
    }

    #[test]
    fn test_update_with_refused_start_returns_none() {
        let mut f = fixture();
        let start = StartMsg {
            id: f.countdown.id(),
        };
        assert!(f.countdown.update(Box::new(start)).is_none());
        assert!(!f.countdown.running());
    }

    #[test]
    fn test_remaining_tracks_clock() {
        let mut f = fixture();
        assert!(f.countdown.remaining().is_none());

        f.countdown
            .select(f.clock.now() + TimeDelta::seconds(90))
            .unwrap();
        assert_eq!(f.countdown.remaining().map(|u| u.minutes), Some(1));

        f.clock.advance(Duration::from_secs(100));
        assert_eq!(f.countdown.remaining(), Some(Units::ZERO));
    }

    #[test]
    fn test_validate_selection() {
        let now = Local::now();
        assert!(validate_selection(now + TimeDelta::milliseconds(1), now).is_ok());
        assert!(validate_selection(now, now).is_err());
    }

    #[test]
    fn test_start_cmd_and_default() {
        let countdown = Model::default();
        let _cmd = countdown.start_cmd();
        assert_eq!(countdown.interval, TICK_INTERVAL);
        assert!(!countdown.running());
    }
}
