#![warn(missing_docs)]

//! # countdown-widgets
//!
//! Two small terminal widgets for [bubbletea-rs](https://github.com/joshka/bubbletea-rs)
//! applications: a countdown to a picked date, and a form that settles a
//! delayed outcome and reports it as a toast.
//!
//! Each widget follows the Elm Architecture with `update()` and `view()`
//! methods and routes its own messages by id, so several instances can live
//! in one program.
//!
//! ## Components
//!
//! | Component | Description |
//! |-----------|-------------|
//! | `DatePicker` | Keyboard date/time picker emitting a commit message |
//! | `Countdown` | Ticks once a second towards the picked date, then stops |
//! | `PromiseForm` | Delay + outcome form scheduling one-shot settlements |
//! | `Toasts` | Shared stack of success/error notifications |
//!
//! The countdown depends only on traits for its surroundings: a
//! [`Clock`](clock::Clock) for the time, a [`DisplaySink`](sink::DisplaySink)
//! for the four unit cells, an [`InputSink`](sink::InputSink) to lock date
//! input while running, and a [`Notifier`](sink::Notifier) for rejected
//! dates. Swap in [`ManualClock`](clock::ManualClock) to drive it by hand.
//!
//! ## Wiring the countdown to a picker
//!
//! ```rust
//! use countdown_widgets::prelude::*;
//! use bubbletea_rs::{Cmd, Model, Msg};
//!
//! struct App {
//!     picker: DatePicker,
//!     countdown: Countdown,
//!     toasts: Toasts,
//! }
//!
//! impl Model for App {
//!     fn init() -> (Self, Option<Cmd>) {
//!         let gate = InputGate::new();
//!         let toasts = Toasts::new();
//!         let picker = date_picker_new(&SystemClock, gate.clone());
//!         let mut countdown = countdown_new(SystemClock, DisplayCell::new(), gate)
//!             .with_notifier(toasts.clone());
//!         countdown.init();
//!         (Self { picker, countdown, toasts }, None)
//!     }
//!
//!     fn update(&mut self, msg: Msg) -> Option<Cmd> {
//!         if let Some(cmd) = self.picker.update(&msg) {
//!             return Some(cmd);
//!         }
//!         self.countdown.update(msg)
//!     }
//!
//!     fn view(&self) -> String {
//!         format!(
//!             "{}\n{}\n{}",
//!             self.picker.view(),
//!             self.countdown.view(),
//!             self.toasts.view()
//!         )
//!     }
//! }
//! ```

pub mod clock;
pub mod countdown;
pub mod date_picker;
pub mod duration;
pub mod key;
pub mod promise;
pub mod sink;
pub mod toast;

pub use clock::{Clock, ManualClock, SystemClock};
pub use countdown::{
    new as countdown_new, validate_selection, CountdownError, FinishedMsg as CountdownFinishedMsg,
    Model as Countdown, StartMsg as CountdownStartMsg, State as CountdownState,
    TickMsg as CountdownTickMsg,
};
pub use date_picker::{new as date_picker_new, CommitMsg, Field, Model as DatePicker};
pub use duration::{decompose, pad2, Units};
pub use key::Binding;
pub use promise::{
    new as promise_form_new, settle, settle_cmd, FormError, Model as PromiseForm, Outcome,
    SettledMsg, Settlement,
};
pub use sink::{DisplayCell, DisplaySink, InputGate, InputSink, LogNotifier, Notifier};
pub use toast::{Level as ToastLevel, Toast, Toasts};

/// Prelude module for convenient imports.
///
/// ```rust
/// use countdown_widgets::prelude::*;
///
/// let units = decompose(90_000);
/// assert_eq!(units.to_string(), "00:00:01:30");
/// ```
pub mod prelude {
    pub use crate::clock::{Clock, ManualClock, SystemClock};
    pub use crate::countdown::{
        new as countdown_new, CountdownError, FinishedMsg as CountdownFinishedMsg,
        Model as Countdown,
    };
    pub use crate::date_picker::{new as date_picker_new, CommitMsg, Model as DatePicker};
    pub use crate::duration::{decompose, pad2, Units};
    pub use crate::promise::{new as promise_form_new, Model as PromiseForm, Outcome, Settlement};
    pub use crate::sink::{DisplayCell, DisplaySink, InputGate, InputSink, Notifier};
    pub use crate::toast::Toasts;
}
