//! Countdown and promise form side by side.
//!
//! shift+tab switches between the two widgets, esc quits.
//! Logs go to stderr; run with `RUST_LOG=debug ... 2>widgets.log` to keep
//! them off the screen. A refresh tick redraws the screen every
//! [`REFRESH_INTERVAL`] so expired toasts disappear while idle.

use std::time::{Duration, Instant};

use bubbletea_rs::{quit, tick, Cmd, KeyMsg, Model, Msg, Program};
use countdown_widgets::countdown::FinishedMsg;
use countdown_widgets::prelude::*;
use countdown_widgets::promise::SettledMsg;
use crossterm::event::{KeyCode, KeyModifiers};
use log::info;

const REFRESH_INTERVAL: Duration = Duration::from_millis(250);

#[derive(Debug)]
struct RefreshMsg;

fn refresh() -> Cmd {
    tick(REFRESH_INTERVAL, |_| Box::new(RefreshMsg) as Msg)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pane {
    Timer,
    Form,
}

struct App {
    pane: Pane,
    picker: DatePicker,
    countdown: Countdown,
    form: PromiseForm,
    toasts: Toasts,
}

impl Model for App {
    fn init() -> (Self, Option<Cmd>) {
        let gate = InputGate::new();
        let toasts = Toasts::new();

        let picker = date_picker_new(&SystemClock, gate.clone());
        let mut countdown =
            countdown_new(SystemClock, DisplayCell::new(), gate).with_notifier(toasts.clone());
        countdown.init();
        let form = promise_form_new(toasts.clone());

        (
            Self {
                pane: Pane::Timer,
                picker,
                countdown,
                form,
                toasts,
            },
            Some(refresh()),
        )
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        if msg.downcast_ref::<RefreshMsg>().is_some() {
            self.toasts.cleanup_at(Instant::now());
            return Some(refresh());
        }
        if let Some(key_msg) = msg.downcast_ref::<KeyMsg>() {
            let ctrl_c = key_msg.key == KeyCode::Char('c')
                && key_msg.modifiers.contains(KeyModifiers::CONTROL);
            if key_msg.key == KeyCode::Esc || ctrl_c {
                return Some(quit());
            }
            if key_msg.key == KeyCode::BackTab {
                self.pane = match self.pane {
                    Pane::Timer => Pane::Form,
                    Pane::Form => Pane::Timer,
                };
                return None;
            }
            return match self.pane {
                Pane::Timer if key_msg.key == KeyCode::Char('s') => {
                    Some(self.countdown.start_cmd())
                }
                Pane::Timer => self.picker.update(&msg),
                Pane::Form => self.form.update(msg),
            };
        }

        if msg.downcast_ref::<SettledMsg>().is_some() {
            return self.form.update(msg);
        }
        if let Some(finished) = msg.downcast_ref::<FinishedMsg>() {
            info!("countdown {} reached zero", finished.id);
            return None;
        }
        self.countdown.update(msg)
    }

    fn view(&self) -> String {
        let marker = |pane: Pane| if pane == self.pane { "▶" } else { " " };

        format!(
            "{} Timer\n  {}\n  {}\n  {} • s start\n\n{} Promise\n{}\n  {}\n\n{}\n\nshift+tab switch • esc quit",
            marker(Pane::Timer),
            self.picker.view(),
            self.countdown.view(),
            self.picker.help_view(),
            marker(Pane::Form),
            self.form
                .view()
                .lines()
                .map(|l| format!("  {}", l))
                .collect::<Vec<_>>()
                .join("\n"),
            self.form.help_view(),
            self.toasts.view()
        )
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let program = Program::<App>::builder().build()?;
    program.run().await?;
    Ok(())
}
