// SPDX-License-Identifier: MPL-2.0
//! Application root: a compass screen built around the knob component.
//!
//! The `App` struct owns the knob state and a handful of demo controls,
//! translates knob effects into UI updates, and persists the tick settings
//! through the config module.

use crate::config;
use crate::knob::{self, KnobModel, LabelFormatter};
use crate::ui::design_tokens::sizing;
use iced::widget::{button, checkbox, column, container, row, text};
use iced::{window, Element, Length, Subscription, Task, Theme};
use std::fmt;
use std::sync::Arc;

pub const WINDOW_DEFAULT_WIDTH: u32 = 480;
pub const WINDOW_DEFAULT_HEIGHT: u32 = 560;
pub const MIN_WINDOW_WIDTH: u32 = 360;
pub const MIN_WINDOW_HEIGHT: u32 = 420;

/// Launch options parsed by `main.rs`.
#[derive(Debug, Default)]
pub struct Flags {
    /// Initial compass heading in degrees.
    pub heading: Option<f64>,
    /// Alternative `settings.toml` location, overriding the platform
    /// config directory.
    pub config_path: Option<std::path::PathBuf>,
}

#[derive(Debug, Clone, Copy)]
pub enum Message {
    Knob(knob::Message),
    Increment,
    Decrement,
    SnapToggled(bool),
    ShowMarksToggled(bool),
    ShowLabelsToggled(bool),
}

pub struct App {
    knob: knob::State,
    config_path: Option<std::path::PathBuf>,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("heading", &self.knob.value())
            .finish()
    }
}

/// Formats compass tick labels: cardinal letters on the cardinal headings,
/// plain degrees everywhere else.
fn compass_formatter() -> LabelFormatter {
    Arc::new(|degrees: f64| match degrees {
        d if d == 0.0 || d == 360.0 => "N".to_string(),
        d if d == 90.0 => "E".to_string(),
        d if d == 180.0 => "S".to_string(),
        d if d == 270.0 => "W".to_string(),
        d => format!("{d:.1}"),
    })
}

/// Builds the window settings
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
        min_size: Some(iced::Size::new(
            MIN_WINDOW_WIDTH as f32,
            MIN_WINDOW_HEIGHT as f32,
        )),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // Wrap flags in RefCell<Option<_>> to satisfy Fn trait requirement
    // while only consuming flags once (iced 0.14 requires Fn, not FnOnce)
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state
            .borrow_mut()
            .take()
            .expect("Boot function called more than once");
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

impl App {
    /// Initializes the compass knob, applying persisted settings and the
    /// heading passed on the command line.
    fn new(flags: Flags) -> (Self, Task<Message>) {
        let mut model = KnobModel::new(0.0, 360.0, 0.0);
        model.set_min_angle(0.0);
        model.set_max_angle(360.0);
        model.set_minor_tick_count(3);
        model.set_show_tick_marks(true);
        model.set_show_tick_labels(true);
        model.set_label_formatter(Some(compass_formatter()));
        if let Err(error) = model.set_major_tick_unit(90.0) {
            eprintln!("Warning: rejected tick unit: {error}");
        }

        let config = match &flags.config_path {
            Some(path) => config::load_from_path(path),
            None => config::load(),
        }
        .unwrap_or_else(|error| {
            eprintln!("Warning: could not load config: {error}");
            config::Config::default()
        });
        if let Some(snap) = config.snap_to_ticks {
            model.set_snap_to_ticks(snap);
        }
        if let Some(show) = config.show_tick_marks {
            model.set_show_tick_marks(show);
        }
        if let Some(show) = config.show_tick_labels {
            model.set_show_tick_labels(show);
        }
        if let Some(unit) = config.major_tick_unit {
            if let Err(error) = model.set_major_tick_unit(unit) {
                eprintln!("Warning: ignoring configured tick unit: {error}");
            }
        }
        if let Some(count) = config.minor_tick_count {
            model.set_minor_tick_count(count);
        }
        if let Some(increment) = config.block_increment {
            model.set_block_increment(increment);
        }

        let mut app = App {
            knob: knob::State::new(model),
            config_path: flags.config_path,
        };
        if let Some(heading) = flags.heading {
            app.knob.adjust_value(heading);
        }

        (app, Task::none())
    }

    fn title(&self) -> String {
        String::from("Compass")
    }

    fn theme(&self) -> Theme {
        Theme::Dark
    }

    fn subscription(&self) -> Subscription<Message> {
        self.knob.subscription().map(Message::Knob)
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Knob(msg) => {
                // Heading readout and dot both derive from the knob state,
                // so the effect needs no further routing here.
                let _ = self.knob.handle(msg);
            }
            Message::Increment => {
                let _ = self.knob.increment_value();
            }
            Message::Decrement => {
                let _ = self.knob.decrement_value();
            }
            Message::SnapToggled(snap) => {
                self.knob.set_snap_to_ticks(snap);
                self.persist_settings();
            }
            Message::ShowMarksToggled(show) => {
                self.knob.set_show_tick_marks(show);
                self.persist_settings();
            }
            Message::ShowLabelsToggled(show) => {
                self.knob.set_show_tick_labels(show);
                self.persist_settings();
            }
        }
        Task::none()
    }

    fn view(&self) -> Element<'_, Message> {
        let model = self.knob.model();

        let heading = text(format!("{:.1}\u{00B0}", self.knob.value())).size(28);

        let dial = container(self.knob.view().map(Message::Knob))
            .width(Length::Fixed(sizing::KNOB_PREFERRED))
            .height(Length::Fixed(sizing::KNOB_PREFERRED));

        let steps = row![
            button(text("-")).on_press(Message::Decrement),
            button(text("+")).on_press(Message::Increment),
        ]
        .spacing(12);

        let toggles = column![
            checkbox(model.snap_to_ticks())
                .label("Snap to ticks")
                .on_toggle(Message::SnapToggled),
            checkbox(model.show_tick_marks())
                .label("Show tick marks")
                .on_toggle(Message::ShowMarksToggled),
            checkbox(model.show_tick_labels())
                .label("Show tick labels")
                .on_toggle(Message::ShowLabelsToggled),
        ]
        .spacing(8);

        container(
            column![heading, dial, steps, toggles]
                .spacing(16)
                .align_x(iced::Alignment::Center),
        )
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .into()
    }

    /// Writes the current tick settings back to disk. Persistence failures
    /// are reported but never interrupt the UI.
    fn persist_settings(&self) {
        let model = self.knob.model();
        let config = config::Config {
            snap_to_ticks: Some(model.snap_to_ticks()),
            show_tick_marks: Some(model.show_tick_marks()),
            show_tick_labels: Some(model.show_tick_labels()),
            major_tick_unit: Some(model.major_tick_unit()),
            minor_tick_count: Some(model.minor_tick_count()),
            block_increment: Some(model.block_increment()),
        };
        let result = match &self.config_path {
            Some(path) => config::save_to_path(&config, path),
            None => config::save(&config),
        };
        if let Err(error) = result {
            eprintln!("Warning: could not save config: {error}");
        }
    }
}
