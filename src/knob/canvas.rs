// SPDX-License-Identifier: MPL-2.0
//! Canvas renderer and pointer-event translation for the knob.
//!
//! Draws the concentric rings, the tick canvas, and the rotating indicator
//! into a square area centered in the widget bounds, and translates mouse
//! events into component messages. Static geometry lives in two caches:
//! the rings only change with the widget size, the ticks whenever the tick
//! configuration changes (the component clears that cache).

use super::geometry::{self, Tick};
use super::interaction::{Interaction, Release};
use super::model::KnobModel;
use super::style::Style;
use super::Message;
use iced::widget::canvas::{self, Cache, Frame, Geometry, LineCap, Path, Stroke, Text};
use iced::{mouse, Point, Radians, Rectangle, Renderer, Theme, Vector};

// Ring diameters and the indicator lozenge as fractions of the square side,
// mirroring the original skin's proportions.
const OUTER_RING: f32 = 0.998;
const OUTER_FRAME: f32 = 0.96;
const INNER_FRAME: f32 = 0.89;
const INNER_RING: f32 = 0.86;
const DOT_WIDTH: f32 = 0.02;
const DOT_INNER_RADIUS: f32 = 0.12;
const DOT_OUTER_RADIUS: f32 = 0.28;

// Tick geometry, also fractions of the side.
const TICK_INNER_RADIUS: f32 = 0.445;
const TICK_OUTER_MINOR: f32 = 0.47;
const TICK_OUTER_MAJOR: f32 = 0.48;
const TICK_WIDTH_MINOR: f32 = 0.002;
const TICK_WIDTH_MAJOR: f32 = 0.004;
const LABEL_RADIUS: f32 = 0.41;
const LABEL_SIZE_MINOR: f32 = 0.04;
const LABEL_SIZE_MAJOR: f32 = 0.06;

/// Borrowed view of the component state, handed to `Canvas::new` on every
/// `view` call. The caches live in the component so they survive across
/// frames.
pub struct KnobCanvas<'a> {
    pub model: &'a KnobModel,
    pub style: &'a Style,
    /// Current indicator angle in degrees. During a drag this is the live
    /// value angle; otherwise the animated one. The dot's rotation is
    /// derived from this single angle, never stored on its own.
    pub indicator_angle: f64,
    pub rings_cache: &'a Cache,
    pub ticks_cache: &'a Cache,
}

impl<'a> KnobCanvas<'a> {
    fn pointer_fraction(&self, position: Point, bounds: Rectangle) -> Option<f64> {
        geometry::pointer_fraction(
            self.model,
            f64::from(position.x),
            f64::from(position.y),
            f64::from(bounds.width),
            f64::from(bounds.height),
        )
    }

    fn draw_rings(&self, frame: &mut Frame, center: Point, size: f32) {
        let rings = [
            (OUTER_RING, self.style.outer_ring),
            (OUTER_FRAME, self.style.frame),
            (INNER_FRAME, self.style.frame),
            (INNER_RING, self.style.inner_ring),
        ];
        for (diameter, color) in rings {
            let circle = Path::circle(center, size * diameter / 2.0);
            frame.fill(&circle, color);
        }
    }

    fn draw_ticks(&self, frame: &mut Frame, center: Point, size: f32) {
        if !self.model.show_tick_marks() && !self.model.show_tick_labels() {
            return;
        }
        for tick in geometry::tick_layout(self.model) {
            if self.model.show_tick_marks() {
                self.draw_tick_mark(frame, center, size, &tick);
            }
            if self.model.show_tick_labels() {
                self.draw_tick_label(frame, center, size, &tick);
            }
        }
    }

    fn draw_tick_mark(&self, frame: &mut Frame, center: Point, size: f32, tick: &Tick) {
        let (sin, cos) = tick.angle.to_radians().sin_cos();
        let (sin, cos) = (sin as f32, cos as f32);
        let outer = if tick.is_major {
            TICK_OUTER_MAJOR
        } else {
            TICK_OUTER_MINOR
        };
        let width = if tick.is_major {
            TICK_WIDTH_MAJOR
        } else {
            TICK_WIDTH_MINOR
        };
        let from = Point::new(
            center.x + size * TICK_INNER_RADIUS * sin,
            center.y - size * TICK_INNER_RADIUS * cos,
        );
        let to = Point::new(
            center.x + size * outer * sin,
            center.y - size * outer * cos,
        );
        frame.stroke(
            &Path::line(from, to),
            Stroke::default()
                .with_width((size * width).max(1.0))
                .with_color(self.style.tick_mark_color)
                .with_line_cap(LineCap::Round),
        );
    }

    fn draw_tick_label(&self, frame: &mut Frame, center: Point, size: f32, tick: &Tick) {
        let (sin, cos) = tick.angle.to_radians().sin_cos();
        let position = Point::new(
            center.x + size * LABEL_RADIUS * sin as f32,
            center.y - size * LABEL_RADIUS * cos as f32,
        );
        let label_size = if tick.is_major {
            LABEL_SIZE_MAJOR
        } else {
            LABEL_SIZE_MINOR
        };
        let content = self.model.format_label(tick.value - self.model.min());

        // Rotate the label to face outward along its tick.
        frame.with_save(|frame| {
            frame.translate(Vector::new(position.x, position.y));
            frame.rotate(Radians(tick.angle.to_radians() as f32));
            frame.fill_text(Text {
                content,
                position: Point::ORIGIN,
                color: self.style.tick_label_color,
                size: (size * label_size).into(),
                font: self.style.tick_label_font,
                align_x: iced::widget::text::Alignment::Center,
                align_y: iced::alignment::Vertical::Center,
                ..Text::default()
            });
        });
    }

    fn draw_indicator(&self, frame: &mut Frame, center: Point, size: f32) {
        frame.with_save(|frame| {
            frame.translate(Vector::new(center.x, center.y));
            frame.rotate(Radians(self.indicator_angle.to_radians() as f32));
            let dot = Path::line(
                Point::new(0.0, -size * DOT_OUTER_RADIUS),
                Point::new(0.0, -size * DOT_INNER_RADIUS),
            );
            frame.stroke(
                &dot,
                Stroke::default()
                    .with_width(size * DOT_WIDTH)
                    .with_color(self.style.indicator)
                    .with_line_cap(LineCap::Round),
            );
        });
    }
}

impl<'a> canvas::Program<Message> for KnobCanvas<'a> {
    type State = Interaction;

    fn update(
        &self,
        state: &mut Self::State,
        event: &iced::Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Option<iced::widget::Action<Message>> {
        use iced::widget::Action;

        match event {
            iced::Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
                let position = cursor.position_in(bounds)?;
                // Capture the offset between the value's fraction and the
                // pointer's so the drag keeps the grab point.
                let offset = self
                    .pointer_fraction(position, bounds)
                    .map_or(0.0, |fraction| {
                        geometry::value_fraction(self.model) - fraction
                    });
                state.press(position, offset);
                Some(Action::publish(Message::Pressed).and_capture())
            }
            iced::Event::Mouse(mouse::Event::CursorMoved { .. }) if state.is_engaged() => {
                // Track relative to the widget origin even outside the
                // bounds: the pointer stays captured during a drag.
                let position = cursor.position_from(bounds.position())?;
                let offset = state.drag_to(position)?;
                let fraction = self.pointer_fraction(position, bounds)? + offset;
                let value = geometry::fraction_to_value(self.model, fraction);
                Some(Action::publish(Message::Dragged(value)).and_capture())
            }
            iced::Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left))
                if state.is_engaged() =>
            {
                let click = match cursor.position_from(bounds.position()) {
                    Some(position) => match state.release(position)? {
                        Release::Click => geometry::pointer_to_value(
                            self.model,
                            f64::from(position.x),
                            f64::from(position.y),
                            f64::from(bounds.width),
                            f64::from(bounds.height),
                        ),
                        Release::DragEnd => None,
                    },
                    None => {
                        state.cancel();
                        None
                    }
                };
                Some(Action::publish(Message::Released { click }).and_capture())
            }
            iced::Event::Mouse(mouse::Event::CursorLeft) if state.is_engaged() => {
                state.cancel();
                Some(Action::publish(Message::Released { click: None }).and_capture())
            }
            _ => None,
        }
    }

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let size = bounds.width.min(bounds.height);
        let center = Point::new(bounds.width / 2.0, bounds.height / 2.0);

        let rings = self
            .rings_cache
            .draw(renderer, bounds.size(), |frame: &mut Frame| {
                self.draw_rings(frame, center, size);
            });

        let ticks = self
            .ticks_cache
            .draw(renderer, bounds.size(), |frame: &mut Frame| {
                self.draw_ticks(frame, center, size);
            });

        let mut overlay = Frame::new(renderer, bounds.size());
        self.draw_indicator(&mut overlay, center, size);

        vec![rings, ticks, overlay.into_geometry()]
    }

    fn mouse_interaction(
        &self,
        state: &Self::State,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> mouse::Interaction {
        if state.is_engaged() {
            mouse::Interaction::Grabbing
        } else if cursor.is_over(bounds) {
            mouse::Interaction::Pointer
        } else {
            mouse::Interaction::default()
        }
    }
}

const _: () = {
    assert!(INNER_RING < INNER_FRAME);
    assert!(TICK_INNER_RADIUS < TICK_OUTER_MINOR);
    assert!(TICK_OUTER_MINOR < TICK_OUTER_MAJOR);
};
