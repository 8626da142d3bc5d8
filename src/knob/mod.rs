// SPDX-License-Identifier: MPL-2.0
//! Rotary knob (round slider) component.
//!
//! A circular control that displays a bounded numeric value by rotating an
//! indicator across an angular sweep, with tick marks, tick labels, and
//! drag/click interaction. Follows the component pattern used across this
//! codebase: a [`State`] owning the data, a [`Message`] enum fed to
//! [`State::handle`], and an [`Effect`] the host reacts to.
//!
//! All configuration goes through [`State`] methods so the cached tick and
//! ring geometry is invalidated exactly when something it depends on
//! changes.

pub mod animation;
pub mod canvas;
pub mod geometry;
pub mod interaction;
pub mod model;
pub mod style;

pub use model::{KnobModel, LabelFormatter};
pub use style::Style;

use animation::RotationAnimation;
use canvas::KnobCanvas;
use iced::widget::canvas::{Cache, Canvas};
use iced::{Element, Length, Subscription};
use std::time::{Duration, Instant};

/// How often the indicator animation is advanced.
const ANIMATION_TICK: Duration = Duration::from_millis(16);

/// Messages produced by the knob canvas and the animation clock.
#[derive(Debug, Clone, Copy)]
pub enum Message {
    /// Pointer pressed on the knob.
    Pressed,
    /// Pointer dragged to a position implying this value.
    Dragged(f64),
    /// Pointer released; `click` carries the mapped value when the gesture
    /// stayed within the click threshold.
    Released { click: Option<f64> },
    /// Animation clock tick.
    Tick(Instant),
}

/// Effects the host application reacts to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Effect {
    None,
    /// The value actually changed; carries the new value.
    ValueChanged(f64),
}

/// Knob component state: the model, its style, and the render caches.
pub struct State {
    model: KnobModel,
    style: Style,
    /// Indicator angle in degrees as currently displayed. Tracks the value
    /// 1:1 during a drag, the animation otherwise.
    indicator_angle: f64,
    animation: Option<RotationAnimation>,
    rings_cache: Cache,
    ticks_cache: Cache,
}

impl Default for State {
    fn default() -> Self {
        Self::new(KnobModel::default())
    }
}

impl State {
    pub fn new(model: KnobModel) -> Self {
        let indicator_angle = geometry::value_to_angle(&model, model.value());
        Self {
            model,
            style: Style::default(),
            indicator_angle,
            animation: None,
            rings_cache: Cache::default(),
            ticks_cache: Cache::default(),
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        Canvas::new(KnobCanvas {
            model: &self.model,
            style: &self.style,
            indicator_angle: self.indicator_angle,
            rings_cache: &self.rings_cache,
            ticks_cache: &self.ticks_cache,
        })
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
    }

    /// Animation clock: only runs while a rotation is in flight.
    pub fn subscription(&self) -> Subscription<Message> {
        if self.animation.is_some() {
            iced::time::every(ANIMATION_TICK).map(Message::Tick)
        } else {
            Subscription::none()
        }
    }

    pub fn handle(&mut self, message: Message) -> Effect {
        match message {
            Message::Pressed => {
                // The drag takes over the indicator; drop any animation.
                self.animation = None;
                self.model.set_value_changing(true);
                Effect::None
            }
            Message::Dragged(value) => {
                let before = self.model.value();
                self.model.adjust_value(value);
                self.indicator_angle =
                    geometry::value_to_angle(&self.model, self.model.value());
                if self.model.value() == before {
                    Effect::None
                } else {
                    Effect::ValueChanged(self.model.value())
                }
            }
            Message::Released { click } => {
                self.model.set_value_changing(false);
                match click {
                    Some(value) => self.adjust_value(value),
                    None => Effect::None,
                }
            }
            Message::Tick(now) => {
                if let Some(anim) = self.animation {
                    self.indicator_angle = anim.angle_at(now);
                    if anim.is_finished(now) {
                        self.animation = None;
                    }
                }
                Effect::None
            }
        }
    }

    // --- programmatic value changes (animated)

    /// Moves the value through the clamp/snap pipeline and eases the
    /// indicator to it.
    pub fn adjust_value(&mut self, value: f64) -> Effect {
        let before = self.model.value();
        self.model.adjust_value(value);
        self.animate_to_value();
        if self.model.value() == before {
            Effect::None
        } else {
            Effect::ValueChanged(self.model.value())
        }
    }

    /// Sets the value directly (clamped, not snapped) and eases the
    /// indicator to it.
    pub fn set_value(&mut self, value: f64) -> Effect {
        let before = self.model.value();
        self.model.set_value(value);
        self.animate_to_value();
        if self.model.value() == before {
            Effect::None
        } else {
            Effect::ValueChanged(self.model.value())
        }
    }

    pub fn increment_value(&mut self) -> Effect {
        self.adjust_value(self.model.value() + self.model.block_increment())
    }

    pub fn decrement_value(&mut self) -> Effect {
        self.adjust_value(self.model.value() - self.model.block_increment())
    }

    // --- configuration (each setter invalidates what depends on it)

    pub fn set_min(&mut self, min: f64) {
        self.model.set_min(min);
        self.ticks_cache.clear();
        self.animate_to_value();
    }

    pub fn set_max(&mut self, max: f64) {
        self.model.set_max(max);
        self.ticks_cache.clear();
        self.animate_to_value();
    }

    pub fn set_min_angle(&mut self, angle: f64) {
        self.model.set_min_angle(angle);
        self.ticks_cache.clear();
        self.animate_to_value();
    }

    pub fn set_max_angle(&mut self, angle: f64) {
        self.model.set_max_angle(angle);
        self.ticks_cache.clear();
        self.animate_to_value();
    }

    pub fn set_major_tick_unit(&mut self, unit: f64) -> crate::error::Result<()> {
        self.model.set_major_tick_unit(unit)?;
        self.ticks_cache.clear();
        Ok(())
    }

    pub fn set_minor_tick_count(&mut self, count: u32) {
        self.model.set_minor_tick_count(count);
        self.ticks_cache.clear();
    }

    pub fn set_snap_to_ticks(&mut self, snap: bool) {
        self.model.set_snap_to_ticks(snap);
    }

    pub fn set_block_increment(&mut self, increment: f64) {
        self.model.set_block_increment(increment);
    }

    pub fn set_show_tick_marks(&mut self, show: bool) {
        self.model.set_show_tick_marks(show);
        self.ticks_cache.clear();
    }

    pub fn set_show_tick_labels(&mut self, show: bool) {
        self.model.set_show_tick_labels(show);
        self.ticks_cache.clear();
    }

    pub fn set_label_formatter(&mut self, formatter: Option<LabelFormatter>) {
        self.model.set_label_formatter(formatter);
        self.ticks_cache.clear();
    }

    pub fn set_style(&mut self, style: Style) {
        self.style = style;
        self.rings_cache.clear();
        self.ticks_cache.clear();
    }

    // --- accessors

    pub fn model(&self) -> &KnobModel {
        &self.model
    }

    pub fn value(&self) -> f64 {
        self.model.value()
    }

    pub fn is_value_changing(&self) -> bool {
        self.model.is_value_changing()
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    pub fn indicator_angle(&self) -> f64 {
        self.indicator_angle
    }

    /// Retargets (or starts) the rotation toward the current value's angle.
    fn animate_to_value(&mut self) {
        let target = geometry::value_to_angle(&self.model, self.model.value());
        if target == self.indicator_angle {
            self.animation = None;
            return;
        }
        let now = Instant::now();
        self.animation = Some(match self.animation {
            Some(anim) => anim.retarget(target, now),
            None => RotationAnimation::new(self.indicator_angle, target, now),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use animation::ROTATION_DURATION;

    fn snap_state() -> State {
        let mut model = KnobModel::new(0.0, 100.0, 0.0);
        model.set_major_tick_unit(25.0).unwrap();
        model.set_minor_tick_count(0);
        model.set_snap_to_ticks(true);
        State::new(model)
    }

    #[test]
    fn press_sets_value_changing() {
        let mut state = State::default();
        assert!(!state.is_value_changing());
        state.handle(Message::Pressed);
        assert!(state.is_value_changing());
        state.handle(Message::Released { click: None });
        assert!(!state.is_value_changing());
    }

    #[test]
    fn drag_updates_value_and_indicator_without_animation() {
        let mut state = State::default();
        state.handle(Message::Pressed);
        let effect = state.handle(Message::Dragged(30.0));
        assert_eq!(effect, Effect::ValueChanged(30.0));
        assert!(!state.is_animating());
        let expected = geometry::value_to_angle(state.model(), 30.0);
        assert_eq!(state.indicator_angle(), expected);
    }

    #[test]
    fn drag_through_snap_pipeline() {
        let mut state = snap_state();
        state.handle(Message::Pressed);
        let effect = state.handle(Message::Dragged(55.0));
        assert_eq!(effect, Effect::ValueChanged(50.0));
    }

    #[test]
    fn drag_to_same_value_is_silent() {
        let mut state = State::default();
        state.handle(Message::Pressed);
        state.handle(Message::Dragged(30.0));
        let effect = state.handle(Message::Dragged(30.0));
        assert_eq!(effect, Effect::None);
    }

    #[test]
    fn drag_on_degenerate_domain_is_noop() {
        let mut state = State::new(KnobModel::new(0.0, 0.0, 0.0));
        state.handle(Message::Pressed);
        let effect = state.handle(Message::Dragged(10.0));
        assert_eq!(effect, Effect::None);
        assert_eq!(state.value(), 0.0);
    }

    #[test]
    fn click_jump_animates_to_target() {
        let mut state = State::default();
        state.handle(Message::Pressed);
        let effect = state.handle(Message::Released { click: Some(60.0) });
        assert_eq!(effect, Effect::ValueChanged(60.0));
        assert!(state.is_animating());

        // Past the animation duration the indicator settles on the target.
        let later = Instant::now() + ROTATION_DURATION * 2;
        state.handle(Message::Tick(later));
        assert!(!state.is_animating());
        let expected = geometry::value_to_angle(state.model(), 60.0);
        assert_eq!(state.indicator_angle(), expected);
    }

    #[test]
    fn programmatic_set_value_animates() {
        let mut state = State::default();
        let effect = state.set_value(80.0);
        assert_eq!(effect, Effect::ValueChanged(80.0));
        assert!(state.is_animating());
    }

    #[test]
    fn retarget_replaces_in_flight_animation() {
        let mut state = State::default();
        state.set_value(80.0);
        state.set_value(20.0);
        // still exactly one animation, aimed at the newest target
        let later = Instant::now() + ROTATION_DURATION * 2;
        state.handle(Message::Tick(later));
        let expected = geometry::value_to_angle(state.model(), 20.0);
        assert_eq!(state.indicator_angle(), expected);
    }

    #[test]
    fn increment_clamps_and_reports() {
        let mut state = State::new(KnobModel::new(0.0, 100.0, 95.0));
        let effect = state.increment_value();
        assert_eq!(effect, Effect::ValueChanged(100.0));
        assert_eq!(state.increment_value(), Effect::None);
    }

    #[test]
    fn invalid_tick_unit_propagates() {
        let mut state = State::default();
        assert!(state.set_major_tick_unit(0.0).is_err());
        assert!(state.set_major_tick_unit(-5.0).is_err());
        assert!(state.set_major_tick_unit(90.0).is_ok());
    }

    #[test]
    fn set_value_to_current_does_not_animate() {
        let mut state = State::new(KnobModel::new(0.0, 100.0, 40.0));
        assert_eq!(state.set_value(40.0), Effect::None);
        assert!(!state.is_animating());
    }
}
