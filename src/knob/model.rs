// SPDX-License-Identifier: MPL-2.0
//! Value/range/angle model for the knob control.
//!
//! The model owns the numeric domain (`min`/`max`/`value`), the angular
//! sweep (`min_angle`/`max_angle`), and the tick configuration. Every
//! mutation of the value or its bounds re-runs the clamp invariant so
//! `value` is always inside `[min, max]` afterwards.

use crate::error::{Error, Result};
use std::fmt;
use std::sync::Arc;

/// Maps a tick's numeric value to its display string.
pub type LabelFormatter = Arc<dyn Fn(f64) -> String + Send + Sync>;

pub const DEFAULT_MIN_ANGLE: f64 = -140.0;
pub const DEFAULT_MAX_ANGLE: f64 = 140.0;
pub const DEFAULT_MAJOR_TICK_UNIT: f64 = 25.0;
pub const DEFAULT_MINOR_TICK_COUNT: u32 = 3;
pub const DEFAULT_BLOCK_INCREMENT: f64 = 10.0;

#[derive(Clone)]
pub struct KnobModel {
    min: f64,
    max: f64,
    value: f64,
    min_angle: f64,
    max_angle: f64,
    major_tick_unit: f64,
    minor_tick_count: u32,
    snap_to_ticks: bool,
    block_increment: f64,
    show_tick_marks: bool,
    show_tick_labels: bool,
    value_changing: bool,
    label_formatter: Option<LabelFormatter>,
}

impl Default for KnobModel {
    fn default() -> Self {
        Self::new(0.0, 100.0, 0.0)
    }
}

impl fmt::Debug for KnobModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KnobModel")
            .field("min", &self.min)
            .field("max", &self.max)
            .field("value", &self.value)
            .field("min_angle", &self.min_angle)
            .field("max_angle", &self.max_angle)
            .field("major_tick_unit", &self.major_tick_unit)
            .field("minor_tick_count", &self.minor_tick_count)
            .field("snap_to_ticks", &self.snap_to_ticks)
            .field("value_changing", &self.value_changing)
            .finish()
    }
}

impl KnobModel {
    /// Creates a model with the given bounds and initial value. The value
    /// is clamped into `[min, max]` immediately.
    pub fn new(min: f64, max: f64, value: f64) -> Self {
        let mut model = Self {
            min,
            max,
            value,
            min_angle: DEFAULT_MIN_ANGLE,
            max_angle: DEFAULT_MAX_ANGLE,
            major_tick_unit: DEFAULT_MAJOR_TICK_UNIT,
            minor_tick_count: DEFAULT_MINOR_TICK_COUNT,
            snap_to_ticks: false,
            block_increment: DEFAULT_BLOCK_INCREMENT,
            show_tick_marks: false,
            show_tick_labels: false,
            value_changing: false,
            label_formatter: None,
        };
        model.adjust_values();
        model
    }

    // --- numeric domain

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    /// Updates the lower bound. The current value is re-clamped; the upper
    /// bound is left alone (value bounds do not adjust each other).
    pub fn set_min(&mut self, min: f64) {
        self.min = min;
        self.adjust_values();
    }

    /// Updates the upper bound. The current value is re-clamped; the lower
    /// bound is left alone.
    pub fn set_max(&mut self, max: f64) {
        self.max = max;
        self.adjust_values();
    }

    /// Stores the value and immediately re-clamps it into `[min, max]`.
    /// Clamping an already-in-range value is a no-op, so repeated
    /// application cannot recurse.
    pub fn set_value(&mut self, value: f64) {
        self.value = value;
        self.adjust_values();
    }

    /// Moves the value as close to `new_value` as the bounds allow, going
    /// through the snap pipeline. This is the entry point for interactive
    /// and programmatic moves; with a degenerate domain (`max <= min`) it
    /// does nothing.
    pub fn adjust_value(&mut self, new_value: f64) {
        if self.max <= self.min {
            return;
        }
        let clamped = clamp(self.min, new_value, self.max);
        let snapped = self.snap_value_to_ticks(clamped);
        self.set_value(snapped);
    }

    /// Increments the value by the block increment (clamped).
    pub fn increment_value(&mut self) {
        self.adjust_value(self.value + self.block_increment);
    }

    /// Decrements the value by the block increment (clamped).
    pub fn decrement_value(&mut self) {
        self.adjust_value(self.value - self.block_increment);
    }

    /// Quantizes `value` to the nearest tick boundary when snapping is
    /// enabled, then re-clamps. Ties between the two bracketing ticks go to
    /// the upper one. With snapping disabled this is a plain clamp.
    pub fn snap_value_to_ticks(&self, value: f64) -> f64 {
        let mut snapped = value;
        if self.snap_to_ticks {
            let step = self.minor_step();
            let index = ((value - self.min) / step).floor();
            let lower = index * step + self.min;
            let upper = (index + 1.0) * step + self.min;
            snapped = nearest(lower, value, upper);
        }
        clamp(self.min, snapped, self.max)
    }

    /// Distance between adjacent ticks: the major unit subdivided by the
    /// minor count, or the major unit itself when there are no minors.
    pub fn minor_step(&self) -> f64 {
        if self.minor_tick_count != 0 {
            self.major_tick_unit / (f64::from(self.minor_tick_count) + 1.0)
        } else {
            self.major_tick_unit
        }
    }

    // --- angular domain

    pub fn min_angle(&self) -> f64 {
        self.min_angle
    }

    pub fn max_angle(&self) -> f64 {
        self.max_angle
    }

    /// Sets the angle where the sweep starts (degrees, 0 at top, clockwise
    /// positive). Raising it above the current `max_angle` pushes
    /// `max_angle` up to match.
    pub fn set_min_angle(&mut self, angle: f64) {
        self.min_angle = angle;
        if self.min_angle > self.max_angle {
            self.max_angle = self.min_angle;
        }
    }

    /// Sets the angle where the sweep ends. Lowering it below the current
    /// `min_angle` pulls `min_angle` down to match.
    pub fn set_max_angle(&mut self, angle: f64) {
        self.max_angle = angle;
        if self.max_angle < self.min_angle {
            self.min_angle = self.max_angle;
        }
    }

    // --- tick configuration

    pub fn major_tick_unit(&self) -> f64 {
        self.major_tick_unit
    }

    /// Sets the value distance between major ticks. Zero or negative units
    /// are rejected, never coerced.
    pub fn set_major_tick_unit(&mut self, unit: f64) -> Result<()> {
        if unit <= 0.0 {
            return Err(Error::InvalidTickUnit(unit));
        }
        self.major_tick_unit = unit;
        Ok(())
    }

    pub fn minor_tick_count(&self) -> u32 {
        self.minor_tick_count
    }

    pub fn set_minor_tick_count(&mut self, count: u32) {
        self.minor_tick_count = count;
    }

    pub fn snap_to_ticks(&self) -> bool {
        self.snap_to_ticks
    }

    pub fn set_snap_to_ticks(&mut self, snap: bool) {
        self.snap_to_ticks = snap;
    }

    pub fn block_increment(&self) -> f64 {
        self.block_increment
    }

    pub fn set_block_increment(&mut self, increment: f64) {
        self.block_increment = increment;
    }

    pub fn show_tick_marks(&self) -> bool {
        self.show_tick_marks
    }

    pub fn set_show_tick_marks(&mut self, show: bool) {
        self.show_tick_marks = show;
    }

    pub fn show_tick_labels(&self) -> bool {
        self.show_tick_labels
    }

    pub fn set_show_tick_labels(&mut self, show: bool) {
        self.show_tick_labels = show;
    }

    // --- interaction flag and labels

    /// True while an interactive drag is in progress. Set by the widget,
    /// read by external observers; has no effect on the model itself.
    pub fn is_value_changing(&self) -> bool {
        self.value_changing
    }

    pub fn set_value_changing(&mut self, changing: bool) {
        self.value_changing = changing;
    }

    pub fn label_formatter(&self) -> Option<&LabelFormatter> {
        self.label_formatter.as_ref()
    }

    pub fn set_label_formatter(&mut self, formatter: Option<LabelFormatter>) {
        self.label_formatter = formatter;
    }

    /// Formats a tick label: through the formatter when one is set,
    /// otherwise integer truncation.
    pub fn format_label(&self, tick_value: f64) -> String {
        match &self.label_formatter {
            Some(formatter) => formatter(tick_value),
            None => format!("{}", tick_value as i64),
        }
    }

    /// Clamp invariant re-run after every mutation of value/min/max.
    fn adjust_values(&mut self) {
        if self.value < self.min || self.value > self.max {
            self.value = clamp(self.min, self.value, self.max);
        }
    }
}

fn clamp(min: f64, value: f64, max: f64) -> f64 {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Picks whichever of `less`/`more` is closer to `value`; ties go to `more`.
fn nearest(less: f64, value: f64, more: f64) -> f64 {
    let less_diff = value - less;
    let more_diff = more - value;
    if less_diff < more_diff {
        less
    } else {
        more
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn new_clamps_initial_value() {
        let model = KnobModel::new(0.0, 100.0, 250.0);
        assert_eq!(model.value(), 100.0);
    }

    #[test]
    fn set_value_keeps_value_in_bounds() {
        let mut model = KnobModel::new(0.0, 100.0, 50.0);
        model.set_value(-10.0);
        assert_eq!(model.value(), 0.0);
        model.set_value(110.0);
        assert_eq!(model.value(), 100.0);
        model.set_value(42.0);
        assert_eq!(model.value(), 42.0);
    }

    #[test]
    fn shrinking_max_reclamps_value() {
        let mut model = KnobModel::new(0.0, 100.0, 80.0);
        model.set_max(60.0);
        assert_eq!(model.value(), 60.0);
        // min/max do not adjust each other
        assert_eq!(model.min(), 0.0);
    }

    #[test]
    fn raising_min_reclamps_value() {
        let mut model = KnobModel::new(0.0, 100.0, 10.0);
        model.set_min(25.0);
        assert_eq!(model.value(), 25.0);
        assert_eq!(model.max(), 100.0);
    }

    #[test]
    fn adjust_value_is_noop_on_degenerate_domain() {
        let mut model = KnobModel::new(0.0, 100.0, 50.0);
        model.set_max(-10.0);
        let before = model.value();
        model.adjust_value(25.0);
        assert_eq!(model.value(), before);
    }

    #[test]
    fn increment_clamps_at_max() {
        let mut model = KnobModel::new(0.0, 100.0, 95.0);
        model.set_block_increment(10.0);
        model.increment_value();
        assert_eq!(model.value(), 100.0);
    }

    #[test]
    fn decrement_clamps_at_min() {
        let mut model = KnobModel::new(0.0, 100.0, 5.0);
        model.set_block_increment(10.0);
        model.decrement_value();
        assert_eq!(model.value(), 0.0);
    }

    #[test]
    fn snap_picks_nearest_tick() {
        // min=0, max=100, unit=25, no minors: step 25; 55 brackets [50, 75]
        let mut model = KnobModel::new(0.0, 100.0, 0.0);
        model.set_major_tick_unit(25.0).unwrap();
        model.set_minor_tick_count(0);
        model.set_snap_to_ticks(true);
        model.adjust_value(55.0);
        assert_eq!(model.value(), 50.0);
    }

    #[test]
    fn snap_tie_goes_to_upper_tick() {
        let mut model = KnobModel::new(0.0, 100.0, 0.0);
        model.set_major_tick_unit(25.0).unwrap();
        model.set_minor_tick_count(0);
        model.set_snap_to_ticks(true);
        assert_eq!(model.snap_value_to_ticks(62.5), 75.0);
    }

    #[test]
    fn snap_lands_on_tick_grid_and_is_idempotent() {
        let mut model = KnobModel::new(0.0, 360.0, 0.0);
        model.set_major_tick_unit(90.0).unwrap();
        model.set_minor_tick_count(3);
        model.set_snap_to_ticks(true);
        let step = model.minor_step();
        assert_eq!(step, 22.5);
        for raw in [0.0, 13.0, 101.0, 359.9, 180.1] {
            let snapped = model.snap_value_to_ticks(raw);
            let k = (snapped / step).round();
            assert!((snapped - k * step).abs() < 1e-9, "off grid: {}", snapped);
            assert!((0.0..=360.0).contains(&snapped));
            assert_eq!(model.snap_value_to_ticks(snapped), snapped);
        }
    }

    #[test]
    fn snap_disabled_only_clamps() {
        let model = KnobModel::new(0.0, 100.0, 0.0);
        assert_eq!(model.snap_value_to_ticks(55.3), 55.3);
        assert_eq!(model.snap_value_to_ticks(120.0), 100.0);
    }

    #[test]
    fn tick_unit_rejects_zero_and_negative() {
        let mut model = KnobModel::default();
        assert!(matches!(
            model.set_major_tick_unit(0.0),
            Err(Error::InvalidTickUnit(_))
        ));
        assert!(matches!(
            model.set_major_tick_unit(-5.0),
            Err(Error::InvalidTickUnit(_))
        ));
        // value untouched by the failed set
        assert_eq!(model.major_tick_unit(), DEFAULT_MAJOR_TICK_UNIT);
    }

    #[test]
    fn angle_bounds_adjust_each_other() {
        let mut model = KnobModel::default();
        model.set_max_angle(-160.0);
        assert_eq!(model.min_angle(), -160.0);
        assert_eq!(model.max_angle(), -160.0);

        let mut model = KnobModel::default();
        model.set_min_angle(150.0);
        assert_eq!(model.max_angle(), 150.0);
        assert_eq!(model.min_angle(), 150.0);
    }

    #[test]
    fn angle_bounds_within_range_stay_put() {
        let mut model = KnobModel::default();
        model.set_min_angle(-90.0);
        model.set_max_angle(90.0);
        assert_eq!(model.min_angle(), -90.0);
        assert_eq!(model.max_angle(), 90.0);
    }

    #[test]
    fn default_label_is_integer_truncation() {
        let model = KnobModel::default();
        assert_eq!(model.format_label(22.5), "22");
        assert_eq!(model.format_label(90.0), "90");
    }

    #[test]
    fn custom_formatter_is_used() {
        let mut model = KnobModel::new(0.0, 360.0, 0.0);
        model.set_label_formatter(Some(Arc::new(|v| {
            if v == 0.0 {
                "N".to_string()
            } else {
                format!("{:.1}", v)
            }
        })));
        assert_eq!(model.format_label(0.0), "N");
        assert_eq!(model.format_label(90.0), "90.0");
    }

    #[test]
    fn value_changing_flag_roundtrips() {
        let mut model = KnobModel::default();
        assert!(!model.is_value_changing());
        model.set_value_changing(true);
        assert!(model.is_value_changing());
    }
}
