// SPDX-License-Identifier: MPL-2.0
//! Pointer-to-value and value-to-angle math, plus tick-mark layout.
//!
//! Angles are in degrees, measured from the top of the dial (12 o'clock),
//! clockwise positive. All functions are pure; the canvas layer feeds them
//! cursor positions relative to the widget bounds.

use super::model::KnobModel;

/// A single graduation mark on the dial.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    /// The tick's value on the `i * step` grid.
    pub value: f64,
    /// Angular position in degrees (0 at top, clockwise).
    pub angle: f64,
    pub is_major: bool,
}

/// Fraction of the domain the current value sits at, in `[0, 1]`.
/// A degenerate domain maps to 0.
pub fn value_fraction(model: &KnobModel) -> f64 {
    let span = model.max() - model.min();
    if span <= 0.0 {
        0.0
    } else {
        (model.value() - model.min()) / span
    }
}

/// Angle of the indicator for a given value.
pub fn value_to_angle(model: &KnobModel, value: f64) -> f64 {
    let span = model.max() - model.min();
    if span <= 0.0 {
        return model.min_angle();
    }
    let fraction = (value - model.min()) / span;
    model.min_angle() + (model.max_angle() - model.min_angle()) * fraction
}

/// Fraction of the angular sweep a pointer position corresponds to.
///
/// Reconstructs a 0°-at-top clockwise angle from the two-quadrant
/// arctangent: points left of center get `-90 + atan`, points right of
/// center `90 + atan`. The result is not clamped; callers feed it through
/// the model's clamp pipeline. `None` when the pointer sits exactly on the
/// center or the angular sweep is empty.
pub fn pointer_fraction(model: &KnobModel, x: f64, y: f64, width: f64, height: f64) -> Option<f64> {
    let cx = width / 2.0;
    let cy = height / 2.0;
    let dx = x - cx;
    let dy = y - cy;
    if dx == 0.0 && dy == 0.0 {
        return None;
    }
    let sweep = model.max_angle() - model.min_angle();
    if sweep == 0.0 {
        return None;
    }
    let mouse_angle = (dy / dx).atan().to_degrees();
    let top_zero_angle = if x < cx {
        -90.0 + mouse_angle
    } else {
        90.0 + mouse_angle
    };
    Some((top_zero_angle - model.min_angle()) / sweep)
}

/// Maps a pointer position straight to a domain value:
/// `min + fraction * (max - min)`.
pub fn pointer_to_value(model: &KnobModel, x: f64, y: f64, width: f64, height: f64) -> Option<f64> {
    pointer_fraction(model, x, y, width, height).map(|fraction| fraction_to_value(model, fraction))
}

/// Scales an angular fraction into the value domain.
pub fn fraction_to_value(model: &KnobModel, fraction: f64) -> f64 {
    model.min() + fraction * (model.max() - model.min())
}

/// Lays out every tick on the dial. Tick `i` sits at value `i * step`
/// where `step` is the minor step; it is major exactly when `i` is a
/// multiple of `minor_tick_count + 1` (integer test, equivalent to the
/// float-modulo classification but stable at domain boundaries).
pub fn tick_layout(model: &KnobModel) -> Vec<Tick> {
    let span = model.max() - model.min();
    if span <= 0.0 {
        return Vec::new();
    }

    let num_major = (span / model.major_tick_unit()).floor() as u32 + 1;
    let num_minor = (num_major - 1) * model.minor_tick_count();
    let total = num_major + num_minor;
    let step = model.minor_step();
    let major_every = model.minor_tick_count() + 1;

    (0..total)
        .map(|i| {
            let value = f64::from(i) * step;
            Tick {
                value,
                angle: value_to_angle(model, value),
                is_major: i % major_every == 0,
            }
        })
        .collect()
}
