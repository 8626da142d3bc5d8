// SPDX-License-Identifier: MPL-2.0
//! Press/drag/release state machine for the knob canvas.
//!
//! Lives as the canvas widget's per-instance state: transient, reset on
//! every press/release cycle, never part of the model. A press captures the
//! fractional offset between the value and the pointer so a drag preserves
//! the grab point instead of jumping the value to the pointer.

use iced::Point;

/// Movement below this many pixels in both axes counts as a click, not a
/// drag.
pub const CLICK_THRESHOLD: f32 = 3.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    Pressed,
    Dragging,
}

#[derive(Debug, Clone, Default)]
pub struct Interaction {
    phase: Phase,
    press_position: Point,
    /// Fraction offset between the value at press time and the pointer's
    /// implied fraction at press time.
    drag_offset: f64,
}

/// Outcome of a release: either a discrete click or the end of a drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Release {
    Click,
    DragEnd,
}

impl Interaction {
    /// Pointer pressed: record the grab point and its offset.
    pub fn press(&mut self, position: Point, drag_offset: f64) {
        self.phase = Phase::Pressed;
        self.press_position = position;
        self.drag_offset = drag_offset;
    }

    /// Pointer moved while the button is held. Returns the captured offset
    /// to add to the pointer's fraction; `None` when no press is active.
    pub fn drag_to(&mut self, position: Point) -> Option<f64> {
        match self.phase {
            Phase::Idle => None,
            Phase::Pressed | Phase::Dragging => {
                if !is_click_distance(self.press_position, position) {
                    self.phase = Phase::Dragging;
                }
                Some(self.drag_offset)
            }
        }
    }

    /// Pointer released. Resets to idle and reports whether the whole
    /// gesture stayed within the click threshold.
    pub fn release(&mut self, position: Point) -> Option<Release> {
        if self.phase == Phase::Idle {
            return None;
        }
        let was_click = is_click_distance(self.press_position, position);
        *self = Self::default();
        Some(if was_click {
            Release::Click
        } else {
            Release::DragEnd
        })
    }

    /// Abandon the gesture without a click (pointer left the widget).
    pub fn cancel(&mut self) -> bool {
        let was_engaged = self.phase != Phase::Idle;
        *self = Self::default();
        was_engaged
    }

    pub fn is_engaged(&self) -> bool {
        self.phase != Phase::Idle
    }

    pub fn is_dragging(&self) -> bool {
        self.phase == Phase::Dragging
    }
}

fn is_click_distance(from: Point, to: Point) -> bool {
    (to.x - from.x).abs() < CLICK_THRESHOLD && (to.y - from.y).abs() < CLICK_THRESHOLD
}
