// SPDX-License-Identifier: MPL-2.0
//! Indicator rotation animation for non-interactive value changes.
//!
//! A programmatic value change eases the indicator from its current angle
//! to the new target over a fixed duration. Starting a new rotation while
//! one is in flight replaces it, picking up from the interpolated angle
//! (last-writer-wins, no queue). During a drag the component bypasses this
//! entirely and tracks the pointer 1:1.

use std::time::{Duration, Instant};

/// How long the indicator takes to reach a new target angle.
pub const ROTATION_DURATION: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy)]
pub struct RotationAnimation {
    from: f64,
    to: f64,
    started_at: Instant,
}

impl RotationAnimation {
    pub fn new(from: f64, to: f64, now: Instant) -> Self {
        Self {
            from,
            to,
            started_at: now,
        }
    }

    /// Replaces an in-flight animation: the new one starts wherever the old
    /// one currently is.
    pub fn retarget(&self, to: f64, now: Instant) -> Self {
        Self::new(self.angle_at(now), to, now)
    }

    /// Interpolated angle with an ease-in/out (smoothstep) curve.
    pub fn angle_at(&self, now: Instant) -> f64 {
        let elapsed = now.saturating_duration_since(self.started_at);
        if elapsed >= ROTATION_DURATION {
            return self.to;
        }
        let t = elapsed.as_secs_f64() / ROTATION_DURATION.as_secs_f64();
        let eased = t * t * (3.0 - 2.0 * t);
        self.from + (self.to - self.from) * eased
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.started_at) >= ROTATION_DURATION
    }

    pub fn target(&self) -> f64 {
        self.to
    }
}
