// SPDX-License-Identifier: MPL-2.0
//! Plain style configuration for the knob.
//!
//! Replaces the stylesheet machinery of the original control with a struct
//! of colors: every field the old CSS exposed is settable here, with
//! defaults drawn from the design tokens. Label sizes are ratios of the
//! knob's side, fixed in the renderer.

use crate::ui::design_tokens::palette;
use iced::{Color, Font};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Style {
    /// Outermost decorative ring.
    pub outer_ring: Color,
    /// Thin frames between the outer ring and the rotating body.
    pub frame: Color,
    /// The rotating inner body of the knob.
    pub inner_ring: Color,
    /// The indicator dot riding on the inner ring.
    pub indicator: Color,
    pub tick_mark_color: Color,
    pub tick_label_color: Color,
    pub tick_label_font: Font,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            outer_ring: palette::GRAY_700,
            frame: palette::GRAY_900,
            inner_ring: palette::GRAY_400,
            indicator: palette::PRIMARY_400,
            tick_mark_color: palette::GRAY_100,
            tick_label_color: palette::GRAY_200,
            tick_label_font: Font::DEFAULT,
        }
    }
}
