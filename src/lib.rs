// SPDX-License-Identifier: MPL-2.0
//! `iced_knob` is a rotary knob (round slider) control for the Iced GUI
//! framework, bundled with a compass demo application.
//!
//! The [`knob`] module holds the reusable component: a value model with
//! optional snap-to-ticks quantization, value/angle mapping, pointer
//! interaction, and an eased indicator animation. The rest of the crate is
//! the demo shell: config persistence and the compass screen.

#![doc(html_root_url = "https://docs.rs/iced_knob/0.1.0")]

pub mod app;
pub mod config;
pub mod error;
pub mod knob;
pub mod ui;
