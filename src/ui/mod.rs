//! Device-side user interface plumbing.
//!
//! The control core draws through the [`crate::render::Surface`]
//! trait; this module provides the SSD1306-backed implementation used
//! on the real hardware.

pub mod display;
