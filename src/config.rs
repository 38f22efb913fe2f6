//! Application-wide constants and compile-time configuration.
//!
//! All hardware pin assignments, timing parameters, and UI defaults
//! live here so they can be tuned in one place.

use crate::clock::Millis;

// Control loop

/// Control-loop poll interval (ms). Every iteration samples the input
/// lines once and advances the timer by one tick.
pub const POLL_INTERVAL_MS: u64 = 5;

/// How long the boot splash stays on screen (ms).
pub const BOOT_SPLASH_MS: u64 = 1000;

// Input debouncing

/// Minimum spacing between two accepted encoder edges (ms).
pub const ROTARY_DEBOUNCE_MS: Millis = 150;

/// Minimum spacing between two accepted button presses (ms).
pub const BUTTON_DEBOUNCE_MS: Millis = 800;

// Timer behavior

/// Counting-tick period (ms). Both count-up and count-down advance in
/// whole minutes.
pub const COUNT_TICK_MS: Millis = 60_000;

/// Countdown setup value preselected when entering duration selection
/// (minutes).
pub const DEFAULT_COUNTDOWN_MIN: u16 = 20;

/// Lower bound for the countdown setup value (minutes).
pub const MIN_COUNTDOWN_MIN: u16 = 1;

// Inactivity policy

/// Time without accepted input before the menu blanks to the idle
/// prompt (ms).
pub const INACTIVITY_LIMIT_MS: Millis = 3 * 60_000;

/// Time spent continuously idle before the display panel is powered
/// off (ms), measured from idle entry.
pub const DISPLAY_OFF_LIMIT_MS: Millis = 30 * 60_000;

// Celebration animation

/// Frame advance period for the completion celebration (ms).
pub const CELEBRATION_FRAME_MS: Millis = 100;

// Display geometry

/// Panel width in pixels, used to center composed text.
pub const DISPLAY_WIDTH: i32 = 128;

/// Base glyph advance in pixels at text size 1. A size-n glyph is
/// `n * CHAR_WIDTH_PX` wide.
pub const CHAR_WIDTH_PX: i32 = 6;

/// Vertical position of the status line (px).
pub const TOP_ROW_Y: i32 = 0;

/// Vertical position of the value line (px).
pub const MAIN_ROW_Y: i32 = 30;

// Lightbar bridge

/// Brightness / warmth change per menu activation.
pub const LIGHTBAR_STEP: i8 = 16;

// GPIO pin assignments (nRF52840-DK defaults)
//
// These are logical names; actual `embassy_nrf::peripherals::*` types are
// selected in `main.rs`.  Adjust for your custom PCB.
//
//   Encoder CLK    → P0.11
//   Encoder DT     → P0.12
//   Encoder SW     → P0.24  (active-low, internal pull-up)
//   I²C SDA        → P0.26
//   I²C SCL        → P0.27

// Settings storage

/// Flash page index where settings storage starts (4 KB per page on
/// nRF52840).
pub const STORAGE_FLASH_PAGE_START: u32 = 240;

/// Number of flash pages reserved for settings storage.
pub const STORAGE_FLASH_PAGE_COUNT: u32 = 4;
