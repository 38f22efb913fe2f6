//! Control core for the flowdial rotary-dial flow timer.
//!
//! The pure logic modules - input debouncing ([`input`]), the timer
//! state machine ([`timer`]), frame composition ([`render`]), the
//! activity clock ([`clock`]) and the settings/lightbar bridge
//! ([`bridge`]) - have no hardware dependencies and are tested on the
//! host:
//!
//! Usage: `cargo test`
//!
//! The embedded binary uses main.rs with #![no_std] and #![no_main]
//! (feature `embedded`) and wires these modules to the encoder GPIOs,
//! the SSD1306 OLED and internal flash on an nRF52840.

#![cfg_attr(not(test), no_std)]

pub mod bridge;
pub mod clock;
pub mod config;
pub mod error;
pub mod input;
pub mod render;
pub mod storage;
pub mod timer;

#[cfg(feature = "embedded")]
pub mod ui;
