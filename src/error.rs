//! Unified error type for flowdial.
//!
//! We avoid `alloc` - all error variants carry only fixed-size data.
//! The pure control core has no recoverable errors (out-of-range input
//! is clamped structurally); these variants cover the device edges.

/// Top-level error type used across the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    // UI / Display
    /// The display controller did not acknowledge initialisation.
    /// Fatal: a display-less device has no degraded mode.
    DisplayInit,

    /// I²C transaction to the display failed.
    Display,

    // Storage
    /// Flash read/write/erase failed.
    Storage,
}
