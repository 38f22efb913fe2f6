//! Debounced input reader for the rotary encoder and its push button.
//!
//! The reader is polled once per control-loop iteration with the raw
//! line levels and the current millisecond clock. It reports at most
//! one rotation step and one click per poll; a second edge landing in
//! the same poll window is dropped, not queued. The device has no
//! real-time requirement beyond perceptible UI responsiveness, so a
//! queue would only add latency jitter.
//!
//! All debounce state (previous clock level, last accepted edge times)
//! lives in explicit fields, so the reader is unit-testable with
//! injected line-level sequences.

use crate::clock::{elapsed_since, Millis};
use crate::config::{BUTTON_DEBOUNCE_MS, ROTARY_DEBOUNCE_MS};

/// Raw levels of the three input lines, sampled in one poll.
/// `true` is electrically high.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LineSample {
    /// Encoder clock line (A).
    pub clock: bool,
    /// Encoder data line (B).
    pub data: bool,
    /// Push button line, active-low with pull-up.
    pub button: bool,
}

/// Clean events produced by one poll: at most one of each.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InputEvents {
    /// -1, 0 or +1 detent steps.
    pub rotation: i8,
    /// One accepted button press.
    pub click: bool,
}

impl InputEvents {
    /// Whether this poll produced any recognized input.
    pub fn any(&self) -> bool {
        self.rotation != 0 || self.click
    }
}

/// Quadrature decoder over the encoder clock/data pair.
///
/// A high-to-low transition on the clock line is a candidate detent;
/// it is accepted when at least [`ROTARY_DEBOUNCE_MS`] has passed since
/// the previous accepted edge. Direction comes from the data line at
/// the accepted edge. The sign convention (`data != clock` is +1) is a
/// wiring calibration constant.
#[derive(Clone, Copy, Debug)]
pub struct RotaryDecoder {
    prev_clock: bool,
    last_edge: Millis,
}

impl RotaryDecoder {
    /// Seed the previous clock level from the line's current state so
    /// a level already low at boot does not register as an edge.
    pub fn new(initial_clock: bool, now: Millis) -> Self {
        Self {
            prev_clock: initial_clock,
            last_edge: now,
        }
    }

    /// Feed one sample; returns -1, 0 or +1 detent steps.
    pub fn update(&mut self, clock: bool, data: bool, now: Millis) -> i8 {
        let falling = self.prev_clock && !clock;
        self.prev_clock = clock;

        if !falling || elapsed_since(now, self.last_edge) < ROTARY_DEBOUNCE_MS {
            return 0;
        }

        self.last_edge = now;
        if data != clock {
            1
        } else {
            -1
        }
    }
}

/// Debounced press detector for the active-low push button.
///
/// A low level is accepted as a press when at least
/// [`BUTTON_DEBOUNCE_MS`] has passed since the previous accepted
/// press. Holding the button therefore repeats at the debounce period,
/// matching the physical device.
#[derive(Clone, Copy, Debug)]
pub struct ClickDetector {
    last_press: Millis,
}

impl ClickDetector {
    pub fn new(now: Millis) -> Self {
        Self { last_press: now }
    }

    /// Feed one sample of the raw button level (`true` = high = released).
    pub fn update(&mut self, level: bool, now: Millis) -> bool {
        let pressed = !level;
        if !pressed || elapsed_since(now, self.last_press) < BUTTON_DEBOUNCE_MS {
            return false;
        }

        self.last_press = now;
        true
    }
}

/// The complete input front-end: one rotary decoder plus one click
/// detector, polled together.
#[derive(Clone, Copy, Debug)]
pub struct InputReader {
    rotary: RotaryDecoder,
    click: ClickDetector,
}

impl InputReader {
    /// `initial` must be a fresh sample of the lines at construction
    /// time so the decoder does not see a phantom first edge.
    pub fn new(initial: LineSample, now: Millis) -> Self {
        Self {
            rotary: RotaryDecoder::new(initial.clock, now),
            click: ClickDetector::new(now),
        }
    }

    /// Process one sample of all three lines.
    pub fn poll(&mut self, sample: LineSample, now: Millis) -> InputEvents {
        InputEvents {
            rotation: self.rotary.update(sample.clock, sample.data, now),
            click: self.click.update(sample.button, now),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn high() -> LineSample {
        LineSample {
            clock: true,
            data: true,
            button: true,
        }
    }

    #[test]
    fn rotation_requires_falling_clock_edge() {
        let mut dec = RotaryDecoder::new(true, 0);
        // Level held high: nothing.
        assert_eq!(dec.update(true, true, 1000), 0);
        // Falling edge with data high: clockwise.
        assert_eq!(dec.update(false, true, 1010), 1);
        // Level held low: no further event.
        assert_eq!(dec.update(false, true, 1020), 0);
    }

    #[test]
    fn rotation_direction_from_data_line() {
        let mut dec = RotaryDecoder::new(true, 0);
        assert_eq!(dec.update(false, true, 1000), 1);

        let mut dec = RotaryDecoder::new(true, 0);
        assert_eq!(dec.update(false, false, 1000), -1);
    }

    #[test]
    fn rotation_edges_inside_debounce_window_are_dropped() {
        let mut dec = RotaryDecoder::new(true, 0);
        assert_eq!(dec.update(false, true, 1000), 1);

        // Bounce: re-arm and fall again 40 ms later.
        assert_eq!(dec.update(true, true, 1020), 0);
        assert_eq!(dec.update(false, true, 1040), 0);

        // Past the window the next detent counts.
        assert_eq!(dec.update(true, true, 1100), 0);
        assert_eq!(dec.update(false, true, 1160), 1);
    }

    #[test]
    fn rotation_debounce_survives_clock_wraparound() {
        let mut dec = RotaryDecoder::new(true, u32::MAX - 50);
        // 50 ms after construction, still inside the window.
        assert_eq!(dec.update(false, true, u32::MAX), 0);
        // 250 ms after construction, past the wrap.
        assert_eq!(dec.update(true, true, 150), 0);
        assert_eq!(dec.update(false, true, 200), 1);
    }

    #[test]
    fn click_is_active_low_and_debounced() {
        let mut det = ClickDetector::new(0);
        assert!(!det.update(true, 1000));
        assert!(det.update(false, 1000));
        // Held down: repeat only after the debounce period.
        assert!(!det.update(false, 1400));
        assert!(det.update(false, 1800));
    }

    #[test]
    fn reader_reports_at_most_one_event_of_each_kind() {
        let mut reader = InputReader::new(high(), 0);

        let events = reader.poll(
            LineSample {
                clock: false,
                data: true,
                button: false,
            },
            1000,
        );
        assert_eq!(events.rotation, 1);
        assert!(events.click);
        assert!(events.any());

        // Same levels on the very next poll: everything debounced away.
        let events = reader.poll(
            LineSample {
                clock: false,
                data: true,
                button: false,
            },
            1005,
        );
        assert_eq!(events.rotation, 0);
        assert!(!events.click);
        assert!(!events.any());
    }

    #[test]
    fn reader_is_quiet_right_after_construction() {
        // A line already low at boot is not an edge.
        let mut reader = InputReader::new(
            LineSample {
                clock: false,
                data: true,
                button: true,
            },
            0,
        );
        let events = reader.poll(
            LineSample {
                clock: false,
                data: true,
                button: true,
            },
            5,
        );
        assert!(!events.any());
    }
}
