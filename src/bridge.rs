//! Settings store and lightbar pass-through.
//!
//! The timer core never talks to the lightbar or the settings store
//! directly; it emits a [`LightbarCommand`] from the dedicated menu
//! entries and this bridge interprets it against the two collaborators.
//! Brightness and warmth levels are owned by the settings store (it is
//! backed by non-volatile storage on the device); the bridge steps the
//! stored value and forwards the new level to the peripheral.

/// Command produced by activating a lightbar menu entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LightbarCommand {
    TogglePower,
    StepBrightness(i8),
    StepWarmth(i8),
}

/// Persistent brightness/temperature settings, byte-valued.
pub trait SettingsStore {
    fn brightness(&self) -> u8;
    fn temperature(&self) -> u8;
    fn set_brightness(&mut self, value: u8);
    fn set_temperature(&mut self, value: u8);
}

/// The lightbar peripheral controller.
pub trait Lightbar {
    fn set_power(&mut self, on: bool);
    fn set_brightness(&mut self, level: u8);
    fn set_warmth(&mut self, level: u8);
}

/// Applies [`LightbarCommand`]s, latching the on/off state.
#[derive(Debug, Default)]
pub struct Bridge {
    lightbar_on: bool,
}

impl Bridge {
    pub fn new() -> Self {
        Self { lightbar_on: false }
    }

    /// Whether the lightbar is currently commanded on.
    pub fn lightbar_on(&self) -> bool {
        self.lightbar_on
    }

    pub fn apply<S, L>(&mut self, command: LightbarCommand, settings: &mut S, lightbar: &mut L)
    where
        S: SettingsStore,
        L: Lightbar,
    {
        match command {
            LightbarCommand::TogglePower => {
                self.lightbar_on = !self.lightbar_on;
                lightbar.set_power(self.lightbar_on);
            }
            LightbarCommand::StepBrightness(delta) => {
                let level = settings.brightness().saturating_add_signed(delta);
                settings.set_brightness(level);
                lightbar.set_brightness(level);
            }
            LightbarCommand::StepWarmth(delta) => {
                let level = settings.temperature().saturating_add_signed(delta);
                settings.set_temperature(level);
                lightbar.set_warmth(level);
            }
        }
    }
}
