//! Settings storage.
//!
//! [`RamSettings`] is the plain in-memory store used on the host and in
//! tests. On the device, [`FlashSettings`] keeps the same two bytes in
//! internal flash via the `sequential-storage` crate so brightness and
//! temperature survive power cycles; the flash pages are managed by
//! `sequential-storage`, which handles wear levelling and GC.

use crate::bridge::SettingsStore;

/// Factory default for both brightness and temperature: mid-scale.
pub const SETTINGS_DEFAULT: u8 = 128;

/// Volatile settings store.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RamSettings {
    brightness: u8,
    temperature: u8,
}

impl RamSettings {
    pub const fn new(brightness: u8, temperature: u8) -> Self {
        Self {
            brightness,
            temperature,
        }
    }
}

impl Default for RamSettings {
    fn default() -> Self {
        Self::new(SETTINGS_DEFAULT, SETTINGS_DEFAULT)
    }
}

impl SettingsStore for RamSettings {
    fn brightness(&self) -> u8 {
        self.brightness
    }
    fn temperature(&self) -> u8 {
        self.temperature
    }
    fn set_brightness(&mut self, value: u8) {
        self.brightness = value;
    }
    fn set_temperature(&mut self, value: u8) {
        self.temperature = value;
    }
}

#[cfg(feature = "embedded")]
mod flash {
    use defmt::{debug, error, info};

    use super::{RamSettings, SETTINGS_DEFAULT};
    use crate::bridge::SettingsStore;
    use crate::config::{STORAGE_FLASH_PAGE_COUNT, STORAGE_FLASH_PAGE_START};

    /// Flash page size for nRF52840 (4 KB).
    const FLASH_PAGE_SIZE: u32 = 4096;

    /// Start address of our storage region.
    const STORAGE_START: u32 = STORAGE_FLASH_PAGE_START * FLASH_PAGE_SIZE;

    /// End address (exclusive) of our storage region.
    const STORAGE_END: u32 =
        (STORAGE_FLASH_PAGE_START + STORAGE_FLASH_PAGE_COUNT) * FLASH_PAGE_SIZE;

    /// Key for the settings record in the map storage.
    const KEY_SETTINGS: u8 = 0x01;

    /// Working buffer size for map items; the record is two bytes.
    const MAX_RECORD_SIZE: usize = 16;

    /// Flash-backed settings: an in-memory cache synced on demand.
    pub struct FlashSettings {
        cached: RamSettings,
        /// True if the cache differs from flash.
        dirty: bool,
    }

    impl FlashSettings {
        pub const fn new() -> Self {
            Self {
                cached: RamSettings::new(SETTINGS_DEFAULT, SETTINGS_DEFAULT),
                dirty: false,
            }
        }

        /// Async load from flash using sequential-storage.
        pub async fn load(
            &mut self,
            flash: &mut impl embedded_storage_async::nor_flash::NorFlash,
        ) {
            let flash_range = STORAGE_START..STORAGE_END;
            let mut buf = [0u8; MAX_RECORD_SIZE];

            match sequential_storage::map::fetch_item::<u8, &[u8], _>(
                flash,
                flash_range,
                &mut sequential_storage::cache::NoCache::new(),
                &mut buf,
                &KEY_SETTINGS,
            )
            .await
            {
                Ok(Some(data)) if data.len() >= 2 => {
                    self.cached = RamSettings::new(data[0], data[1]);
                    info!(
                        "Loaded settings from flash: brightness={} temperature={}",
                        data[0], data[1]
                    );
                }
                Ok(_) => {
                    info!("No settings in flash - using defaults");
                    self.cached = RamSettings::new(SETTINGS_DEFAULT, SETTINGS_DEFAULT);
                }
                Err(e) => {
                    error!("Flash read error: {:?}", defmt::Debug2Format(&e));
                }
            }
            self.dirty = false;
        }

        /// Persist the settings record if it changed.
        pub async fn save(
            &mut self,
            flash: &mut impl embedded_storage_async::nor_flash::NorFlash,
        ) {
            if !self.dirty {
                debug!("FlashSettings: no changes to save");
                return;
            }

            let flash_range = STORAGE_START..STORAGE_END;
            let mut buf = [0u8; MAX_RECORD_SIZE];
            let record = [self.cached.brightness(), self.cached.temperature()];
            let item: &[u8] = &record;

            match sequential_storage::map::store_item::<u8, &[u8], _>(
                flash,
                flash_range,
                &mut sequential_storage::cache::NoCache::new(),
                &mut buf,
                &KEY_SETTINGS,
                &item,
            )
            .await
            {
                Ok(_) => {
                    info!("Saved settings to flash");
                    self.dirty = false;
                }
                Err(e) => {
                    error!("Flash write error: {:?}", defmt::Debug2Format(&e));
                }
            }
        }
    }

    impl SettingsStore for FlashSettings {
        fn brightness(&self) -> u8 {
            self.cached.brightness()
        }
        fn temperature(&self) -> u8 {
            self.cached.temperature()
        }
        fn set_brightness(&mut self, value: u8) {
            self.cached.set_brightness(value);
            self.dirty = true;
        }
        fn set_temperature(&mut self, value: u8) {
            self.cached.set_temperature(value);
            self.dirty = true;
        }
    }
}

#[cfg(feature = "embedded")]
pub use flash::FlashSettings;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ram_settings_default_to_mid_scale() {
        let settings = RamSettings::default();
        assert_eq!(settings.brightness(), SETTINGS_DEFAULT);
        assert_eq!(settings.temperature(), SETTINGS_DEFAULT);
    }

    #[test]
    fn ram_settings_store_what_was_set() {
        let mut settings = RamSettings::default();
        settings.set_brightness(10);
        settings.set_temperature(200);
        assert_eq!(settings.brightness(), 10);
        assert_eq!(settings.temperature(), 200);
    }
}
