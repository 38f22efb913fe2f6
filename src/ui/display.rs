//! SSD1306 OLED drawing surface.

use embedded_graphics::mono_font::ascii::{FONT_10X20, FONT_6X10, FONT_9X18_BOLD};
use embedded_graphics::mono_font::{MonoFont, MonoTextStyleBuilder};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Circle, PrimitiveStyle};
use embedded_graphics::text::{Baseline, Text};
use ssd1306::mode::BufferedGraphicsMode;
use ssd1306::prelude::*;
use ssd1306::I2CDisplayInterface;
use ssd1306::Ssd1306;

use crate::error::Error;
use crate::render::Surface;

/// Type alias for the concrete display driver.
///
/// Generic over the I²C implementation so callers pass in their HAL's
/// I²C peripheral.
pub type Oled<I2C> =
    Ssd1306<I2CInterface<I2C>, DisplaySize128x64, BufferedGraphicsMode<DisplaySize128x64>>;

/// [`Surface`] implementation over the buffered SSD1306 driver.
///
/// Text size and cursor are latched between calls, mirroring the
/// classic set-then-print drawing model the composer targets.
pub struct OledSurface<I2C> {
    display: Oled<I2C>,
    text_size: u8,
    cursor: Point,
}

/// Initialise the SSD1306 display and clear the screen.
pub fn init<I2C>(i2c: I2C) -> Result<OledSurface<I2C>, Error>
where
    I2C: embedded_hal::i2c::I2c,
{
    let interface = I2CDisplayInterface::new(i2c);
    let mut display = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
        .into_buffered_graphics_mode();
    display.init().map_err(|_| Error::DisplayInit)?;
    display.clear_buffer();
    display.flush().map_err(|_| Error::DisplayInit)?;
    Ok(OledSurface {
        display,
        text_size: 1,
        cursor: Point::zero(),
    })
}

/// Nearest mono font for a nominal 6-pixel-cell text size.
fn font_for(size: u8) -> &'static MonoFont<'static> {
    match size {
        0 | 1 => &FONT_6X10,
        2 | 3 => &FONT_9X18_BOLD,
        _ => &FONT_10X20,
    }
}

impl<I2C> Surface for OledSurface<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    fn clear(&mut self) {
        self.display.clear_buffer();
    }

    fn set_text_size(&mut self, size: u8) {
        self.text_size = size;
    }

    fn set_cursor(&mut self, x: i32, y: i32) {
        self.cursor = Point::new(x, y);
    }

    fn print(&mut self, text: &str) {
        let style = MonoTextStyleBuilder::new()
            .font(font_for(self.text_size))
            .text_color(BinaryColor::On)
            .build();
        let _ = Text::with_baseline(text, self.cursor, style, Baseline::Top).draw(&mut self.display);
    }

    fn draw_circle(&mut self, cx: i32, cy: i32, radius: u32) {
        let _ = Circle::with_center(Point::new(cx, cy), radius * 2)
            .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
            .draw(&mut self.display);
    }

    fn present(&mut self) {
        if self.display.flush().is_err() {
            defmt::warn!("Display flush failed");
        }
    }

    fn set_power(&mut self, on: bool) {
        let _ = self.display.set_display_on(on);
    }
}
