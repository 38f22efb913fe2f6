//! Completion celebration playback.
//!
//! Expanding rings followed by a fixed-duration banner, described as a
//! frame sequence so the ordinary tick loop can drive it. Each step is
//! self-contained: given a step index, [`frame`] says what to put on
//! the surface, and the controller advances the index once per
//! [`crate::config::CELEBRATION_FRAME_MS`].

use super::Surface;

/// Ring steps: radius 2..=30 in steps of 2.
pub const RING_FRAMES: u8 = 15;

/// Banner steps: one second at the frame period.
pub const BANNER_FRAMES: u8 = 10;

/// Total playback length, including the final blank restore.
pub const FRAME_COUNT: u8 = RING_FRAMES + BANNER_FRAMES + 1;

const CENTER_X: i32 = 64;
const CENTER_Y: i32 = 32;

/// One step of the celebration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CelebrationFrame {
    /// Draw one ring; `wipe` clears the canvas again after presenting,
    /// giving the pulsing effect.
    Ring { radius: u32, wipe: bool },
    /// The SUCCESS! banner.
    Banner,
    /// Blank restore before returning to the menu.
    Blank,
}

/// Map a step index to its frame. Steps at or past the end are blank.
pub fn frame(step: u8) -> CelebrationFrame {
    if step < RING_FRAMES {
        let radius = 2 + 2 * u32::from(step);
        CelebrationFrame::Ring {
            radius,
            wipe: radius % 4 == 0,
        }
    } else if step < RING_FRAMES + BANNER_FRAMES {
        CelebrationFrame::Banner
    } else {
        CelebrationFrame::Blank
    }
}

/// Put one celebration frame on the surface. Rings accumulate on the
/// canvas between wipes, so this never clears before drawing.
pub fn draw<S: Surface>(frame: &CelebrationFrame, surface: &mut S) {
    match *frame {
        CelebrationFrame::Ring { radius, wipe } => {
            surface.draw_circle(CENTER_X, CENTER_Y, radius);
            surface.present();
            if wipe {
                surface.clear();
                surface.present();
            }
        }
        CelebrationFrame::Banner => {
            surface.clear();
            surface.set_text_size(2);
            surface.set_cursor(20, 20);
            surface.print("SUCCESS!");
            surface.present();
        }
        CelebrationFrame::Blank => {
            surface.clear();
            surface.present();
        }
    }
}
