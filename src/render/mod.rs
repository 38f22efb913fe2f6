//! Frame composition and the drawing-surface boundary.
//!
//! [`compose`] is a pure function from a state snapshot to a [`Frame`]
//! value; [`draw`] pushes a frame through the [`Surface`] trait. The
//! split keeps the render step comparable by value: identical state
//! composes to an identical frame, which the tests check directly.
//!
//! The device loop calls this after every accepted transition and
//! every counting tick and never in between, so the surface only sees
//! traffic when something changed.

pub mod animation;

use core::fmt::Write;

use heapless::String;

use crate::config::{CHAR_WIDTH_PX, DISPLAY_WIDTH, MAIN_ROW_Y, TOP_ROW_Y};
use crate::timer::state::{MenuAction, State};
use animation::CelebrationFrame;

/// The drawing surface the core renders into. The core never reads
/// back from it.
pub trait Surface {
    fn clear(&mut self);
    fn set_text_size(&mut self, size: u8);
    fn set_cursor(&mut self, x: i32, y: i32);
    fn print(&mut self, text: &str);
    fn draw_circle(&mut self, cx: i32, cy: i32, radius: u32);
    /// Push the composed buffer to the panel.
    fn present(&mut self);
    /// Panel power, independent of buffer contents.
    fn set_power(&mut self, on: bool);
}

/// One positioned run of text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Line {
    pub text: String<22>,
    pub size: u8,
    pub x: i32,
    pub y: i32,
}

impl Line {
    /// Center `text` horizontally for its size. Glyph advance is
    /// `size * CHAR_WIDTH_PX`, the classic 6-pixel cell scaled up.
    fn centered(text: &str, size: u8, y: i32) -> Self {
        let width = text.len() as i32 * CHAR_WIDTH_PX * i32::from(size);
        let x = ((DISPLAY_WIDTH - width) / 2).max(0);
        let mut owned = String::new();
        // Capacity covers the longest composed line; push_str only
        // truncates if a label outgrows it.
        let _ = owned.push_str(text);
        Self {
            text: owned,
            size,
            x,
            y,
        }
    }
}

/// A complete description of what the panel should show.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Frame {
    /// Two-line layout: status on top, value below.
    Text { top: Line, main: Line },
    /// One step of the completion celebration.
    Celebration(CelebrationFrame),
}

fn two_line(top: &str, main: &str) -> Frame {
    Frame::Text {
        top: Line::centered(top, 2, TOP_ROW_Y),
        main: Line::centered(main, 4, MAIN_ROW_Y),
    }
}

/// Compose the frame for the current state.
pub fn compose(state: &State, cumulative: u32, menu: &[MenuAction]) -> Frame {
    let mut status: String<22> = String::new();
    let mut value: String<22> = String::new();

    match state {
        State::Menu { selected } => {
            let _ = write!(status, "Flow: {}", cumulative);
            let label = menu.get(*selected).copied().map(MenuAction::label).unwrap_or("");
            two_line(&status, label)
        }
        State::SelectingDownDuration { minutes } => {
            let _ = write!(value, "{}", minutes);
            two_line("Set Time", &value)
        }
        State::CountingUp { elapsed } => {
            let _ = write!(value, "{}", elapsed);
            two_line("Focus! ^", &value)
        }
        State::CountingDown { remaining, .. } => {
            let _ = write!(value, "{}", remaining);
            two_line("Focus! v", &value)
        }
        State::Idle { .. } => {
            let _ = write!(status, "Flow: {}", cumulative);
            two_line(&status, "IDLE?")
        }
        State::Celebration { frame } => Frame::Celebration(animation::frame(*frame)),
    }
}

/// The boot splash shown before the first menu frame.
pub fn splash() -> Frame {
    Frame::Text {
        top: Line::centered("flowdial", 2, MAIN_ROW_Y),
        main: Line::centered("", 4, MAIN_ROW_Y),
    }
}

/// Put a frame on the surface.
pub fn draw<S: Surface>(frame: &Frame, surface: &mut S) {
    match frame {
        Frame::Text { top, main } => {
            surface.clear();
            draw_line(top, surface);
            draw_line(main, surface);
            surface.present();
        }
        Frame::Celebration(step) => animation::draw(step, surface),
    }
}

fn draw_line<S: Surface>(line: &Line, surface: &mut S) {
    if line.text.is_empty() {
        return;
    }
    surface.set_text_size(line.size);
    surface.set_cursor(line.x, line.y);
    surface.print(&line.text);
}

#[cfg(test)]
mod tests {
    use super::animation::{CelebrationFrame, BANNER_FRAMES, FRAME_COUNT, RING_FRAMES};
    use super::*;
    use crate::timer::state::CORE_MENU;

    /// Captures surface calls so two draws can be compared op-by-op.
    #[derive(Default, PartialEq, Debug)]
    struct RecordingSurface {
        ops: Vec<Op>,
    }

    #[derive(Clone, PartialEq, Debug)]
    enum Op {
        Clear,
        TextSize(u8),
        Cursor(i32, i32),
        Print(std::string::String),
        Circle(i32, i32, u32),
        Present,
        Power(bool),
    }

    impl Surface for RecordingSurface {
        fn clear(&mut self) {
            self.ops.push(Op::Clear);
        }
        fn set_text_size(&mut self, size: u8) {
            self.ops.push(Op::TextSize(size));
        }
        fn set_cursor(&mut self, x: i32, y: i32) {
            self.ops.push(Op::Cursor(x, y));
        }
        fn print(&mut self, text: &str) {
            self.ops.push(Op::Print(text.into()));
        }
        fn draw_circle(&mut self, cx: i32, cy: i32, radius: u32) {
            self.ops.push(Op::Circle(cx, cy, radius));
        }
        fn present(&mut self) {
            self.ops.push(Op::Present);
        }
        fn set_power(&mut self, on: bool) {
            self.ops.push(Op::Power(on));
        }
    }

    #[test]
    fn compose_is_idempotent() {
        let state = State::Menu { selected: 1 };
        let first = compose(&state, 42, CORE_MENU);
        let second = compose(&state, 42, CORE_MENU);
        assert_eq!(first, second);

        let mut a = RecordingSurface::default();
        let mut b = RecordingSurface::default();
        draw(&first, &mut a);
        draw(&second, &mut b);
        assert_eq!(a, b);
    }

    #[test]
    fn menu_frame_shows_total_and_selected_label() {
        let frame = compose(&State::Menu { selected: 2 }, 17, CORE_MENU);
        let Frame::Text { top, main } = frame else {
            panic!("menu should compose a text frame");
        };
        assert_eq!(top.text.as_str(), "Flow: 17");
        assert_eq!(top.size, 2);
        assert_eq!(main.text.as_str(), "Reset");
        assert_eq!(main.size, 4);
    }

    #[test]
    fn lines_are_centered_for_their_size() {
        let frame = compose(&State::CountingUp { elapsed: 7 }, 0, CORE_MENU);
        let Frame::Text { top, main } = frame else {
            panic!("counting should compose a text frame");
        };
        // "Focus! ^" is 8 glyphs of 12 px; "7" is 1 glyph of 24 px.
        assert_eq!(top.x, (128 - 8 * 12) / 2);
        assert_eq!(main.x, (128 - 24) / 2);
    }

    #[test]
    fn countdown_frame_shows_remaining_minutes() {
        let state = State::CountingDown {
            remaining: 13,
            initial: 20,
        };
        let Frame::Text { top, main } = compose(&state, 0, CORE_MENU) else {
            panic!("countdown should compose a text frame");
        };
        assert_eq!(top.text.as_str(), "Focus! v");
        assert_eq!(main.text.as_str(), "13");
    }

    #[test]
    fn idle_frame_keeps_the_running_total_visible() {
        let Frame::Text { top, main } = compose(&State::Idle { since: 0 }, 99, CORE_MENU) else {
            panic!("idle should compose a text frame");
        };
        assert_eq!(top.text.as_str(), "Flow: 99");
        assert_eq!(main.text.as_str(), "IDLE?");
    }

    #[test]
    fn celebration_rings_grow_then_banner_then_blank() {
        assert_eq!(
            animation::frame(0),
            CelebrationFrame::Ring {
                radius: 2,
                wipe: false
            }
        );
        assert_eq!(
            animation::frame(1),
            CelebrationFrame::Ring {
                radius: 4,
                wipe: true
            }
        );
        assert_eq!(
            animation::frame(RING_FRAMES - 1),
            CelebrationFrame::Ring {
                radius: 30,
                wipe: false
            }
        );
        assert_eq!(animation::frame(RING_FRAMES), CelebrationFrame::Banner);
        assert_eq!(
            animation::frame(RING_FRAMES + BANNER_FRAMES - 1),
            CelebrationFrame::Banner
        );
        assert_eq!(animation::frame(FRAME_COUNT - 1), CelebrationFrame::Blank);
    }

    #[test]
    fn banner_frame_draws_the_success_text() {
        let mut surface = RecordingSurface::default();
        draw(
            &Frame::Celebration(CelebrationFrame::Banner),
            &mut surface,
        );
        assert!(surface.ops.contains(&Op::Print("SUCCESS!".into())));
        assert_eq!(surface.ops.last(), Some(&Op::Present));
    }

    #[test]
    fn wipe_ring_clears_after_presenting() {
        let mut surface = RecordingSurface::default();
        draw(
            &Frame::Celebration(CelebrationFrame::Ring {
                radius: 4,
                wipe: true,
            }),
            &mut surface,
        );
        assert_eq!(
            surface.ops,
            vec![
                Op::Circle(64, 32, 4),
                Op::Present,
                Op::Clear,
                Op::Present
            ]
        );
    }
}
