//! The menu / count-up / count-down / idle controller.
//!
//! One [`FlowTimer::tick`] call per control-loop iteration. Within a
//! tick the order is fixed: input is applied first, then the counting
//! tick, then the celebration playback, then the inactivity policy,
//! so a click that stops a timer always beats a timeout that would
//! have fired in the same iteration.
//!
//! The controller owns every piece of shared state (current state,
//! totals, tick timestamps) and mutates it only from within a tick; no
//! synchronization is needed anywhere in the core.

pub mod state;


pub use state::{MenuAction, State, CORE_MENU, EXTENDED_MENU};

use crate::bridge::LightbarCommand;
use crate::clock::{elapsed_since, ActivityClock, Millis};
use crate::config::{
    CELEBRATION_FRAME_MS, COUNT_TICK_MS, DEFAULT_COUNTDOWN_MIN, DISPLAY_OFF_LIMIT_MS,
    INACTIVITY_LIMIT_MS, LIGHTBAR_STEP, MIN_COUNTDOWN_MIN,
};
use crate::input::InputEvents;
use crate::render::animation;

/// What the device loop must do after a tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickResult {
    /// A transition or counting tick occurred: recompose and present.
    pub redraw: bool,
    /// Display panel power changed; apply to the surface.
    pub display_power: Option<bool>,
    /// A lightbar menu entry was activated; hand to the bridge.
    pub lightbar: Option<LightbarCommand>,
}

/// The timer state machine.
pub struct FlowTimer {
    state: State,
    cumulative: u32,
    menu: &'static [MenuAction],
    activity: ActivityClock,
    last_count_tick: Millis,
    last_frame_step: Millis,
    display_on: bool,
}

impl FlowTimer {
    /// Controller with the timer-only menu.
    pub fn new(now: Millis) -> Self {
        Self::with_menu(CORE_MENU, now)
    }

    /// Controller with a caller-chosen menu table.
    pub fn with_menu(menu: &'static [MenuAction], now: Millis) -> Self {
        Self {
            state: State::Menu { selected: 0 },
            cumulative: 0,
            menu,
            activity: ActivityClock::new(now),
            last_count_tick: now,
            last_frame_step: now,
            display_on: true,
        }
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    /// Flow minutes recorded across all completed sessions since the
    /// last reset.
    pub fn cumulative_minutes(&self) -> u32 {
        self.cumulative
    }

    pub fn menu(&self) -> &'static [MenuAction] {
        self.menu
    }

    /// Whether the panel is currently commanded on.
    pub fn display_on(&self) -> bool {
        self.display_on
    }

    /// Advance by one control-loop iteration.
    pub fn tick(&mut self, events: InputEvents, now: Millis) -> TickResult {
        let mut out = TickResult::default();

        // Any accepted event is activity, whatever the state does with it.
        if events.any() {
            self.activity.touch(now);
        }

        if matches!(self.state, State::Idle { .. }) {
            if events.any() {
                self.wake(&mut out);
            }
        } else {
            if events.rotation != 0 {
                self.apply_rotation(events.rotation, &mut out);
            }
            if events.click {
                self.apply_click(now, &mut out);
            }
        }

        self.advance_counting(now, &mut out);
        self.advance_celebration(now, &mut out);
        self.check_inactivity(now, &mut out);

        out
    }

    fn wake(&mut self, out: &mut TickResult) {
        if !self.display_on {
            self.display_on = true;
            out.display_power = Some(true);
        }
        self.state = State::Menu { selected: 0 };
        out.redraw = true;
    }

    fn apply_rotation(&mut self, dir: i8, out: &mut TickResult) {
        match &mut self.state {
            State::Menu { selected } => {
                let n = self.menu.len();
                *selected = if dir > 0 {
                    (*selected + 1) % n
                } else {
                    (*selected + n - 1) % n
                };
                out.redraw = true;
            }
            State::SelectingDownDuration { minutes } => {
                *minutes = if dir > 0 {
                    minutes.saturating_add(1)
                } else {
                    minutes.saturating_sub(1).max(MIN_COUNTDOWN_MIN)
                };
                out.redraw = true;
            }
            // Counting and celebration ignore rotation.
            _ => {}
        }
    }

    fn apply_click(&mut self, now: Millis, out: &mut TickResult) {
        match self.state {
            State::Menu { selected } => match self.menu[selected] {
                MenuAction::CountUp => {
                    self.state = State::CountingUp { elapsed: 0 };
                    self.last_count_tick = now;
                    out.redraw = true;
                }
                MenuAction::CountDown => {
                    self.state = State::SelectingDownDuration {
                        minutes: DEFAULT_COUNTDOWN_MIN,
                    };
                    out.redraw = true;
                }
                MenuAction::ResetTotal => {
                    self.cumulative = 0;
                    out.redraw = true;
                }
                MenuAction::LightbarPower => {
                    out.lightbar = Some(LightbarCommand::TogglePower);
                }
                MenuAction::LightbarBrighter => {
                    out.lightbar = Some(LightbarCommand::StepBrightness(LIGHTBAR_STEP));
                }
                MenuAction::LightbarDimmer => {
                    out.lightbar = Some(LightbarCommand::StepBrightness(-LIGHTBAR_STEP));
                }
                MenuAction::LightbarWarmer => {
                    out.lightbar = Some(LightbarCommand::StepWarmth(LIGHTBAR_STEP));
                }
            },
            State::SelectingDownDuration { minutes } => {
                self.state = State::CountingDown {
                    remaining: minutes,
                    initial: minutes,
                };
                self.last_count_tick = now;
                out.redraw = true;
            }
            State::CountingUp { elapsed } => {
                self.cumulative += elapsed;
                self.start_celebration(now, out);
            }
            State::CountingDown { remaining, initial } => {
                self.cumulative += u32::from(initial - remaining);
                self.start_celebration(now, out);
            }
            // Playback owns the surface; input during it is ignored.
            State::Celebration { .. } => {}
            // Handled by wake() before dispatch.
            State::Idle { .. } => {}
        }
    }

    fn start_celebration(&mut self, now: Millis, out: &mut TickResult) {
        self.state = State::Celebration { frame: 0 };
        self.last_frame_step = now;
        out.redraw = true;
    }

    fn advance_counting(&mut self, now: Millis, out: &mut TickResult) {
        if !self.state.is_counting() || elapsed_since(now, self.last_count_tick) < COUNT_TICK_MS {
            return;
        }
        self.last_count_tick = now;

        let mut completed = None;
        match &mut self.state {
            State::CountingUp { elapsed } => {
                *elapsed += 1;
                out.redraw = true;
            }
            State::CountingDown { remaining, initial } => {
                // remaining >= 1 here: it is floored at 1 on entry and
                // the state is left the moment it reaches 0.
                *remaining -= 1;
                if *remaining == 0 {
                    completed = Some(*initial);
                } else {
                    out.redraw = true;
                }
            }
            _ => {}
        }

        if let Some(initial) = completed {
            self.cumulative += u32::from(initial);
            self.start_celebration(now, out);
        }
    }

    fn advance_celebration(&mut self, now: Millis, out: &mut TickResult) {
        let State::Celebration { frame } = self.state else {
            return;
        };
        if elapsed_since(now, self.last_frame_step) < CELEBRATION_FRAME_MS {
            return;
        }
        self.last_frame_step = now;

        let next = frame + 1;
        self.state = if next >= animation::FRAME_COUNT {
            State::Menu { selected: 0 }
        } else {
            State::Celebration { frame: next }
        };
        out.redraw = true;
    }

    fn check_inactivity(&mut self, now: Millis, out: &mut TickResult) {
        match self.state {
            // Counting and celebration are exempt by construction.
            State::Menu { .. } | State::SelectingDownDuration { .. } => {
                if self.activity.idle_for(now) >= INACTIVITY_LIMIT_MS {
                    self.state = State::Idle { since: now };
                    out.redraw = true;
                }
            }
            State::Idle { since } => {
                if self.display_on && elapsed_since(now, since) >= DISPLAY_OFF_LIMIT_MS {
                    self.display_on = false;
                    out.display_power = Some(false);
                }
            }
            _ => {}
        }
    }
}
