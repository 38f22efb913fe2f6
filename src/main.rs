//! Embedded entry point: wires the control core to the nRF52840.
//!
//! One cooperative polling loop, one logical tick per iteration: sample
//! the three input lines, advance the timer, apply the reported
//! effects, redraw only when the controller says something changed.
//! There is no other task - the core owns all state and needs no
//! synchronization.

#![no_std]
#![no_main]

use defmt::{error, info};
use defmt_rtt as _;
use panic_probe as _;

use embassy_embedded_hal::adapter::BlockingAsync;
use embassy_executor::Spawner;
use embassy_nrf::gpio::{Input, Pull};
use embassy_nrf::nvmc::Nvmc;
use embassy_nrf::twim::{self, Twim};
use embassy_nrf::{bind_interrupts, peripherals};
use embassy_time::{Duration, Instant, Ticker, Timer};

use flowdial::bridge::{Bridge, Lightbar};
use flowdial::clock::Millis;
use flowdial::config::{BOOT_SPLASH_MS, POLL_INTERVAL_MS};
use flowdial::input::{InputReader, LineSample};
use flowdial::render::{self, Surface};
use flowdial::storage::FlashSettings;
use flowdial::timer::{FlowTimer, EXTENDED_MENU};
use flowdial::ui::display;

bind_interrupts!(struct Irqs {
    SPIM0_SPIS0_TWIM0_TWIS0_SPI0_TWI0 => twim::InterruptHandler<peripherals::TWISPI0>;
});

/// Integration seam for the external lightbar controller: commands are
/// logged until the radio link is attached.
struct DebugLightbar;

impl Lightbar for DebugLightbar {
    fn set_power(&mut self, on: bool) {
        info!("Lightbar: power {}", on);
    }
    fn set_brightness(&mut self, level: u8) {
        info!("Lightbar: brightness {}", level);
    }
    fn set_warmth(&mut self, level: u8) {
        info!("Lightbar: warmth {}", level);
    }
}

fn now_ms() -> Millis {
    Instant::now().as_millis() as Millis
}

fn redraw<S: Surface>(timer: &FlowTimer, surface: &mut S) {
    let frame = render::compose(timer.state(), timer.cumulative_minutes(), timer.menu());
    render::draw(&frame, surface);
}

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    let p = embassy_nrf::init(Default::default());
    info!("flowdial starting");

    // Encoder lines and push button (active-low, pulled up).
    let clk = Input::new(p.P0_11, Pull::Up);
    let dt = Input::new(p.P0_12, Pull::Up);
    let sw = Input::new(p.P0_24, Pull::Up);

    // SSD1306 over I²C.
    let i2c = Twim::new(p.TWISPI0, Irqs, p.P0_26, p.P0_27, twim::Config::default());
    let mut surface = match display::init(i2c) {
        Ok(surface) => surface,
        Err(e) => {
            // A display-less timer has no degraded mode.
            error!("Display init failed: {} - halting", e);
            loop {
                Timer::after(Duration::from_secs(60)).await;
            }
        }
    };

    render::draw(&render::splash(), &mut surface);
    Timer::after(Duration::from_millis(BOOT_SPLASH_MS)).await;

    let mut flash = BlockingAsync::new(Nvmc::new(p.NVMC));
    let mut settings = FlashSettings::new();
    settings.load(&mut flash).await;

    let mut bridge = Bridge::new();
    let mut lightbar = DebugLightbar;

    let boot = now_ms();
    let initial = LineSample {
        clock: clk.is_high(),
        data: dt.is_high(),
        button: sw.is_high(),
    };
    let mut reader = InputReader::new(initial, boot);
    let mut timer = FlowTimer::with_menu(EXTENDED_MENU, boot);
    redraw(&timer, &mut surface);
    info!("flowdial ready");

    let mut ticker = Ticker::every(Duration::from_millis(POLL_INTERVAL_MS));
    loop {
        ticker.next().await;
        let now = now_ms();
        let sample = LineSample {
            clock: clk.is_high(),
            data: dt.is_high(),
            button: sw.is_high(),
        };

        let events = reader.poll(sample, now);
        let result = timer.tick(events, now);

        if let Some(on) = result.display_power {
            info!("Display power: {}", on);
            surface.set_power(on);
        }
        if let Some(command) = result.lightbar {
            bridge.apply(command, &mut settings, &mut lightbar);
            settings.save(&mut flash).await;
        }
        if result.redraw {
            redraw(&timer, &mut surface);
        }
    }
}
