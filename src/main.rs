//! segscope firmware - nRF52840.
//!
//! Binds the bearing selector, the segment bus and the two digit enables
//! from `config::INPUT_PINS`. Each monitored line gets a GPIOTE edge task
//! that queues its label; the monitor task sleeps on that queue and shows
//! the consolidated state on RTT and on the OLED.
//!
//! Flash: `cargo run --release --features embedded`

#![no_std]
#![no_main]

mod ui;

use defmt::info;
use embassy_executor::Spawner;
use embassy_nrf::gpio::{AnyPin, Input, Level, Output, OutputDrive, Pull};
use embassy_nrf::twim::{self, Twim};
use embassy_nrf::{bind_interrupts, peripherals};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use segscope::config::{INPUT_PINS, MAX_INPUTS, RESERVED_PINS};
use segscope::{EdgeChannel, EdgeWatch, Error, Monitor, PinBinder, PinClaims, TrackedState};

type NrfMonitor = Monitor<Input<'static>, Output<'static>>;

bind_interrupts!(struct Irqs {
    SPIM0_SPIS0_TWIM0_TWIS0_SPI0_TWI0 => twim::InterruptHandler<peripherals::TWISPI0>;
});

/// Latest state for the display task. Older values are overwritten.
static STATE: Signal<CriticalSectionRawMutex, TrackedState> = Signal::new();

/// Labels of lines that saw an edge, oldest first.
static EDGES: EdgeChannel<CriticalSectionRawMutex> = EdgeChannel::new();

static MONITOR: StaticCell<NrfMonitor> = StaticCell::new();

/// Configures GPIOs by flat pin number (P0.n = n, P1.n = 32 + n).
struct NrfBinder;

impl PinBinder for NrfBinder {
    type Input = Input<'static>;
    type Output = Output<'static>;
    type Watch = Input<'static>;

    fn bind_input(&mut self, pin: u8) -> Result<Input<'static>, Error> {
        // SAFETY: `Monitor::bind` claims each pin number once and skips
        // RESERVED_PINS. A segment line gets a second, identically
        // configured `Input` from `bind_watch`; both live for the whole
        // program, so neither ever disconnects the pin.
        let pin = unsafe { AnyPin::steal(pin) };
        // Inputs idle low; the display and selector drive them high.
        Ok(Input::new(pin, Pull::Down))
    }

    fn bind_watch(&mut self, pin: u8) -> Result<Input<'static>, Error> {
        self.bind_input(pin)
    }

    fn bind_output(&mut self, pin: u8) -> Result<Output<'static>, Error> {
        // SAFETY: see `bind_input`.
        let pin = unsafe { AnyPin::steal(pin) };
        Ok(Output::new(pin, Level::Low, OutputDrive::Standard))
    }
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_nrf::init(Default::default());
    info!("segscope starting");

    // Failures are logged per label inside `bind`.
    let (monitor, watchers, report) = Monitor::bind(
        INPUT_PINS,
        PinClaims::reserving(RESERVED_PINS),
        &mut NrfBinder,
    );
    info!(
        "Bound {}/{} inputs, monitoring {} lines",
        report.bound,
        INPUT_PINS.len(),
        monitor.line_count()
    );
    let monitor = MONITOR.init(monitor);

    let i2c = Twim::new(p.TWISPI0, Irqs, p.P0_26, p.P0_27, twim::Config::default());

    spawner.must_spawn(display_task(i2c));
    spawner.must_spawn(monitor_task(monitor));
    for watch in watchers {
        spawner.must_spawn(edge_task(watch));
    }

    info!("Monitoring GPIO inputs");
}

/// Sleep until one line changes level, queue its label, repeat.
#[embassy_executor::task(pool_size = MAX_INPUTS)]
async fn edge_task(watch: EdgeWatch<Input<'static>>) {
    let label = watch.label();
    let error = watch.run(EDGES.sender()).await;
    defmt::warn!("No more edges from {}: {}", label, error);
}

/// Handle queued edges one at a time, each to completion before the next.
#[embassy_executor::task]
async fn monitor_task(monitor: &'static mut NrfMonitor) -> ! {
    monitor
        .run(EDGES.receiver(), |_, state| STATE.signal(*state))
        .await
}

#[embassy_executor::task]
async fn display_task(i2c: Twim<'static, peripherals::TWISPI0>) -> ! {
    let mut display = ui::display::init(i2c);
    ui::display::draw_waiting(&mut display);

    loop {
        let state = STATE.wait().await;
        ui::display::draw_status(&mut display, &state);
    }
}
