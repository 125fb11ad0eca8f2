//! Strobe - Digital Storage Oscilloscope Firmware
//!
//! Main firmware binary for RP2040-based scope boards. Samples arrive
//! through an 8-bit FIFO wired to GPIO, the trace is drawn on an SH1106
//! OLED and the settings are edited with five front-panel keys.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::i2c::{Config as I2cConfig, I2c};
use {defmt_rtt as _, panic_probe as _};

use strobe_drivers::display::Sh1106Display;
use strobe_drivers::fifo::ParallelFifo;
use strobe_drivers::input::{KeyLines, KeypadSettings};

use crate::pins::{ActiveLow, In, Out};

mod channels;
mod pins;
mod tasks;

/// Power-on settings generated from scope.toml
mod defaults {
    use strobe_core::config::{ConfigRequest, Slope};

    include!(concat!(env!("OUT_DIR"), "/scope_defaults.rs"));
}

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Strobe firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // FIFO data bus, D0 on GPIO2
    let data = [
        In(Input::new(p.PIN_2, Pull::None)),
        In(Input::new(p.PIN_3, Pull::None)),
        In(Input::new(p.PIN_4, Pull::None)),
        In(Input::new(p.PIN_5, Pull::None)),
        In(Input::new(p.PIN_6, Pull::None)),
        In(Input::new(p.PIN_7, Pull::None)),
        In(Input::new(p.PIN_8, Pull::None)),
        In(Input::new(p.PIN_9, Pull::None)),
    ];
    let source = ParallelFifo::new(
        data,
        In(Input::new(p.PIN_10, Pull::Down)),
        In(Input::new(p.PIN_11, Pull::Down)),
        Out(Output::new(p.PIN_12, Level::Low)),
    );
    info!("FIFO initialized");

    let keys = KeyLines::new([
        ActiveLow(Input::new(p.PIN_13, Pull::Up)),
        ActiveLow(Input::new(p.PIN_14, Pull::Up)),
        ActiveLow(Input::new(p.PIN_15, Pull::Up)),
        ActiveLow(Input::new(p.PIN_16, Pull::Up)),
        ActiveLow(Input::new(p.PIN_17, Pull::Up)),
    ]);
    let settings = KeypadSettings::new(defaults::DEFAULT_REQUEST);

    let i2c = I2c::new_blocking(p.I2C0, p.PIN_21, p.PIN_20, I2cConfig::default());
    let display = Sh1106Display::new(i2c).with_markers(defaults::DISPLAY_MARKERS);
    info!("Display bus initialized");

    spawner.spawn(tasks::display_task(display)).unwrap();
    spawner.spawn(tasks::keypad_task(keys, settings)).unwrap();
    spawner
        .spawn(tasks::acquisition_task(
            source,
            defaults::DEFAULT_REQUEST,
            defaults::PRE_TRIGGER,
            defaults::OVERRUN_POLL_LIMIT,
        ))
        .unwrap();

    info!("All tasks spawned, firmware running");

    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}
