//! Display task
//!
//! Pushes finished frames to the SH1106 panel as they arrive.

use defmt::*;
use embassy_rp::i2c::{Blocking, I2c};
use embassy_rp::peripherals::I2C0;
use strobe_core::traits::DisplayOutput;
use strobe_drivers::display::Sh1106Display;

use crate::channels::FRAME_CHANNEL;

/// OLED on I2C0
pub type Oled = Sh1106Display<I2c<'static, I2C0, Blocking>>;

#[embassy_executor::task]
pub async fn display_task(mut display: Oled) {
    info!("Display task started");

    if let Err(e) = display.init() {
        error!("Display init failed: {}", e);
        return;
    }

    loop {
        let frame = FRAME_CHANNEL.receive().await;
        let overrun = frame.is_overrun();

        match display.show(frame) {
            Ok(()) if overrun => debug!("Frame shown (overrun)"),
            Ok(()) => trace!("Frame shown"),
            Err(e) => warn!("Failed to show frame: {}", e),
        }
    }
}
