//! Keypad task
//!
//! Polls the key lines and feeds presses into the settings editor. Each
//! change is published for the acquisition task.

use defmt::*;
use embassy_time::{Duration, Ticker};
use strobe_core::traits::InputController;
use strobe_drivers::input::KeypadSettings;

use crate::channels::CONFIG_UPDATE;
use crate::pins::Keys;

/// Key scan interval in milliseconds
pub const SCAN_INTERVAL_MS: u64 = 20;

#[embassy_executor::task]
pub async fn keypad_task(mut keys: Keys, mut settings: KeypadSettings) {
    info!("Keypad task started");

    let mut ticker = Ticker::every(Duration::from_millis(SCAN_INTERVAL_MS));

    loop {
        ticker.next().await;

        let Some(key) = keys.scan() else {
            continue;
        };

        settings.press(key);
        debug!("Key {}: editing {} (step {})", key, settings.selected(), settings.step());

        if settings.take_changed() {
            CONFIG_UPDATE.signal(settings.read_config());
        }
    }
}
