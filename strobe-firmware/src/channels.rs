//! Inter-task communication channels
//!
//! Defines the static channels used for communication between Embassy tasks.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;

use strobe_core::config::ConfigRequest;
use strobe_core::raster::Frame;

/// Frames waiting for the display; one in flight at a time
const FRAME_CHANNEL_SIZE: usize = 1;

/// Settings edited on the keypad (latest wins)
pub static CONFIG_UPDATE: Signal<CriticalSectionRawMutex, ConfigRequest> = Signal::new();

/// Finished frames from acquisition to the display task
pub static FRAME_CHANNEL: Channel<CriticalSectionRawMutex, Frame, FRAME_CHANNEL_SIZE> =
    Channel::new();
