//! Display drivers
//!
//! Both panels take a finished [`Frame`](strobe_core::raster::Frame) and
//! push it to the hardware in one pass. Frames smaller than the panel are
//! drawn in the top-left corner.

pub mod sh1106;
pub mod vram;

pub use sh1106::Sh1106Display;
pub use vram::{VramDisplay, PIXEL_BLACK, PIXEL_WHITE};

use strobe_core::raster::Frame;

/// Pixel as shown on the panel, including the trigger markers
///
/// Markers are dotted: every other pixel along the trigger column and the
/// trigger level row.
pub(crate) fn composed_pixel(frame: &Frame, x: u16, y: u16, markers: bool) -> bool {
    if frame.get(x, y) {
        return true;
    }
    if !markers {
        return false;
    }
    let on_column = frame.trigger_column() == Some(x) && y % 2 == 0;
    let on_level = frame.level_row() == Some(y) && x % 2 == 0;
    on_column || on_level
}
