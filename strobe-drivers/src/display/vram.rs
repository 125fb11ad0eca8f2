//! Video RAM display
//!
//! The LCD controller scans a byte-per-pixel buffer in bus memory. Rows are
//! `row_stride` bytes apart regardless of the panel width.

use strobe_core::config::VramLayout;
use strobe_core::raster::Frame;
use strobe_core::traits::{DisplayError, DisplayOutput};
use strobe_hal::RegisterBus;

use super::composed_pixel;

/// Byte value of an unlit pixel
pub const PIXEL_WHITE: u8 = 0;

/// Byte value of a lit pixel
pub const PIXEL_BLACK: u8 = 1;

/// Width of one test-pattern stripe (pixels)
const STRIPE: u32 = 16;

/// Frame output into memory-mapped video RAM
pub struct VramDisplay<B> {
    bus: B,
    layout: VramLayout,
    width: u16,
    height: u16,
    markers: bool,
}

impl<B: RegisterBus> VramDisplay<B> {
    /// Create a display of `width` x `height` pixels
    ///
    /// Fails if the panel does not fit in the VRAM window.
    pub fn new(bus: B, layout: VramLayout, width: u16, height: u16) -> Result<Self, DisplayError> {
        if width == 0
            || height == 0
            || width as u32 > layout.row_stride
            || height as u32 > layout.rows()
        {
            return Err(DisplayError::InvalidDimensions);
        }
        Ok(Self {
            bus,
            layout,
            width,
            height,
            markers: true,
        })
    }

    /// Draw the trigger position and level markers (default on)
    pub fn with_markers(mut self, markers: bool) -> Self {
        self.markers = markers;
        self
    }

    fn put(&mut self, x: u32, y: u32, value: u8) {
        if let Some(addr) = self.layout.pixel_addr(x, y) {
            self.bus.write_byte(addr, value);
        }
    }

    /// Fill every pixel with one value
    pub fn clear(&mut self, value: u8) {
        for y in 0..self.height as u32 {
            for x in 0..self.width as u32 {
                self.put(x, y, value);
            }
        }
    }

    /// Expected test-pattern byte at a pixel
    ///
    /// Vertical stripes `STRIPE` pixels wide, lit first, whose phase flips
    /// every `STRIPE` rows, giving a checkerboard.
    pub fn test_pattern_pixel(x: u32, y: u32) -> u8 {
        let stripe = (x % (2 * STRIPE)) < STRIPE;
        let band = (y / STRIPE) % 2 == 1;
        if stripe != band {
            PIXEL_BLACK
        } else {
            PIXEL_WHITE
        }
    }

    /// Write the diagnostic checkerboard
    pub fn fill_test_pattern(&mut self) {
        for y in 0..self.height as u32 {
            for x in 0..self.width as u32 {
                self.put(x, y, Self::test_pattern_pixel(x, y));
            }
        }
    }

    /// Read the test pattern back
    ///
    /// Returns the address of the first byte that does not match.
    pub fn verify_test_pattern(&mut self) -> Result<(), u32> {
        for y in 0..self.height as u32 {
            for x in 0..self.width as u32 {
                let Some(addr) = self.layout.pixel_addr(x, y) else {
                    continue;
                };
                let expected = Self::test_pattern_pixel(x, y);
                if self.bus.read(addr) as u8 != expected {
                    return Err(addr);
                }
            }
        }
        Ok(())
    }

    /// Tear down and return the bus
    pub fn release(self) -> B {
        self.bus
    }
}

impl<B: RegisterBus> DisplayOutput for VramDisplay<B> {
    fn show(&mut self, frame: Frame) -> Result<(), DisplayError> {
        if frame.width() > self.width || frame.height() > self.height {
            return Err(DisplayError::InvalidDimensions);
        }

        for y in 0..self.height {
            for x in 0..self.width {
                let lit = composed_pixel(&frame, x, y, self.markers);
                let value = if lit { PIXEL_BLACK } else { PIXEL_WHITE };
                self.put(x as u32, y as u32, value);
            }
        }

        Ok(())
    }

    fn dimensions(&self) -> (u16, u16) {
        (self.width, self.height)
    }
}
