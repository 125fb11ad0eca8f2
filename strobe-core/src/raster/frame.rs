//! Binary frame buffer
//!
//! One bit per pixel, rows packed MSB first. Storage is sized for the
//! largest supported panel; smaller frames use the leading bytes.

use crate::trigger::TriggerCause;

/// Widest supported frame (pixels)
pub const DISPLAY_WIDTH: u16 = 480;

/// Tallest supported frame (pixels)
pub const DISPLAY_HEIGHT: u16 = 272;

/// Backing storage size
pub const MAX_FRAME_BYTES: usize = (DISPLAY_WIDTH as usize).div_ceil(8) * DISPLAY_HEIGHT as usize;

/// Frame construction errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Width or height is zero
    Empty,
    /// Larger than the supported display
    TooLarge,
}

/// Rendered pixel frame plus capture metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    width: u16,
    height: u16,
    bits: [u8; MAX_FRAME_BYTES],
    overrun: bool,
    trigger_cause: Option<TriggerCause>,
    trigger_column: Option<u16>,
    level_row: Option<u16>,
}

impl Frame {
    /// Create a blank frame
    pub fn new(width: u16, height: u16) -> Result<Self, FrameError> {
        Self::check(width, height)?;
        Ok(Self::blank(width, height))
    }

    /// Validate dimensions
    pub fn check(width: u16, height: u16) -> Result<(), FrameError> {
        if width == 0 || height == 0 {
            return Err(FrameError::Empty);
        }
        if width > DISPLAY_WIDTH || height > DISPLAY_HEIGHT {
            return Err(FrameError::TooLarge);
        }
        Ok(())
    }

    pub(crate) fn blank(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            bits: [0; MAX_FRAME_BYTES],
            overrun: false,
            trigger_cause: None,
            trigger_column: None,
            level_row: None,
        }
    }

    /// Width in pixels
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Height in pixels
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Bytes per packed row
    pub fn stride(&self) -> usize {
        (self.width as usize).div_ceil(8)
    }

    fn locate(&self, x: u16, y: u16) -> Option<(usize, u8)> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let byte = y as usize * self.stride() + x as usize / 8;
        let mask = 0x80 >> (x % 8);
        Some((byte, mask))
    }

    /// Turn a pixel on or off; out-of-bounds writes are ignored
    pub fn set(&mut self, x: u16, y: u16, on: bool) {
        if let Some((byte, mask)) = self.locate(x, y) {
            if on {
                self.bits[byte] |= mask;
            } else {
                self.bits[byte] &= !mask;
            }
        }
    }

    /// Read a pixel; out of bounds reads as off
    pub fn get(&self, x: u16, y: u16) -> bool {
        self.locate(x, y)
            .map(|(byte, mask)| self.bits[byte] & mask != 0)
            .unwrap_or(false)
    }

    /// Turn on every pixel in column `x` between rows `a` and `b` inclusive
    pub fn vline(&mut self, x: u16, a: u16, b: u16) {
        let (top, bottom) = if a <= b { (a, b) } else { (b, a) };
        for y in top..=bottom {
            self.set(x, y, true);
        }
    }

    /// Packed bits of one row
    pub fn row(&self, y: u16) -> &[u8] {
        if y >= self.height {
            return &[];
        }
        let stride = self.stride();
        let start = y as usize * stride;
        &self.bits[start..start + stride]
    }

    /// All packed rows
    pub fn as_bytes(&self) -> &[u8] {
        &self.bits[..self.stride() * self.height as usize]
    }

    /// Number of lit pixels
    pub fn lit_count(&self) -> u32 {
        self.as_bytes().iter().map(|b| b.count_ones()).sum()
    }

    /// True if the capture behind this frame was cut short by an overrun
    pub fn is_overrun(&self) -> bool {
        self.overrun
    }

    /// What triggered the capture
    pub fn trigger_cause(&self) -> Option<TriggerCause> {
        self.trigger_cause
    }

    /// Column the trigger sample landed in
    pub fn trigger_column(&self) -> Option<u16> {
        self.trigger_column
    }

    /// Row corresponding to the trigger level
    pub fn level_row(&self) -> Option<u16> {
        self.level_row
    }

    pub(crate) fn annotate(
        &mut self,
        overrun: bool,
        trigger_cause: Option<TriggerCause>,
        trigger_column: Option<u16>,
        level_row: Option<u16>,
    ) {
        self.overrun = overrun;
        self.trigger_cause = trigger_cause;
        self.trigger_column = trigger_column;
        self.level_row = level_row;
    }
}
