//! SH1106 OLED display
//!
//! 128x64 monochrome panel over I2C. Display RAM is organized as eight
//! pages of 8 rows, one byte per column with the top row in bit 0. The
//! controller has 132 columns of RAM and the glass starts at column 2.

use embedded_hal::i2c::I2c;
use strobe_core::raster::Frame;
use strobe_core::traits::{DisplayError, DisplayOutput};

use super::composed_pixel;

/// Default I2C address (0x3D with SA0 high)
pub const SH1106_ADDR: u8 = 0x3C;

/// Panel width
pub const WIDTH: u16 = 128;

/// Panel height
pub const HEIGHT: u16 = 64;

const PAGES: usize = HEIGHT as usize / 8;

/// First visible RAM column
const COLUMN_OFFSET: u8 = 2;

#[allow(dead_code)]
mod cmd {
    pub const DISPLAY_OFF: u8 = 0xAE;
    pub const DISPLAY_ON: u8 = 0xAF;
    pub const SET_CONTRAST: u8 = 0x81;
    pub const SET_NORMAL: u8 = 0xA6;
    pub const SET_INVERSE: u8 = 0xA7;
    pub const SET_DISPLAY_OFFSET: u8 = 0xD3;
    pub const SET_COM_PINS: u8 = 0xDA;
    pub const SET_VCOM_DETECT: u8 = 0xDB;
    pub const SET_CLOCK_DIV: u8 = 0xD5;
    pub const SET_PRECHARGE: u8 = 0xD9;
    pub const SET_MUX_RATIO: u8 = 0xA8;
    pub const SET_LOW_COLUMN: u8 = 0x00;
    pub const SET_HIGH_COLUMN: u8 = 0x10;
    pub const SET_PAGE_ADDR: u8 = 0xB0;
    pub const SET_START_LINE: u8 = 0x40;
    pub const SET_SEG_REMAP: u8 = 0xA1;
    pub const SET_COM_SCAN_DEC: u8 = 0xC8;
    pub const SET_CHARGE_PUMP: u8 = 0x8D;
}

/// Control byte prefixes
const CONTROL_COMMAND: u8 = 0x00;
const CONTROL_DATA: u8 = 0x40;

const INIT_SEQUENCE: &[u8] = &[
    cmd::DISPLAY_OFF,
    cmd::SET_CLOCK_DIV,
    0x80,
    cmd::SET_MUX_RATIO,
    0x3F,
    cmd::SET_DISPLAY_OFFSET,
    0x00,
    cmd::SET_START_LINE,
    cmd::SET_CHARGE_PUMP,
    0x14,
    cmd::SET_SEG_REMAP,
    cmd::SET_COM_SCAN_DEC,
    cmd::SET_COM_PINS,
    0x12,
    cmd::SET_CONTRAST,
    0xCF,
    cmd::SET_PRECHARGE,
    0xF1,
    cmd::SET_VCOM_DETECT,
    0x40,
    cmd::SET_NORMAL,
    cmd::DISPLAY_ON,
];

/// SH1106 frame output
pub struct Sh1106Display<I2C> {
    i2c: I2C,
    address: u8,
    pages: [[u8; WIDTH as usize]; PAGES],
    initialized: bool,
    markers: bool,
}

impl<I2C: I2c> Sh1106Display<I2C> {
    /// Create the driver at the default address
    pub fn new(i2c: I2C) -> Self {
        Self::with_address(i2c, SH1106_ADDR)
    }

    pub fn with_address(i2c: I2C, address: u8) -> Self {
        Self {
            i2c,
            address,
            pages: [[0; WIDTH as usize]; PAGES],
            initialized: false,
            markers: true,
        }
    }

    /// Draw the trigger position and level markers (default on)
    pub fn with_markers(mut self, markers: bool) -> Self {
        self.markers = markers;
        self
    }

    /// Send the power-up sequence
    pub fn init(&mut self) -> Result<(), DisplayError> {
        for &c in INIT_SEQUENCE {
            self.command(c)?;
        }
        self.initialized = true;
        Ok(())
    }

    fn command(&mut self, c: u8) -> Result<(), DisplayError> {
        self.i2c
            .write(self.address, &[CONTROL_COMMAND, c])
            .map_err(|_| DisplayError::Communication)
    }

    /// Set display contrast (0-255)
    pub fn set_contrast(&mut self, contrast: u8) -> Result<(), DisplayError> {
        self.command(cmd::SET_CONTRAST)?;
        self.command(contrast)
    }

    /// Swap lit and unlit pixels
    pub fn set_inverted(&mut self, inverted: bool) -> Result<(), DisplayError> {
        self.command(if inverted {
            cmd::SET_INVERSE
        } else {
            cmd::SET_NORMAL
        })
    }

    fn compose(&mut self, frame: &Frame) {
        for (page, columns) in self.pages.iter_mut().enumerate() {
            for (x, column) in columns.iter_mut().enumerate() {
                let mut byte = 0u8;
                for bit in 0..8 {
                    let y = (page * 8 + bit) as u16;
                    if composed_pixel(frame, x as u16, y, self.markers) {
                        byte |= 1 << bit;
                    }
                }
                *column = byte;
            }
        }
    }

    /// Write the page buffer to the panel
    fn flush(&mut self) -> Result<(), DisplayError> {
        for page in 0..PAGES {
            self.command(cmd::SET_PAGE_ADDR | page as u8)?;
            self.command(cmd::SET_LOW_COLUMN | (COLUMN_OFFSET & 0x0F))?;
            self.command(cmd::SET_HIGH_COLUMN | (COLUMN_OFFSET >> 4))?;

            let mut data = [0u8; WIDTH as usize + 1];
            data[0] = CONTROL_DATA;
            data[1..].copy_from_slice(&self.pages[page]);
            self.i2c
                .write(self.address, &data)
                .map_err(|_| DisplayError::Communication)?;
        }
        Ok(())
    }

    /// Tear down and return the bus
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C: I2c> DisplayOutput for Sh1106Display<I2C> {
    fn show(&mut self, frame: Frame) -> Result<(), DisplayError> {
        if !self.initialized {
            return Err(DisplayError::NotInitialized);
        }
        if frame.width() > WIDTH || frame.height() > HEIGHT {
            return Err(DisplayError::InvalidDimensions);
        }

        self.compose(&frame);
        self.flush()
    }

    fn dimensions(&self) -> (u16, u16) {
        (WIDTH, HEIGHT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::i2c::{ErrorKind, ErrorType, Operation};

    /// Records every write; fails all transfers once `fail` is set
    #[derive(Default)]
    struct MockI2c {
        writes: Vec<(u8, Vec<u8>)>,
        fail: bool,
    }

    impl ErrorType for MockI2c {
        type Error = ErrorKind;
    }

    impl I2c for MockI2c {
        fn transaction(
            &mut self,
            address: u8,
            operations: &mut [Operation<'_>],
        ) -> Result<(), Self::Error> {
            if self.fail {
                return Err(ErrorKind::Other);
            }
            for op in operations {
                if let Operation::Write(bytes) = op {
                    self.writes.push((address, bytes.to_vec()));
                }
            }
            Ok(())
        }
    }

    fn data_writes(i2c: &MockI2c) -> Vec<&[u8]> {
        i2c.writes
            .iter()
            .filter(|(_, bytes)| bytes[0] == CONTROL_DATA)
            .map(|(_, bytes)| &bytes[1..])
            .collect()
    }

    #[test]
    fn test_init_sends_sequence() {
        let mut display = Sh1106Display::new(MockI2c::default());
        display.init().unwrap();
        let i2c = display.release();

        assert_eq!(i2c.writes.len(), INIT_SEQUENCE.len());
        assert!(i2c.writes.iter().all(|(addr, _)| *addr == SH1106_ADDR));
        assert_eq!(i2c.writes[0].1, vec![CONTROL_COMMAND, cmd::DISPLAY_OFF]);
        assert_eq!(
            i2c.writes.last().unwrap().1,
            vec![CONTROL_COMMAND, cmd::DISPLAY_ON]
        );
    }

    #[test]
    fn test_show_requires_init() {
        let mut display = Sh1106Display::new(MockI2c::default());
        let frame = Frame::new(WIDTH, HEIGHT).unwrap();
        assert_eq!(display.show(frame), Err(DisplayError::NotInitialized));
    }

    #[test]
    fn test_show_packs_pages() {
        let mut display = Sh1106Display::new(MockI2c::default()).with_markers(false);
        display.init().unwrap();

        let mut frame = Frame::new(WIDTH, HEIGHT).unwrap();
        frame.set(0, 0, true);
        frame.set(0, 7, true);
        frame.set(5, 9, true);
        display.show(frame).unwrap();

        let i2c = display.release();
        let pages = data_writes(&i2c);
        assert_eq!(pages.len(), PAGES);
        assert_eq!(pages[0].len(), WIDTH as usize);
        assert_eq!(pages[0][0], 0x81);
        assert_eq!(pages[1][5], 0x02);
        assert_eq!(pages[7].iter().filter(|b| **b != 0).count(), 0);
    }

    #[test]
    fn test_page_addressing_uses_offset() {
        let mut display = Sh1106Display::new(MockI2c::default());
        display.init().unwrap();
        display.show(Frame::new(WIDTH, HEIGHT).unwrap()).unwrap();

        let i2c = display.release();
        let flush = &i2c.writes[INIT_SEQUENCE.len()..];
        assert_eq!(flush[0].1, vec![CONTROL_COMMAND, cmd::SET_PAGE_ADDR]);
        assert_eq!(flush[1].1, vec![CONTROL_COMMAND, cmd::SET_LOW_COLUMN | 2]);
        assert_eq!(flush[2].1, vec![CONTROL_COMMAND, cmd::SET_HIGH_COLUMN]);
    }

    #[test]
    fn test_oversized_frame_rejected() {
        let mut display = Sh1106Display::new(MockI2c::default());
        display.init().unwrap();
        let frame = Frame::new(WIDTH + 1, HEIGHT).unwrap();
        assert_eq!(display.show(frame), Err(DisplayError::InvalidDimensions));
    }

    #[test]
    fn test_bus_error_maps_to_communication() {
        let mut display = Sh1106Display::new(MockI2c::default());
        display.init().unwrap();

        let mut i2c = display.release();
        i2c.fail = true;
        let mut display = Sh1106Display::new(i2c);
        assert_eq!(display.init(), Err(DisplayError::Communication));
    }
}
