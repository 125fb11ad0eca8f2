//! Board pin adapters
//!
//! Wraps embassy-rp GPIO in the strobe-hal pin traits so the drivers can
//! use them.
//!
//! | Signal            | GPIO    |
//! |-------------------|---------|
//! | FIFO D0-D7        | 2-9     |
//! | FIFO data ready   | 10      |
//! | FIFO full         | 11      |
//! | FIFO read clock   | 12      |
//! | Keys (M/U/D/L/R)  | 13-17   |
//! | OLED SDA / SCL    | 20 / 21 |

use embassy_rp::gpio::{Input, Output};
use strobe_drivers::fifo::ParallelFifo;
use strobe_drivers::input::KeyLines;
use strobe_hal::gpio::{InputPin, OutputPin};

/// Input line, high when driven high
pub struct In(pub Input<'static>);

impl InputPin for In {
    fn is_high(&self) -> bool {
        self.0.is_high()
    }
}

/// Input line with a pull-up, reads high when pulled to ground
pub struct ActiveLow(pub Input<'static>);

impl InputPin for ActiveLow {
    fn is_high(&self) -> bool {
        self.0.is_low()
    }
}

/// Output line
pub struct Out(pub Output<'static>);

impl OutputPin for Out {
    fn set_high(&mut self) {
        self.0.set_high();
    }

    fn set_low(&mut self) {
        self.0.set_low();
    }
}

/// FIFO wired to GPIO
pub type FifoSource = ParallelFifo<In, In, In, Out>;

/// Front-panel keys
pub type Keys = KeyLines<ActiveLow>;
