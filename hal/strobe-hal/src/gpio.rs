//! GPIO pin abstractions
//!
//! Provides traits for the digital lines a scope front end is wired with:
//! FIFO status flags, parallel data lines, read strobes and keypad switches.

/// Digital output pin
///
/// Used for strobes such as the FIFO read clock.
pub trait OutputPin {
    /// Set the pin high (logic 1)
    fn set_high(&mut self);

    /// Set the pin low (logic 0)
    fn set_low(&mut self);

    /// Set the pin to a specific state
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }

    /// Drive a single high-then-low pulse
    fn pulse(&mut self) {
        self.set_high();
        self.set_low();
    }
}

/// Digital input pin
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&self) -> bool {
        !self.is_high()
    }
}

/// Read a parallel bus of input pins as a byte, `pins[0]` being bit 0
pub fn read_parallel<P: InputPin>(pins: &[P; 8]) -> u8 {
    pins.iter()
        .enumerate()
        .fold(0u8, |acc, (bit, pin)| acc | ((pin.is_high() as u8) << bit))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Level(bool);

    impl InputPin for Level {
        fn is_high(&self) -> bool {
            self.0
        }
    }

    #[derive(Default)]
    struct Recorder {
        high: bool,
        edges: u8,
    }

    impl OutputPin for Recorder {
        fn set_high(&mut self) {
            self.high = true;
            self.edges += 1;
        }

        fn set_low(&mut self) {
            self.high = false;
            self.edges += 1;
        }
    }

    #[test]
    fn test_read_parallel_bit_order() {
        let pins = [
            Level(true),
            Level(false),
            Level(true),
            Level(false),
            Level(false),
            Level(false),
            Level(false),
            Level(true),
        ];
        assert_eq!(read_parallel(&pins), 0b1000_0101);
    }

    #[test]
    fn test_pulse_returns_low() {
        let mut pin = Recorder::default();
        pin.pulse();
        assert!(!pin.high);
        assert_eq!(pin.edges, 2);
    }
}
