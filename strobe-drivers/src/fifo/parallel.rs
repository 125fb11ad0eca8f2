//! GPIO-wired FIFO
//!
//! For boards where the FIFO's output byte, empty/full flags and read clock
//! are wired straight to GPIO rather than sitting behind a bus.

use strobe_core::traits::SampleSource;
use strobe_core::Sample;
use strobe_hal::gpio::{read_parallel, InputPin, OutputPin};

/// FIFO on eight data lines plus ready, full and read-clock lines
pub struct ParallelFifo<D, R, F, C> {
    data: [D; 8],
    ready: R,
    full: F,
    read_clock: C,
}

impl<D, R, F, C> ParallelFifo<D, R, F, C>
where
    D: InputPin,
    R: InputPin,
    F: InputPin,
    C: OutputPin,
{
    /// Create the driver; `data[0]` is the least significant bit
    pub fn new(data: [D; 8], ready: R, full: F, mut read_clock: C) -> Self {
        read_clock.set_low();
        Self {
            data,
            ready,
            full,
            read_clock,
        }
    }
}

impl<D, R, F, C> SampleSource for ParallelFifo<D, R, F, C>
where
    D: InputPin,
    R: InputPin,
    F: InputPin,
    C: OutputPin,
{
    fn poll(&mut self) -> Option<Sample> {
        if self.ready.is_low() {
            return None;
        }

        let sample = read_parallel(&self.data);
        self.read_clock.pulse();
        Some(sample)
    }

    fn is_full(&mut self) -> bool {
        self.full.is_high()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::{Cell, RefCell};
    use std::collections::VecDeque;
    use std::rc::Rc;

    /// Shared model of the FIFO chip the pins are wired to
    #[derive(Default)]
    struct Chip {
        queue: RefCell<VecDeque<u8>>,
        full: Cell<bool>,
    }

    struct DataPin {
        chip: Rc<Chip>,
        bit: u8,
    }

    impl InputPin for DataPin {
        fn is_high(&self) -> bool {
            let head = self.chip.queue.borrow().front().copied().unwrap_or(0);
            head & (1 << self.bit) != 0
        }
    }

    struct ReadyPin(Rc<Chip>);

    impl InputPin for ReadyPin {
        fn is_high(&self) -> bool {
            !self.0.queue.borrow().is_empty()
        }
    }

    struct FullPin(Rc<Chip>);

    impl InputPin for FullPin {
        fn is_high(&self) -> bool {
            self.0.full.get()
        }
    }

    struct ClockPin(Rc<Chip>);

    impl OutputPin for ClockPin {
        fn set_high(&mut self) {
            self.0.queue.borrow_mut().pop_front();
        }

        fn set_low(&mut self) {}
    }

    fn fifo(chip: &Rc<Chip>) -> ParallelFifo<DataPin, ReadyPin, FullPin, ClockPin> {
        let data = core::array::from_fn(|bit| DataPin {
            chip: chip.clone(),
            bit: bit as u8,
        });
        ParallelFifo::new(
            data,
            ReadyPin(chip.clone()),
            FullPin(chip.clone()),
            ClockPin(chip.clone()),
        )
    }

    #[test]
    fn test_reads_bytes_in_order() {
        let chip = Rc::new(Chip::default());
        chip.queue.borrow_mut().extend([0xA5, 0x01, 0xFF]);
        let mut fifo = fifo(&chip);

        assert_eq!(fifo.poll(), Some(0xA5));
        assert_eq!(fifo.poll(), Some(0x01));
        assert_eq!(fifo.poll(), Some(0xFF));
        assert_eq!(fifo.poll(), None);
    }

    #[test]
    fn test_full_line() {
        let chip = Rc::new(Chip::default());
        let mut fifo = fifo(&chip);
        assert!(!fifo.is_full());
        chip.full.set(true);
        assert!(fifo.is_full());
    }
}
