//! Memory-mapped FIFO
//!
//! The FIFO sits on the PIO bus as three registers: a data-ready flag that
//! doubles as the read clock input, the 8-bit head sample, and a full flag.

use strobe_core::config::RegisterMap;
use strobe_core::traits::SampleSource;
use strobe_core::Sample;
use strobe_hal::RegisterBus;

/// FIFO behind PIO registers
pub struct MappedFifo<B> {
    bus: B,
    data_ready: u32,
    data: u32,
    full: u32,
}

impl<B: RegisterBus> MappedFifo<B> {
    /// Create a FIFO driver using the addresses in `map`
    pub fn new(bus: B, map: &RegisterMap) -> Self {
        Self {
            bus,
            data_ready: map.data_ready,
            data: map.fifo_data,
            full: map.fifo_full,
        }
    }

    /// Discard everything currently queued
    ///
    /// Returns the number of samples dropped. Bounded by `limit` so a
    /// source that never drains cannot hang the caller.
    pub fn flush(&mut self, limit: usize) -> usize {
        let mut dropped = 0;
        while dropped < limit && self.poll().is_some() {
            dropped += 1;
        }
        dropped
    }

    /// Access the underlying bus
    pub fn bus_mut(&mut self) -> &mut B {
        &mut self.bus
    }

    /// Tear down and return the bus
    pub fn release(self) -> B {
        self.bus
    }
}

impl<B: RegisterBus> SampleSource for MappedFifo<B> {
    fn poll(&mut self) -> Option<Sample> {
        if !self.bus.read_flag(self.data_ready) {
            return None;
        }

        let sample = self.bus.read(self.data) as Sample;
        self.bus.write(self.data_ready, 1);
        self.bus.write(self.data_ready, 0);
        Some(sample)
    }

    fn is_full(&mut self) -> bool {
        self.bus.read_flag(self.full)
    }
}
