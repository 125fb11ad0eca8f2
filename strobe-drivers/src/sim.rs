//! Simulated PIO bus for driver tests

use std::collections::{HashMap, VecDeque};
use std::vec::Vec;

use strobe_core::config::RegisterMap;
use strobe_hal::RegisterBus;

/// Register file plus a FIFO wired to the data-ready/data/full registers
pub struct SimBus {
    pub map: RegisterMap,
    pub registers: HashMap<u32, u32>,
    pub bytes: HashMap<u32, u8>,
    pub fifo: VecDeque<u8>,
    pub depth: usize,
    pub writes: Vec<(u32, u32)>,
    clock_high: bool,
}

impl SimBus {
    pub fn new() -> Self {
        Self {
            map: RegisterMap::REFERENCE,
            registers: HashMap::new(),
            bytes: HashMap::new(),
            fifo: VecDeque::new(),
            depth: 512,
            writes: Vec::new(),
            clock_high: false,
        }
    }

    pub fn register(&self, addr: u32) -> u32 {
        self.registers.get(&addr).copied().unwrap_or(0)
    }
}

impl RegisterBus for SimBus {
    fn read(&mut self, addr: u32) -> u32 {
        if addr == self.map.data_ready {
            !self.fifo.is_empty() as u32
        } else if addr == self.map.fifo_data {
            self.fifo.front().copied().unwrap_or(0) as u32
        } else if addr == self.map.fifo_full {
            (self.fifo.len() >= self.depth) as u32
        } else if let Some(byte) = self.bytes.get(&addr) {
            *byte as u32
        } else {
            self.register(addr)
        }
    }

    fn write(&mut self, addr: u32, value: u32) {
        self.writes.push((addr, value));
        if addr == self.map.data_ready {
            // Falling edge of the read clock advances the FIFO
            let high = value & 1 != 0;
            if self.clock_high && !high {
                self.fifo.pop_front();
            }
            self.clock_high = high;
        } else {
            self.registers.insert(addr, value);
        }
    }

    fn write_byte(&mut self, addr: u32, value: u8) {
        self.bytes.insert(addr, value);
    }
}
