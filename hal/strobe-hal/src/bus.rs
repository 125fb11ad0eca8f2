//! Memory-mapped register access
//!
//! The scope's analog section, FIFO and video RAM sit behind a parallel
//! I/O (PIO) bus. Each register is a word-wide location; video RAM is
//! byte addressed. Access never fails, so there is no error type.

/// Word and byte access to memory-mapped peripherals
///
/// Addresses are absolute bus addresses. Implementations decide how a
/// narrower register is presented (upper bits read as zero).
pub trait RegisterBus {
    /// Read a register
    fn read(&mut self, addr: u32) -> u32;

    /// Write a register
    fn write(&mut self, addr: u32, value: u32);

    /// Write a single byte (video RAM)
    fn write_byte(&mut self, addr: u32, value: u8);

    /// Read a single-bit flag register
    fn read_flag(&mut self, addr: u32) -> bool {
        self.read(addr) & 1 != 0
    }

    /// Write `value` truncated to its low `bits` bits
    fn write_field(&mut self, addr: u32, value: u32, bits: u32) {
        let mask = if bits >= 32 { u32::MAX } else { (1u32 << bits) - 1 };
        self.write(addr, value & mask);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Latch {
        addr: u32,
        value: u32,
    }

    impl RegisterBus for Latch {
        fn read(&mut self, _addr: u32) -> u32 {
            self.value
        }

        fn write(&mut self, addr: u32, value: u32) {
            self.addr = addr;
            self.value = value;
        }

        fn write_byte(&mut self, addr: u32, value: u8) {
            self.write(addr, value as u32);
        }
    }

    #[test]
    fn test_write_field_masks() {
        let mut bus = Latch::default();
        bus.write_field(0x10, 0xFFFF_FFFF, 19);
        assert_eq!(bus.value, 0x7_FFFF);
        bus.write_field(0x10, 0x1234, 32);
        assert_eq!(bus.value, 0x1234);
    }

    #[test]
    fn test_read_flag_uses_bit_zero() {
        let mut bus = Latch::default();
        bus.write(0, 0b10);
        assert!(!bus.read_flag(0));
        bus.write(0, 0b11);
        assert!(bus.read_flag(0));
    }
}
