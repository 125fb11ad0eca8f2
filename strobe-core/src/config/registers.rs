//! Peripheral register map
//!
//! Boards with a memory-mapped analog section expose the trigger logic,
//! FIFO and video RAM at fixed bus addresses. The map is passed to the
//! drivers at construction time.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Width of the trigger level register field
pub const TRIGGER_LEVEL_BITS: u32 = 8;

/// Width of the sample delay register field
pub const SAMPLE_DELAY_BITS: u32 = 16;

/// Video RAM placement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VramLayout {
    /// First VRAM byte
    pub base: u32,
    /// Last VRAM byte (inclusive)
    pub end: u32,
    /// Bytes per VRAM row
    pub row_stride: u32,
}

impl VramLayout {
    /// Number of whole rows that fit in VRAM
    pub fn rows(&self) -> u32 {
        (self.end - self.base + 1) / self.row_stride
    }

    /// Address of a pixel byte, or None if it falls outside VRAM
    pub fn pixel_addr(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.row_stride || y >= self.rows() {
            return None;
        }
        Some(self.base + y * self.row_stride + x)
    }
}

/// Memory-mapped register addresses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RegisterMap {
    /// 1 bit, 1 enables hardware auto triggering
    pub auto_trigger: u32,
    /// 1 bit, 1 enables the trigger
    pub trigger_enable: u32,
    /// 1 bit, 1 for negative slope
    pub trigger_slope: u32,
    /// 16 bits, samples to take after the trigger
    pub sample_delay: u32,
    /// 8 bits, trigger level in the sample domain
    pub trigger_level: u32,
    /// 19 bits, samples per second
    pub sample_rate: u32,
    /// Reads data ready; writing strobes the FIFO read clock
    pub data_ready: u32,
    /// 8-bit sample at the FIFO head
    pub fifo_data: u32,
    /// 1 bit, 1 if the FIFO is full
    pub fifo_full: u32,
    /// Video RAM
    pub vram: VramLayout,
}

impl RegisterMap {
    /// Addresses of the reference board
    pub const REFERENCE: Self = Self {
        auto_trigger: 0x1d_1150,
        trigger_enable: 0x1d_1140,
        trigger_slope: 0x1d_1130,
        sample_delay: 0x1d_1120,
        trigger_level: 0x1d_1110,
        sample_rate: 0x1d_1100,
        data_ready: 0x1d_10f0,
        fifo_data: 0x1d_10c0,
        fifo_full: 0x1d_10d0,
        vram: VramLayout {
            base: 0x14_0000,
            end: 0x17_ffff,
            row_stride: 512,
        },
    };
}

impl Default for RegisterMap {
    fn default() -> Self {
        Self::REFERENCE
    }
}
