//! Strobe Hardware Abstraction Layer
//!
//! This crate defines the primitive I/O traits the oscilloscope drivers are
//! written against. Chip or board support provides the implementations; the
//! drivers in `strobe-drivers` only ever see these traits.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  strobe-core (acquisition, raster)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  strobe-drivers (FIFO, VRAM, keypad)    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  strobe-hal (this crate - traits)       │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ memory-mapped │       │  GPIO-wired   │
//! │  PIO / VRAM   │       │  FIFO, keys   │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - Digital I/O
//! - [`bus::RegisterBus`] - Memory-mapped peripheral registers

#![no_std]
#![deny(unsafe_code)]

pub mod bus;
pub mod gpio;

// Re-export key traits at crate root for convenience
pub use bus::RegisterBus;
pub use gpio::{InputPin, OutputPin};
