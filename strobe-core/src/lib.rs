//! Board-agnostic core logic for the oscilloscope firmware
//!
//! This crate contains all acquisition logic that does not depend on
//! specific hardware implementations:
//!
//! - Hardware capability traits (sample source, input controller, display)
//! - Capture state machine
//! - Trigger detection (edge and auto free-run)
//! - Pre/post-trigger capture ring buffer and overrun monitoring
//! - Acquisition controller tying the above together per sample tick
//! - Waveform rasterization into binary frames
//! - Configuration types, clamping and register maps

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod acquisition;
pub mod capture;
pub mod config;
pub mod raster;
pub mod state;
pub mod trigger;
pub mod traits;

/// One 8-bit ADC conversion as read from the FIFO
pub type Sample = u8;

/// Largest value a [`Sample`] can take
pub const SAMPLE_MAX: Sample = u8::MAX;
