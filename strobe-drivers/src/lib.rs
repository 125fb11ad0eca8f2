//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in strobe-core for the scope's peripherals:
//!
//! - Sample FIFOs (memory-mapped PIO, parallel GPIO)
//! - Analog front-end trigger/rate registers
//! - Displays (video RAM, SH1106 OLED)
//! - Keypad settings controller
//! - Synthetic signal generator for bench use

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod analog;
pub mod display;
pub mod fifo;
pub mod input;
pub mod synthetic;

#[cfg(test)]
pub(crate) mod sim;
