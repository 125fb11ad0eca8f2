//! Configuration types
//!
//! Scope settings are supplied by the input controller as a raw
//! [`ConfigRequest`], clamped into a [`Configuration`] that stays fixed for
//! the duration of one capture. Register addresses for memory-mapped
//! boards live in [`registers`].

pub mod registers;
pub mod types;

pub use registers::{RegisterMap, VramLayout, SAMPLE_DELAY_BITS, TRIGGER_LEVEL_BITS};
pub use types::*;
