//! User input
//!
//! Five front-panel keys drive a small settings editor that acts as the
//! scope's [`InputController`](strobe_core::traits::InputController).

pub mod keypad;

pub use keypad::{Key, KeyLines, KeypadSettings, Setting};
