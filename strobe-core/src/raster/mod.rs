//! Waveform rasterization
//!
//! Turns a completed capture into a binary [`Frame`] ready for the display.

pub mod frame;
pub mod render;

pub use frame::{Frame, FrameError, DISPLAY_HEIGHT, DISPLAY_WIDTH, MAX_FRAME_BYTES};
pub use render::Rasterizer;
