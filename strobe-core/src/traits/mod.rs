//! Hardware capability traits
//!
//! These traits define the interface between the acquisition logic
//! and the hardware-specific implementations in `strobe-drivers`.

pub mod display;
pub mod input;
pub mod source;

pub use display::{DisplayError, DisplayOutput};
pub use input::InputController;
pub use source::SampleSource;
