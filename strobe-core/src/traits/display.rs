//! Display output trait

use crate::raster::Frame;

/// Errors that can occur when presenting a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Bus transfer to the panel failed
    Communication,
    /// Frame does not fit the panel or video memory
    InvalidDimensions,
    /// Display not initialized
    NotInitialized,
}

/// Trait for the frame consumer
///
/// Takes the frame by value: once shown, the display owns it.
pub trait DisplayOutput {
    /// Present a finished frame
    fn show(&mut self, frame: Frame) -> Result<(), DisplayError>;

    /// Panel size in pixels (width, height)
    fn dimensions(&self) -> (u16, u16);
}
