//! Acquisition control
//!
//! The controller runs one capture at a time: each tick it polls the
//! sample source, feeds the trigger detector and fills the capture buffer.
//! A finished capture is rasterized, handed to the display and then
//! acknowledged before the next one starts.

pub mod controller;

pub use controller::{AcquisitionController, AcquisitionStats, Completion, TickOutcome};
