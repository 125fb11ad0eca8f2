//! Capture storage
//!
//! The capture buffer is a fixed-size ring that keeps the most recent
//! pre-trigger history while armed, then fills a bounded post-trigger tail.
//! The overrun monitor watches the sample source for a FIFO that stays
//! full without delivering data.

pub mod buffer;
pub mod overrun;

pub use buffer::{CaptureBuffer, CaptureError, ExtendedCapture, FifoCapture};
pub use overrun::{OverrunMonitor, DEFAULT_OVERRUN_POLL_LIMIT};
