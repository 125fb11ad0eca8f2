//! Trigger detection
//!
//! Edge triggering compares consecutive samples against the configured
//! level. Auto triggering fires after a configurable number of samples so
//! the display never stalls on a signal that never crosses.

pub mod detector;

pub use detector::{crossed, evaluate, TriggerCause, TriggerDetector};
