//! Capture state definition

use super::events::Event;

/// Capture states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CaptureState {
    /// No capture in progress
    #[default]
    Idle,
    /// Filling the pre-trigger ring, waiting for the trigger
    Armed,
    /// Trigger seen, collecting post-trigger samples
    Triggered,
    /// Capture frozen, waiting to be consumed
    Complete,
}

impl CaptureState {
    /// Check if samples are being collected
    pub fn is_capturing(&self) -> bool {
        matches!(self, CaptureState::Armed | CaptureState::Triggered)
    }

    /// Check if a finished capture is waiting to be consumed
    pub fn is_complete(&self) -> bool {
        matches!(self, CaptureState::Complete)
    }

    /// Process an event and return the next state
    pub fn transition(self, event: Event) -> Self {
        use CaptureState::*;
        use Event::*;

        match (self, event) {
            // Start always re-arms; an in-progress or unconsumed capture is discarded
            (_, Start) => Armed,

            // Armed transitions
            (Armed, TriggerFired) => Triggered,
            (Armed, Overrun) => Complete,

            // Triggered transitions
            (Triggered, PostTriggerFilled) => Complete,
            (Triggered, CapacityExhausted) => Complete,
            (Triggered, Overrun) => Complete,

            // Complete transitions
            (Complete, Acknowledge) => Idle,

            // Default: stay in current state
            _ => self,
        }
    }
}
