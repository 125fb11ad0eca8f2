//! Events that trigger capture state transitions

/// Events that can trigger state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// Capture start requested (also cancels an in-progress capture)
    Start,
    /// Trigger detector fired
    TriggerFired,
    /// Post-trigger sample count reached
    PostTriggerFilled,
    /// Buffer ran out of room before the post-trigger count was reached
    CapacityExhausted,
    /// Sample source stayed full without delivering data
    Overrun,
    /// Finished capture was consumed by the rasterizer
    Acknowledge,
}

impl Event {
    /// Check if this event ends a capture
    pub fn is_completion(&self) -> bool {
        matches!(
            self,
            Event::PostTriggerFilled | Event::CapacityExhausted | Event::Overrun
        )
    }
}
