//! Level/slope trigger detector

use crate::config::{Configuration, Slope};
use crate::Sample;

/// Why a capture was triggered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TriggerCause {
    /// Signal crossed the level on the configured slope
    Edge,
    /// Auto-trigger timeout expired without an edge
    Auto,
}

/// Slope crossing test
///
/// Rising fires when `previous < level <= current`, falling when
/// `previous >= level > current`. Equality only counts on the incoming
/// side, so a flat signal sitting on the level never fires.
pub fn crossed(previous: Sample, current: Sample, level: Sample, slope: Slope) -> bool {
    match slope {
        Slope::Rising => previous < level && level <= current,
        Slope::Falling => previous >= level && level > current,
    }
}

/// Evaluate a sample pair against a configuration
pub fn evaluate(previous: Sample, current: Sample, config: &Configuration) -> bool {
    crossed(
        previous,
        current,
        config.trigger_level(),
        config.trigger_slope(),
    )
}

/// Stateful detector fed one sample per tick
///
/// Tracks the predecessor sample and how long it has waited since arming.
#[derive(Debug, Clone, Default)]
pub struct TriggerDetector {
    previous: Option<Sample>,
    waited: u32,
}

impl TriggerDetector {
    /// Create a detector with no sample history
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget history; called when a capture is armed
    pub fn reset(&mut self) {
        self.previous = None;
        self.waited = 0;
    }

    /// Samples observed since the last reset
    pub fn samples_waited(&self) -> u32 {
        self.waited
    }

    /// Feed the next sample
    ///
    /// The first sample after a reset has no predecessor and can only fire
    /// through auto trigger.
    pub fn observe(&mut self, sample: Sample, config: &Configuration) -> Option<TriggerCause> {
        let previous = self.previous.replace(sample);
        self.waited = self.waited.saturating_add(1);

        if let Some(previous) = previous {
            if evaluate(previous, sample, config) {
                return Some(TriggerCause::Edge);
            }
        }

        if config.auto_trigger() && self.waited >= config.auto_trigger_timeout() {
            return Some(TriggerCause::Auto);
        }

        None
    }
}
