//! Acquisition controller
//!
//! Owns the sample source, trigger detector, overrun monitor and the single
//! capture buffer. Nothing here blocks: a tick either yields a sample or it
//! does not, and the controller moves on.

use crate::capture::{CaptureBuffer, CaptureError, OverrunMonitor};
use crate::config::{Configuration, OutOfRange};
use crate::raster::Rasterizer;
use crate::state::{CaptureState, Event};
use crate::traits::{DisplayError, DisplayOutput, InputController, SampleSource};
use crate::trigger::{TriggerCause, TriggerDetector};
use crate::Sample;

/// Why a capture finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Completion {
    /// All post-trigger samples collected
    PostTriggerFilled,
    /// Buffer filled before the post-trigger count was reached
    CapacityExhausted,
    /// FIFO stayed full without delivering; capture is degraded
    Overrun,
}

impl Completion {
    fn from_event(event: Event) -> Option<Self> {
        match event {
            Event::PostTriggerFilled => Some(Completion::PostTriggerFilled),
            Event::CapacityExhausted => Some(Completion::CapacityExhausted),
            Event::Overrun => Some(Completion::Overrun),
            _ => None,
        }
    }
}

/// Result of one acquisition tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TickOutcome {
    /// Not capturing (idle, or complete and awaiting acknowledgment)
    Idle,
    /// Source had no sample this tick
    NoData,
    /// Sample stored
    Sampled,
    /// Sample stored and the trigger fired
    Triggered(TriggerCause),
    /// Capture finished on this tick
    Completed(Completion),
}

/// Running totals since construction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AcquisitionStats {
    /// Captures that reached Complete
    pub completed: u32,
    /// Captures completed early by overrun
    pub overruns: u32,
    /// Captures discarded by a restart
    pub cancelled: u32,
    /// Captures triggered by the auto-trigger timeout
    pub auto_triggered: u32,
}

/// Capture state machine driver
pub struct AcquisitionController<S, const N: usize> {
    source: S,
    buffer: CaptureBuffer<N>,
    detector: TriggerDetector,
    overrun: OverrunMonitor,
    config: Configuration,
    stats: AcquisitionStats,
}

impl<S: SampleSource, const N: usize> AcquisitionController<S, N> {
    /// Create an idle controller keeping `pre_trigger` samples of history
    pub fn new(source: S, pre_trigger: usize) -> Self {
        Self {
            source,
            buffer: CaptureBuffer::new(pre_trigger),
            detector: TriggerDetector::new(),
            overrun: OverrunMonitor::default(),
            config: Configuration::default(),
            stats: AcquisitionStats::default(),
        }
    }

    /// Replace the overrun monitor's trip limit
    pub fn with_overrun_limit(mut self, limit: u8) -> Self {
        self.overrun = OverrunMonitor::new(limit);
        self
    }

    /// Start a capture with `config`
    ///
    /// An armed or triggered capture is discarded, as is a completed one
    /// that was never acknowledged. Returns true if a capture was dropped.
    pub fn start(&mut self, config: Configuration) -> bool {
        let discarded = self.buffer.state() != CaptureState::Idle;
        if discarded {
            self.stats.cancelled = self.stats.cancelled.saturating_add(1);
        }

        self.config = config;
        self.detector.reset();
        self.overrun.reset();
        self.buffer.arm();
        discarded
    }

    /// Restart with the current configuration
    pub fn restart(&mut self) -> bool {
        self.start(self.config)
    }

    /// Pull new settings from the input controller if they changed
    ///
    /// The new configuration restarts the capture. Returns the clamping
    /// record when a change was applied.
    pub fn reconfigure<I: InputController>(&mut self, input: &mut I) -> Option<OutOfRange> {
        if !input.take_changed() {
            return None;
        }

        let (config, out_of_range) = Configuration::from_request(&input.read_config());
        #[cfg(feature = "defmt")]
        if out_of_range.any() {
            defmt::warn!("settings clamped: {}", out_of_range.fields());
        }
        self.start(config);
        Some(out_of_range)
    }

    /// Run one sample tick
    pub fn tick(&mut self) -> TickOutcome {
        if !self.buffer.state().is_capturing() {
            return TickOutcome::Idle;
        }

        let sample = self.source.poll();
        let full = sample.is_none() && self.source.is_full();

        if self.overrun.observe(sample.is_some(), full) {
            return self.complete_overrun();
        }

        let Some(sample) = sample else {
            return TickOutcome::NoData;
        };

        match self.buffer.state() {
            CaptureState::Armed => self.armed_sample(sample),
            CaptureState::Triggered => match self.buffer.push(sample) {
                Ok(Some(event)) => self.completed(event),
                Ok(None) => TickOutcome::Sampled,
                Err(_) => TickOutcome::Idle,
            },
            _ => TickOutcome::Idle,
        }
    }

    fn armed_sample(&mut self, sample: Sample) -> TickOutcome {
        if self.buffer.push(sample).is_err() {
            return TickOutcome::Idle;
        }

        let Some(cause) = self.detector.observe(sample, &self.config) else {
            return TickOutcome::Sampled;
        };

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "trigger {} after {} samples",
            cause,
            self.detector.samples_waited()
        );

        if cause == TriggerCause::Auto {
            self.stats.auto_triggered = self.stats.auto_triggered.saturating_add(1);
        }

        match self
            .buffer
            .trigger(cause, self.config.trigger_delay() as usize)
        {
            Ok(Some(event)) => self.completed(event),
            Ok(None) => TickOutcome::Triggered(cause),
            Err(_) => TickOutcome::Idle,
        }
    }

    fn complete_overrun(&mut self) -> TickOutcome {
        #[cfg(feature = "defmt")]
        defmt::warn!(
            "FIFO overrun, completing with {} samples",
            self.buffer.len()
        );

        self.overrun.reset();
        match self.buffer.force_overrun() {
            Ok(()) => {
                self.stats.overruns = self.stats.overruns.saturating_add(1);
                self.completed(Event::Overrun)
            }
            Err(_) => TickOutcome::Idle,
        }
    }

    fn completed(&mut self, event: Event) -> TickOutcome {
        if event.is_completion() {
            self.stats.completed = self.stats.completed.saturating_add(1);
        }
        match Completion::from_event(event) {
            Some(completion) => TickOutcome::Completed(completion),
            None => TickOutcome::Sampled,
        }
    }

    /// The finished capture, only while Complete
    pub fn capture(&self) -> Option<&CaptureBuffer<N>> {
        self.buffer.state().is_complete().then_some(&self.buffer)
    }

    /// Release the finished capture back to Idle
    pub fn acknowledge(&mut self) -> Result<(), CaptureError> {
        self.buffer.acknowledge()
    }

    /// Rasterize the finished capture, hand it to the display, acknowledge
    ///
    /// Returns Ok(false) if there was nothing to present. The capture is
    /// released even when the display fails so acquisition can continue.
    pub fn present<D: DisplayOutput>(
        &mut self,
        rasterizer: &Rasterizer,
        display: &mut D,
    ) -> Result<bool, DisplayError> {
        let Some(capture) = self.capture() else {
            return Ok(false);
        };

        let frame = rasterizer.render(capture, &self.config);
        let shown = display.show(frame);
        let released = self.acknowledge();
        debug_assert!(released.is_ok());
        shown.map(|()| true)
    }

    /// Current capture state
    pub fn state(&self) -> CaptureState {
        self.buffer.state()
    }

    /// Configuration of the current capture
    pub fn config(&self) -> &Configuration {
        &self.config
    }

    /// Running totals
    pub fn stats(&self) -> AcquisitionStats {
        self.stats
    }

    /// Samples currently held
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    /// Access the sample source
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Tear down and return the sample source
    pub fn into_source(self) -> S {
        self.source
    }
}
