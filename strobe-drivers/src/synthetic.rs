//! Synthetic signal generator
//!
//! Stands in for the FIFO on a bench with no analog front end attached.
//! Produces one sample per poll from a periodic waveform and can be told
//! to stall with the FIFO reporting full, which is how an overrun looks
//! from the controller's side.

use strobe_core::traits::SampleSource;
use strobe_core::Sample;

/// Generated waveform shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Waveform {
    /// Constant at `low`
    Flat,
    /// `low` for the first half period, `high` for the second
    Square,
    /// `low` to `high` and back over one period
    Triangle,
    /// `low` to `high`, then drop back
    Sawtooth,
}

/// Periodic sample generator
#[derive(Debug, Clone)]
pub struct SyntheticSource {
    waveform: Waveform,
    low: Sample,
    high: Sample,
    period: u32,
    phase: u32,
    stalled: u32,
}

impl SyntheticSource {
    /// Create a generator swinging between `low` and `high` every `period` samples
    pub fn new(waveform: Waveform, low: Sample, high: Sample, period: u32) -> Self {
        let (low, high) = if low <= high { (low, high) } else { (high, low) };
        Self {
            waveform,
            low,
            high,
            period: period.max(2),
            phase: 0,
            stalled: 0,
        }
    }

    /// Constant signal
    pub fn flat(level: Sample) -> Self {
        Self::new(Waveform::Flat, level, level, 2)
    }

    /// Start `phase` samples into the period
    pub fn with_phase(mut self, phase: u32) -> Self {
        self.phase = phase % self.period;
        self
    }

    /// Deliver nothing and report full for the next `polls` polls
    pub fn inject_full(&mut self, polls: u32) {
        self.stalled = self.stalled.saturating_add(polls);
    }

    pub fn waveform(&self) -> Waveform {
        self.waveform
    }

    pub fn period(&self) -> u32 {
        self.period
    }

    /// Value at a point in the period
    pub fn value_at(&self, phase: u32) -> Sample {
        let phase = phase % self.period;
        let span = (self.high - self.low) as u32;
        let offset = match self.waveform {
            Waveform::Flat => 0,
            Waveform::Square => {
                if phase < self.period / 2 {
                    0
                } else {
                    span
                }
            }
            Waveform::Sawtooth => span * phase / (self.period - 1),
            Waveform::Triangle => {
                let half = self.period / 2;
                if phase <= half {
                    span * phase / half
                } else {
                    span * (self.period - phase) / (self.period - half)
                }
            }
        };
        self.low + offset as Sample
    }
}

impl SampleSource for SyntheticSource {
    fn poll(&mut self) -> Option<Sample> {
        if self.stalled > 0 {
            return None;
        }
        let sample = self.value_at(self.phase);
        self.phase = (self.phase + 1) % self.period;
        Some(sample)
    }

    fn is_full(&mut self) -> bool {
        if self.stalled == 0 {
            return false;
        }
        self.stalled -= 1;
        true
    }
}
