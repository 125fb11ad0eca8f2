//! Configuration type definitions
//!
//! Ranges follow the front-end hardware: a 19-bit sample rate field against
//! a 24 MHz clock, a 0-5000 mV trigger level quantized to the 8-bit sample
//! domain, and a 16-bit post-trigger delay limited to 50000 samples.

use heapless::Vec;

use crate::{Sample, SAMPLE_MAX};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Front-end clock frequency (Hz)
pub const CLOCK_FREQ_HZ: u32 = 24_000_000;

/// Width of the sample rate register field
pub const SAMPLE_RATE_BITS: u32 = 19;

/// Lowest sample rate (samples/s)
pub const MIN_SAMPLE_RATE: u32 = 1;

/// Highest sample rate the rate field can express (samples/s)
pub const MAX_SAMPLE_RATE: u32 = (1 << SAMPLE_RATE_BITS) - 1;

/// Minimum trigger level (mV)
pub const MIN_LEVEL_MV: u16 = 0;

/// Maximum trigger level (mV), corresponds to a full-scale sample
pub const MAX_LEVEL_MV: u16 = 5000;

/// Minimum trigger delay (samples)
pub const MIN_DELAY: u16 = 0;

/// Maximum trigger delay (samples)
pub const MAX_DELAY: u16 = 50000;

/// Number of samples the hardware FIFO holds (one VRAM row)
pub const FIFO_DEPTH: usize = 512;

/// Largest capture supported by the extended profile
pub const MAX_SAMPLE_SIZE: usize = 2400;

/// Samples without a qualifying edge before auto trigger free-runs
pub const DEFAULT_AUTO_TRIGGER_TIMEOUT: u32 = FIFO_DEPTH as u32;

/// Convert a level in millivolts to the sample domain (rounded)
pub fn mv_to_sample(mv: u16) -> Sample {
    let mv = mv.min(MAX_LEVEL_MV) as u32;
    let max = MAX_LEVEL_MV as u32;
    ((mv * SAMPLE_MAX as u32 + max / 2) / max) as Sample
}

/// Trigger slope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Slope {
    /// Fires when the signal climbs through the level
    #[default]
    Rising,
    /// Fires when the signal drops through the level
    Falling,
}

impl Slope {
    /// The other slope
    pub fn opposite(self) -> Self {
        match self {
            Slope::Rising => Slope::Falling,
            Slope::Falling => Slope::Rising,
        }
    }
}

/// Sample rate in samples per second, always within the 19-bit field
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SampleRate(u32);

impl SampleRate {
    /// Clamp a requested rate into range
    ///
    /// Returns the rate and whether clamping was needed.
    pub fn clamped(samples_per_s: u32) -> (Self, bool) {
        let rate = samples_per_s.clamp(MIN_SAMPLE_RATE, MAX_SAMPLE_RATE);
        (Self(rate), rate != samples_per_s)
    }

    /// Rate in samples per second
    pub fn samples_per_s(&self) -> u32 {
        self.0
    }

    /// Clock ticks between consecutive samples
    pub fn period_ticks(&self) -> u32 {
        CLOCK_FREQ_HZ / self.0
    }

    /// Sample period in nanoseconds
    pub fn period_nanos(&self) -> u64 {
        1_000_000_000 / self.0 as u64
    }
}

impl Default for SampleRate {
    fn default() -> Self {
        Self(10_000)
    }
}

/// Settings as requested by the input controller, before range checks
///
/// Signed fields let a decrement past zero be clamped instead of wrapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ConfigRequest {
    /// Sample rate (samples/s)
    pub sample_rate: u32,
    /// Trigger level (mV)
    pub trigger_level_mv: i32,
    /// Trigger slope
    pub trigger_slope: Slope,
    /// Samples to retain after the trigger
    pub trigger_delay: i32,
    /// Free-run when no edge is found
    pub auto_trigger: bool,
    /// Samples to wait for an edge before free-running
    pub auto_trigger_timeout: u32,
}

impl Default for ConfigRequest {
    fn default() -> Self {
        Configuration::default().to_request()
    }
}

/// Configuration field identifiers, used to report clamping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigField {
    SampleRate,
    TriggerLevel,
    TriggerDelay,
    AutoTriggerTimeout,
}

/// Fields that were clamped while resolving a request
///
/// Clamping is never fatal; this is informational for the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutOfRange {
    fields: Vec<ConfigField, 4>,
}

impl OutOfRange {
    fn note(&mut self, field: ConfigField, clamped: bool) {
        if clamped {
            // Capacity equals the number of fields, each noted at most once
            let _ = self.fields.push(field);
        }
    }

    /// True if any field was clamped
    pub fn any(&self) -> bool {
        !self.fields.is_empty()
    }

    /// Check whether a specific field was clamped
    pub fn contains(&self, field: ConfigField) -> bool {
        self.fields.contains(&field)
    }

    /// The clamped fields
    pub fn fields(&self) -> &[ConfigField] {
        &self.fields
    }
}

/// Capture configuration
///
/// Immutable for the duration of one capture. Construct from a
/// [`ConfigRequest`] so every field is range checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Configuration {
    sample_rate: SampleRate,
    trigger_level_mv: u16,
    trigger_slope: Slope,
    trigger_delay: u16,
    auto_trigger: bool,
    auto_trigger_timeout: u32,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            sample_rate: SampleRate::default(),
            trigger_level_mv: MAX_LEVEL_MV / 2,
            trigger_slope: Slope::Rising,
            trigger_delay: (FIFO_DEPTH / 2) as u16,
            auto_trigger: true,
            auto_trigger_timeout: DEFAULT_AUTO_TRIGGER_TIMEOUT,
        }
    }
}

impl Configuration {
    /// Resolve a request, clamping every field at its boundary
    pub fn from_request(request: &ConfigRequest) -> (Self, OutOfRange) {
        let mut out_of_range = OutOfRange::default();

        let (sample_rate, clamped) = SampleRate::clamped(request.sample_rate);
        out_of_range.note(ConfigField::SampleRate, clamped);

        let (trigger_level_mv, clamped) =
            clamp_i32(request.trigger_level_mv, MIN_LEVEL_MV, MAX_LEVEL_MV);
        out_of_range.note(ConfigField::TriggerLevel, clamped);

        let (trigger_delay, clamped) = clamp_i32(request.trigger_delay, MIN_DELAY, MAX_DELAY);
        out_of_range.note(ConfigField::TriggerDelay, clamped);

        let auto_trigger_timeout = request.auto_trigger_timeout.max(1);
        out_of_range.note(
            ConfigField::AutoTriggerTimeout,
            auto_trigger_timeout != request.auto_trigger_timeout,
        );

        let config = Self {
            sample_rate,
            trigger_level_mv,
            trigger_slope: request.trigger_slope,
            trigger_delay,
            auto_trigger: request.auto_trigger,
            auto_trigger_timeout,
        };

        (config, out_of_range)
    }

    /// The request that resolves to this configuration unchanged
    pub fn to_request(&self) -> ConfigRequest {
        ConfigRequest {
            sample_rate: self.sample_rate.samples_per_s(),
            trigger_level_mv: self.trigger_level_mv as i32,
            trigger_slope: self.trigger_slope,
            trigger_delay: self.trigger_delay as i32,
            auto_trigger: self.auto_trigger,
            auto_trigger_timeout: self.auto_trigger_timeout,
        }
    }

    /// Sample rate
    pub fn sample_rate(&self) -> SampleRate {
        self.sample_rate
    }

    /// Clock ticks per sample
    pub fn sample_period_ticks(&self) -> u32 {
        self.sample_rate.period_ticks()
    }

    /// Trigger level (mV)
    pub fn trigger_level_mv(&self) -> u16 {
        self.trigger_level_mv
    }

    /// Trigger level quantized to the sample domain
    pub fn trigger_level(&self) -> Sample {
        mv_to_sample(self.trigger_level_mv)
    }

    /// Trigger slope
    pub fn trigger_slope(&self) -> Slope {
        self.trigger_slope
    }

    /// Samples to collect after the trigger
    pub fn trigger_delay(&self) -> u16 {
        self.trigger_delay
    }

    /// Whether the detector free-runs after the timeout
    pub fn auto_trigger(&self) -> bool {
        self.auto_trigger
    }

    /// Samples without an edge before auto trigger fires
    pub fn auto_trigger_timeout(&self) -> u32 {
        self.auto_trigger_timeout
    }
}

fn clamp_i32(value: i32, min: u16, max: u16) -> (u16, bool) {
    let clamped = value.clamp(min as i32, max as i32);
    (clamped as u16, clamped != value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> ConfigRequest {
        ConfigRequest::default()
    }

    #[test]
    fn test_default_round_trips_without_clamping() {
        let (config, out_of_range) = Configuration::from_request(&request());
        assert_eq!(config, Configuration::default());
        assert!(!out_of_range.any());
    }

    #[test]
    fn test_level_clamped_not_wrapped() {
        let mut req = request();
        req.trigger_level_mv = -20;
        let (config, out_of_range) = Configuration::from_request(&req);
        assert_eq!(config.trigger_level_mv(), 0);
        assert!(out_of_range.contains(ConfigField::TriggerLevel));

        req.trigger_level_mv = 70_000;
        let (config, _) = Configuration::from_request(&req);
        assert_eq!(config.trigger_level_mv(), MAX_LEVEL_MV);
    }

    #[test]
    fn test_delay_clamped() {
        let mut req = request();
        req.trigger_delay = 65_535;
        let (config, out_of_range) = Configuration::from_request(&req);
        assert_eq!(config.trigger_delay(), MAX_DELAY);
        assert_eq!(out_of_range.fields(), &[ConfigField::TriggerDelay]);
    }

    #[test]
    fn test_sample_rate_clamped_to_field_width() {
        let mut req = request();
        req.sample_rate = 1 << 20;
        let (config, out_of_range) = Configuration::from_request(&req);
        assert_eq!(config.sample_rate().samples_per_s(), MAX_SAMPLE_RATE);
        assert!(out_of_range.contains(ConfigField::SampleRate));

        req.sample_rate = 0;
        let (config, _) = Configuration::from_request(&req);
        assert_eq!(config.sample_rate().samples_per_s(), MIN_SAMPLE_RATE);
    }

    #[test]
    fn test_zero_timeout_raised_to_one() {
        let mut req = request();
        req.auto_trigger_timeout = 0;
        let (config, out_of_range) = Configuration::from_request(&req);
        assert_eq!(config.auto_trigger_timeout(), 1);
        assert!(out_of_range.contains(ConfigField::AutoTriggerTimeout));
    }

    #[test]
    fn test_period_ticks() {
        let (rate, _) = SampleRate::clamped(1_000_000 / 1000);
        assert_eq!(rate.period_ticks(), 24_000);
        assert_eq!(rate.period_nanos(), 1_000_000);
    }

    #[test]
    fn test_level_quantization() {
        assert_eq!(mv_to_sample(0), 0);
        assert_eq!(mv_to_sample(MAX_LEVEL_MV), SAMPLE_MAX);
        assert_eq!(mv_to_sample(2500), 128);
        assert_eq!(mv_to_sample(60_000), SAMPLE_MAX);
    }
}
