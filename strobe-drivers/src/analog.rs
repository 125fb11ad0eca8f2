//! Analog front-end programming
//!
//! The hardware trigger comparator, sample clock divider and post-trigger
//! counter are configured through PIO registers. Programming them from the
//! same [`Configuration`] the software detector uses keeps both in step.

use strobe_core::config::{
    Configuration, RegisterMap, Slope, SAMPLE_DELAY_BITS, SAMPLE_RATE_BITS, TRIGGER_LEVEL_BITS,
};
use strobe_hal::RegisterBus;

/// Trigger and sample-rate registers
pub struct AnalogFrontEnd<B> {
    bus: B,
    map: RegisterMap,
    armed: bool,
}

impl<B: RegisterBus> AnalogFrontEnd<B> {
    /// Create the driver with the trigger disabled
    pub fn new(mut bus: B, map: RegisterMap) -> Self {
        bus.write(map.trigger_enable, 0);
        Self {
            bus,
            map,
            armed: false,
        }
    }

    /// Write every field of `config` to its register
    ///
    /// The trigger is disabled while the fields change and restored after.
    pub fn program(&mut self, config: &Configuration) {
        let was_armed = self.armed;
        self.disarm();

        self.bus.write_field(
            self.map.sample_rate,
            config.sample_rate().samples_per_s(),
            SAMPLE_RATE_BITS,
        );
        self.bus.write_field(
            self.map.trigger_level,
            config.trigger_level() as u32,
            TRIGGER_LEVEL_BITS,
        );
        self.bus.write(
            self.map.trigger_slope,
            match config.trigger_slope() {
                Slope::Rising => 0,
                Slope::Falling => 1,
            },
        );
        self.bus.write_field(
            self.map.sample_delay,
            config.trigger_delay() as u32,
            SAMPLE_DELAY_BITS,
        );
        self.bus
            .write(self.map.auto_trigger, config.auto_trigger() as u32);

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "AFE: {} S/s, level {}, delay {}",
            config.sample_rate().samples_per_s(),
            config.trigger_level(),
            config.trigger_delay()
        );

        if was_armed {
            self.arm();
        }
    }

    /// Enable the hardware trigger
    pub fn arm(&mut self) {
        self.bus.write(self.map.trigger_enable, 1);
        self.armed = true;
    }

    /// Disable the hardware trigger
    pub fn disarm(&mut self) {
        self.bus.write(self.map.trigger_enable, 0);
        self.armed = false;
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Tear down and return the bus
    pub fn release(self) -> B {
        self.bus
    }
}
