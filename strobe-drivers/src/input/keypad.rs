//! Keypad settings editor
//!
//! Menu cycles through the settings, Up and Down adjust the selected one,
//! Left and Right shrink or grow the step used for numeric settings.
//! Every edit is passed back through [`Configuration`] so the held request
//! is always in range.

use strobe_core::config::{ConfigRequest, Configuration};
use strobe_core::traits::InputController;
use strobe_hal::gpio::InputPin;

/// Front-panel keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Key {
    Menu,
    Up,
    Down,
    Left,
    Right,
    /// Unrecognized key code
    Illegal,
}

impl Key {
    /// Decode a key code from the keypad controller
    pub fn from_code(code: u8) -> Self {
        match code {
            0 => Key::Menu,
            1 => Key::Up,
            2 => Key::Down,
            3 => Key::Left,
            4 => Key::Right,
            _ => Key::Illegal,
        }
    }

    /// Key code as reported by the keypad controller
    pub fn code(self) -> u8 {
        match self {
            Key::Menu => 0,
            Key::Up => 1,
            Key::Down => 2,
            Key::Left => 3,
            Key::Right => 4,
            Key::Illegal => 6,
        }
    }
}

/// Setting currently selected for editing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Setting {
    #[default]
    SampleRate,
    TriggerLevel,
    TriggerSlope,
    TriggerDelay,
    AutoTrigger,
}

impl Setting {
    /// The setting after this one, wrapping around
    pub fn next(self) -> Self {
        match self {
            Setting::SampleRate => Setting::TriggerLevel,
            Setting::TriggerLevel => Setting::TriggerSlope,
            Setting::TriggerSlope => Setting::TriggerDelay,
            Setting::TriggerDelay => Setting::AutoTrigger,
            Setting::AutoTrigger => Setting::SampleRate,
        }
    }
}

/// Step multipliers selectable with Left/Right
const STEPS: [i32; 4] = [1, 10, 100, 1000];

/// Trigger level change per step unit (mV)
const LEVEL_STEP_MV: i32 = 10;

/// Next value above `rate` in the 1-2-5 sequence
fn rate_up(rate: u32) -> u32 {
    let mut decade: u64 = 1;
    loop {
        for m in [1, 2, 5] {
            let v = m * decade;
            if v > rate as u64 {
                return v.min(u32::MAX as u64) as u32;
            }
        }
        decade *= 10;
    }
}

/// Next value below `rate` in the 1-2-5 sequence, never below 1
fn rate_down(rate: u32) -> u32 {
    let mut best = 1;
    let mut decade: u64 = 1;
    while decade < rate as u64 {
        for m in [1, 2, 5] {
            let v = m * decade;
            if v < rate as u64 {
                best = v as u32;
            }
        }
        decade *= 10;
    }
    best
}

/// Settings editor holding the current request
#[derive(Debug, Clone)]
pub struct KeypadSettings {
    request: ConfigRequest,
    selected: Setting,
    step: usize,
    changed: bool,
}

impl KeypadSettings {
    /// Start from `initial`, clamped into range
    pub fn new(initial: ConfigRequest) -> Self {
        let (config, _) = Configuration::from_request(&initial);
        Self {
            request: config.to_request(),
            selected: Setting::default(),
            step: 0,
            changed: false,
        }
    }

    pub fn selected(&self) -> Setting {
        self.selected
    }

    /// Current step multiplier
    pub fn step(&self) -> i32 {
        STEPS[self.step]
    }

    pub fn request(&self) -> &ConfigRequest {
        &self.request
    }

    /// Apply one key press
    ///
    /// Returns true if the settings changed.
    pub fn press(&mut self, key: Key) -> bool {
        match key {
            Key::Menu => {
                self.selected = self.selected.next();
                false
            }
            Key::Left => {
                self.step = self.step.saturating_sub(1);
                false
            }
            Key::Right => {
                self.step = (self.step + 1).min(STEPS.len() - 1);
                false
            }
            Key::Up => self.adjust(1),
            Key::Down => self.adjust(-1),
            Key::Illegal => false,
        }
    }

    fn adjust(&mut self, direction: i32) -> bool {
        let mut edited = self.request;
        let step = self.step();

        match self.selected {
            Setting::SampleRate => {
                edited.sample_rate = if direction > 0 {
                    rate_up(edited.sample_rate)
                } else {
                    rate_down(edited.sample_rate)
                };
            }
            Setting::TriggerLevel => {
                edited.trigger_level_mv = edited
                    .trigger_level_mv
                    .saturating_add(direction * LEVEL_STEP_MV * step);
            }
            Setting::TriggerSlope => {
                edited.trigger_slope = edited.trigger_slope.opposite();
            }
            Setting::TriggerDelay => {
                edited.trigger_delay = edited.trigger_delay.saturating_add(direction * step);
            }
            Setting::AutoTrigger => {
                edited.auto_trigger = !edited.auto_trigger;
            }
        }

        let (config, _) = Configuration::from_request(&edited);
        let edited = config.to_request();
        if edited == self.request {
            return false;
        }

        #[cfg(feature = "defmt")]
        defmt::debug!("Setting {} changed", self.selected);

        self.request = edited;
        self.changed = true;
        true
    }
}

impl Default for KeypadSettings {
    fn default() -> Self {
        Self::new(ConfigRequest::default())
    }
}

impl InputController for KeypadSettings {
    fn read_config(&mut self) -> ConfigRequest {
        self.request
    }

    fn take_changed(&mut self) -> bool {
        core::mem::take(&mut self.changed)
    }
}

/// Five key lines, one per key, read as active high
///
/// Reports a key once on the poll where its line goes high.
pub struct KeyLines<P> {
    /// Menu, Up, Down, Left, Right
    lines: [P; 5],
    held: [bool; 5],
}

impl<P: InputPin> KeyLines<P> {
    pub fn new(lines: [P; 5]) -> Self {
        Self {
            lines,
            held: [false; 5],
        }
    }

    /// Poll the lines, returning the lowest-coded newly pressed key
    pub fn scan(&mut self) -> Option<Key> {
        let mut pressed = None;
        for (code, (line, held)) in self.lines.iter().zip(self.held.iter_mut()).enumerate() {
            let high = line.is_high();
            if high && !*held && pressed.is_none() {
                pressed = Some(Key::from_code(code as u8));
            }
            *held = high;
        }
        pressed
    }
}
