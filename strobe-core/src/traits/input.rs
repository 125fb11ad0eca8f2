//! Input controller trait

use crate::config::ConfigRequest;

/// Trait for the user-facing settings source
///
/// The request is raw; the acquisition side clamps it into a
/// [`Configuration`](crate::config::Configuration).
pub trait InputController {
    /// Read the current settings
    fn read_config(&mut self) -> ConfigRequest;

    /// Check (and clear) whether the settings changed since the last call
    ///
    /// A change restarts the capture with the new configuration.
    fn take_changed(&mut self) -> bool {
        false
    }
}
