//! FIFO overrun detection

/// Consecutive full, empty-handed polls that constitute an overrun
pub const DEFAULT_OVERRUN_POLL_LIMIT: u8 = 5;

/// Tracks how long the sample source has been full without delivering
#[derive(Debug, Clone)]
pub struct OverrunMonitor {
    limit: u8,
    consecutive: u8,
}

impl Default for OverrunMonitor {
    fn default() -> Self {
        Self::new(DEFAULT_OVERRUN_POLL_LIMIT)
    }
}

impl OverrunMonitor {
    /// Create a monitor that trips after `limit` consecutive full polls
    pub fn new(limit: u8) -> Self {
        Self {
            limit: limit.max(1),
            consecutive: 0,
        }
    }

    /// Record the outcome of one poll
    ///
    /// Returns true once the source has reported full on `limit`
    /// consecutive polls that produced no sample. Any delivered sample or
    /// non-full poll breaks the run.
    pub fn observe(&mut self, delivered: bool, full: bool) -> bool {
        if delivered || !full {
            self.consecutive = 0;
            return false;
        }

        self.consecutive = self.consecutive.saturating_add(1);
        self.consecutive >= self.limit
    }

    /// Clear the current run
    pub fn reset(&mut self) {
        self.consecutive = 0;
    }

    /// Length of the current run of full polls
    pub fn consecutive(&self) -> u8 {
        self.consecutive
    }

    /// Configured trip limit
    pub fn limit(&self) -> u8 {
        self.limit
    }
}
