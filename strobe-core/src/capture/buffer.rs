//! Pre/post-trigger capture ring
//!
//! Storage is a fixed `[Sample; N]` arena addressed by a start index and a
//! length. While armed, writes wrap inside a window of `pre_trigger`
//! samples so the most recent history is always retained. Once triggered,
//! writes append without eviction until the post-trigger target is met.

use crate::state::{CaptureState, Event};
use crate::trigger::TriggerCause;
use crate::Sample;

use crate::config::{FIFO_DEPTH, MAX_SAMPLE_SIZE};

/// Capture sized to the hardware FIFO
pub type FifoCapture = CaptureBuffer<FIFO_DEPTH>;

/// Capture sized for the extended sample memory
pub type ExtendedCapture = CaptureBuffer<MAX_SAMPLE_SIZE>;

/// Capture buffer errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CaptureError {
    /// Buffer is not armed or triggered
    NotCapturing,
    /// Buffer is complete and must be acknowledged first
    Frozen,
    /// Operation requires a completed capture
    NotComplete,
}

/// Fixed-capacity capture buffer and authoritative capture state
#[derive(Debug, Clone)]
pub struct CaptureBuffer<const N: usize> {
    samples: [Sample; N],
    start: usize,
    len: usize,
    pre_trigger: usize,
    state: CaptureState,
    trigger_index: Option<usize>,
    trigger_cause: Option<TriggerCause>,
    post_target: usize,
    post_collected: usize,
    clipped: bool,
    latest: Option<Sample>,
    overrun: bool,
}

impl<const N: usize> CaptureBuffer<N> {
    /// Create an idle buffer keeping up to `pre_trigger` samples of history
    ///
    /// `pre_trigger` is clamped to the capacity.
    pub const fn new(pre_trigger: usize) -> Self {
        let pre_trigger = if pre_trigger > N { N } else { pre_trigger };
        Self {
            samples: [0; N],
            start: 0,
            len: 0,
            pre_trigger,
            state: CaptureState::Idle,
            trigger_index: None,
            trigger_cause: None,
            post_target: 0,
            post_collected: 0,
            clipped: false,
            latest: None,
            overrun: false,
        }
    }

    /// Create a buffer splitting capacity evenly between history and tail
    pub const fn centered() -> Self {
        Self::new(N / 2)
    }

    fn clear(&mut self) {
        self.start = 0;
        self.len = 0;
        self.trigger_index = None;
        self.trigger_cause = None;
        self.post_target = 0;
        self.post_collected = 0;
        self.clipped = false;
        self.latest = None;
        self.overrun = false;
    }

    fn apply(&mut self, event: Event) {
        self.state = self.state.transition(event);
    }

    /// Discard any contents and start filling the pre-trigger ring
    pub fn arm(&mut self) {
        self.clear();
        self.apply(Event::Start);
    }

    /// Store one sample
    ///
    /// Returns the completion event if this sample finished the capture.
    pub fn push(&mut self, sample: Sample) -> Result<Option<Event>, CaptureError> {
        match self.state {
            CaptureState::Armed => {
                self.push_ring(sample);
                Ok(None)
            }
            CaptureState::Triggered => Ok(self.push_tail(sample)),
            CaptureState::Complete => Err(CaptureError::Frozen),
            CaptureState::Idle => Err(CaptureError::NotCapturing),
        }
    }

    fn push_ring(&mut self, sample: Sample) {
        if self.pre_trigger == 0 {
            // No history window; only the newest sample is held for the trigger
            self.latest = Some(sample);
            return;
        }
        let slot = (self.start + self.len) % N;
        self.samples[slot] = sample;
        if self.len < self.pre_trigger {
            self.len += 1;
        } else {
            // Window full: the slot just written held the oldest sample
            self.start = (self.start + 1) % N;
        }
    }

    fn push_tail(&mut self, sample: Sample) -> Option<Event> {
        if self.len < N {
            let slot = (self.start + self.len) % N;
            self.samples[slot] = sample;
            self.len += 1;
            self.post_collected += 1;
        }
        self.check_tail()
    }

    fn check_tail(&mut self) -> Option<Event> {
        if self.post_collected < self.post_target {
            return None;
        }
        let event = self.completion_event();
        self.apply(event);
        Some(event)
    }

    fn completion_event(&self) -> Event {
        if self.clipped {
            Event::CapacityExhausted
        } else {
            Event::PostTriggerFilled
        }
    }

    /// Mark the most recent sample as the trigger point
    ///
    /// The post-trigger target is `delay` bounded by the room left. A zero
    /// target completes immediately, in which case the completion event is
    /// returned. A capture whose target was cut by capacity completes with
    /// [`Event::CapacityExhausted`].
    ///
    /// With no history window the triggering sample still becomes the
    /// first sample of the capture.
    pub fn trigger(
        &mut self,
        cause: TriggerCause,
        delay: usize,
    ) -> Result<Option<Event>, CaptureError> {
        match self.state {
            CaptureState::Armed => {}
            CaptureState::Complete => return Err(CaptureError::Frozen),
            _ => return Err(CaptureError::NotCapturing),
        }

        if self.len == 0 {
            if let Some(sample) = self.latest.take() {
                self.samples[self.start] = sample;
                self.len = 1;
            }
        }

        let room = N - self.len;
        self.trigger_index = self.len.checked_sub(1);
        self.trigger_cause = Some(cause);
        self.post_target = delay.min(room);
        self.post_collected = 0;
        self.clipped = delay > room;
        self.apply(Event::TriggerFired);

        if self.post_target == 0 {
            let event = self.completion_event();
            self.apply(event);
            return Ok(Some(event));
        }

        Ok(None)
    }

    /// Freeze whatever is held and flag the capture as degraded
    pub fn force_overrun(&mut self) -> Result<(), CaptureError> {
        if !self.state.is_capturing() {
            return Err(CaptureError::NotCapturing);
        }
        self.overrun = true;
        self.apply(Event::Overrun);
        Ok(())
    }

    /// Release a completed capture and return to idle
    pub fn acknowledge(&mut self) -> Result<(), CaptureError> {
        if !self.state.is_complete() {
            return Err(CaptureError::NotComplete);
        }
        self.clear();
        self.apply(Event::Acknowledge);
        Ok(())
    }

    /// Current capture state
    pub fn state(&self) -> CaptureState {
        self.state
    }

    /// Number of samples held
    pub fn len(&self) -> usize {
        self.len
    }

    /// True if no samples are held
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Maximum number of samples
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Size of the pre-trigger history window
    pub fn pre_trigger(&self) -> usize {
        self.pre_trigger
    }

    /// Sample at chronological position `index` (0 = oldest)
    pub fn get(&self, index: usize) -> Option<Sample> {
        if index >= self.len {
            return None;
        }
        Some(self.samples[(self.start + index) % N])
    }

    /// Samples in chronological order
    pub fn iter(&self) -> impl Iterator<Item = Sample> + '_ {
        (0..self.len).map(move |i| self.samples[(self.start + i) % N])
    }

    /// Chronological position of the trigger sample
    pub fn trigger_position(&self) -> Option<usize> {
        self.trigger_index
    }

    /// What fired the trigger
    pub fn trigger_cause(&self) -> Option<TriggerCause> {
        self.trigger_cause
    }

    /// Post-trigger samples the capture was set to collect
    pub fn post_trigger_target(&self) -> usize {
        self.post_target
    }

    /// Post-trigger samples collected so far
    pub fn post_trigger_collected(&self) -> usize {
        self.post_collected
    }

    /// True if the capture was cut short by a FIFO overrun
    pub fn is_overrun(&self) -> bool {
        self.overrun
    }
}

impl<const N: usize> Default for CaptureBuffer<N> {
    fn default() -> Self {
        Self::centered()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn collect<const N: usize>(buffer: &CaptureBuffer<N>) -> std::vec::Vec<Sample> {
        buffer.iter().collect()
    }

    #[test]
    fn test_idle_rejects_samples() {
        let mut buffer = CaptureBuffer::<8>::new(4);
        assert_eq!(buffer.push(1), Err(CaptureError::NotCapturing));
        assert_eq!(buffer.state(), CaptureState::Idle);
    }

    #[test]
    fn test_ring_keeps_most_recent_history() {
        let mut buffer = CaptureBuffer::<8>::new(4);
        buffer.arm();
        for sample in 1..=10 {
            buffer.push(sample).unwrap();
        }
        assert_eq!(buffer.len(), 4);
        assert_eq!(collect(&buffer), [7, 8, 9, 10]);
    }

    #[test]
    fn test_full_capacity_ring() {
        let mut buffer = CaptureBuffer::<4>::new(4);
        buffer.arm();
        for sample in 0..9 {
            buffer.push(sample).unwrap();
        }
        assert_eq!(collect(&buffer), [5, 6, 7, 8]);
    }

    #[test]
    fn test_post_trigger_tail() {
        let mut buffer = CaptureBuffer::<8>::new(4);
        buffer.arm();
        for sample in 1..=6 {
            buffer.push(sample).unwrap();
        }
        assert_eq!(buffer.trigger(TriggerCause::Edge, 3), Ok(None));
        assert_eq!(buffer.state(), CaptureState::Triggered);
        assert_eq!(buffer.trigger_position(), Some(3));

        assert_eq!(buffer.push(7), Ok(None));
        assert_eq!(buffer.push(8), Ok(None));
        assert_eq!(buffer.push(9), Ok(Some(Event::PostTriggerFilled)));
        assert_eq!(buffer.state(), CaptureState::Complete);
        assert_eq!(collect(&buffer), [3, 4, 5, 6, 7, 8, 9]);
        assert_eq!(buffer.get(buffer.trigger_position().unwrap()), Some(6));
    }

    #[test]
    fn test_delay_bounded_by_remaining_capacity() {
        let mut buffer = CaptureBuffer::<8>::new(6);
        buffer.arm();
        for sample in 0..6 {
            buffer.push(sample).unwrap();
        }
        buffer.trigger(TriggerCause::Edge, 100).unwrap();
        assert_eq!(buffer.post_trigger_target(), 2);
        buffer.push(6).unwrap();
        assert_eq!(buffer.push(7), Ok(Some(Event::CapacityExhausted)));
        assert_eq!(buffer.len(), 8);
    }

    #[test]
    fn test_delay_exactly_filling_capacity_is_filled() {
        let mut buffer = CaptureBuffer::<8>::new(6);
        buffer.arm();
        for sample in 0..6 {
            buffer.push(sample).unwrap();
        }
        buffer.trigger(TriggerCause::Edge, 2).unwrap();
        buffer.push(6).unwrap();
        assert_eq!(buffer.push(7), Ok(Some(Event::PostTriggerFilled)));
    }

    #[test]
    fn test_zero_window_keeps_trigger_sample() {
        let mut buffer = CaptureBuffer::<16>::new(0);
        buffer.arm();
        buffer.push(10).unwrap();
        buffer.push(200).unwrap();
        assert!(buffer.is_empty());

        assert_eq!(buffer.trigger(TriggerCause::Edge, 3), Ok(None));
        assert_eq!(buffer.trigger_position(), Some(0));
        assert_eq!(buffer.get(0), Some(200));

        buffer.push(50).unwrap();
        buffer.push(51).unwrap();
        assert_eq!(buffer.push(52), Ok(Some(Event::PostTriggerFilled)));
        assert_eq!(collect(&buffer), [200, 50, 51, 52]);
    }

    #[test]
    fn test_zero_window_without_samples_has_no_marker() {
        let mut buffer = CaptureBuffer::<8>::new(0);
        buffer.arm();
        buffer.trigger(TriggerCause::Auto, 2).unwrap();
        assert_eq!(buffer.trigger_position(), None);
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_zero_delay_completes_on_trigger() {
        let mut buffer = CaptureBuffer::<8>::new(4);
        buffer.arm();
        buffer.push(1).unwrap();
        assert_eq!(
            buffer.trigger(TriggerCause::Auto, 0),
            Ok(Some(Event::PostTriggerFilled))
        );
        assert!(buffer.state().is_complete());
    }

    #[test]
    fn test_no_room_completes_as_exhausted() {
        let mut buffer = CaptureBuffer::<4>::new(4);
        buffer.arm();
        for sample in 0..4 {
            buffer.push(sample).unwrap();
        }
        assert_eq!(
            buffer.trigger(TriggerCause::Edge, 10),
            Ok(Some(Event::CapacityExhausted))
        );
    }

    #[test]
    fn test_complete_is_frozen_until_acknowledged() {
        let mut buffer = CaptureBuffer::<8>::new(4);
        buffer.arm();
        buffer.push(1).unwrap();
        buffer.trigger(TriggerCause::Edge, 0).unwrap();

        assert_eq!(buffer.push(2), Err(CaptureError::Frozen));
        assert_eq!(buffer.trigger(TriggerCause::Edge, 1), Err(CaptureError::Frozen));
        assert_eq!(collect(&buffer), [1]);

        buffer.acknowledge().unwrap();
        assert_eq!(buffer.state(), CaptureState::Idle);
        assert!(buffer.is_empty());
        assert_eq!(buffer.trigger_position(), None);
    }

    #[test]
    fn test_acknowledge_requires_complete() {
        let mut buffer = CaptureBuffer::<8>::new(4);
        buffer.arm();
        assert_eq!(buffer.acknowledge(), Err(CaptureError::NotComplete));
    }

    #[test]
    fn test_force_overrun_keeps_partial_samples() {
        let mut buffer = CaptureBuffer::<8>::new(4);
        buffer.arm();
        buffer.push(9).unwrap();
        buffer.push(8).unwrap();
        buffer.force_overrun().unwrap();
        assert!(buffer.is_overrun());
        assert!(buffer.state().is_complete());
        assert_eq!(collect(&buffer), [9, 8]);
        assert_eq!(buffer.force_overrun(), Err(CaptureError::NotCapturing));
    }

    #[test]
    fn test_rearm_discards() {
        let mut buffer = CaptureBuffer::<8>::new(4);
        buffer.arm();
        buffer.push(1).unwrap();
        buffer.trigger(TriggerCause::Edge, 5).unwrap();
        buffer.push(2).unwrap();
        buffer.arm();
        assert_eq!(buffer.state(), CaptureState::Armed);
        assert!(buffer.is_empty());
        assert_eq!(buffer.trigger_cause(), None);
    }

    #[test]
    fn test_pre_trigger_clamped_to_capacity() {
        let buffer = CaptureBuffer::<4>::new(100);
        assert_eq!(buffer.pre_trigger(), 4);
    }

    #[derive(Debug, Clone)]
    enum Op {
        Push(u8),
        Trigger(u16),
        Overrun,
        Acknowledge,
        Arm,
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            8 => any::<u8>().prop_map(Op::Push),
            1 => (0u16..64).prop_map(Op::Trigger),
            1 => Just(Op::Overrun),
            1 => Just(Op::Acknowledge),
            1 => Just(Op::Arm),
        ]
    }

    proptest! {
        #[test]
        fn prop_never_exceeds_capacity(
            pre_trigger in 0usize..40,
            ops in proptest::collection::vec(op(), 0..400),
        ) {
            let mut buffer = CaptureBuffer::<32>::new(pre_trigger);
            for op in ops {
                let _ = match op {
                    Op::Push(sample) => buffer.push(sample).map(|_| ()),
                    Op::Trigger(delay) => buffer.trigger(TriggerCause::Edge, delay as usize).map(|_| ()),
                    Op::Overrun => buffer.force_overrun(),
                    Op::Acknowledge => buffer.acknowledge(),
                    Op::Arm => {
                        buffer.arm();
                        Ok(())
                    }
                };
                prop_assert!(buffer.len() <= buffer.capacity());
                prop_assert_eq!(buffer.iter().count(), buffer.len());
                if buffer.state() == CaptureState::Armed {
                    prop_assert!(buffer.len() <= buffer.pre_trigger());
                }
            }
        }

        #[test]
        fn prop_exact_post_trigger_count(
            pre_trigger in 1usize..=32,
            history in 1usize..100,
            delay in 0usize..100,
        ) {
            let mut buffer = CaptureBuffer::<32>::new(pre_trigger);
            buffer.arm();
            for sample in 0..history {
                buffer.push(sample as u8).unwrap();
            }
            let remaining = buffer.capacity() - buffer.len();
            let mut appended = 0;
            let mut event = buffer.trigger(TriggerCause::Edge, delay).unwrap();
            while event.is_none() {
                event = buffer.push(0xAA).unwrap();
                appended += 1;
            }
            prop_assert_eq!(appended, delay.min(remaining));
            prop_assert_eq!(buffer.post_trigger_collected(), delay.min(remaining));
            let expected = if delay > remaining {
                Event::CapacityExhausted
            } else {
                Event::PostTriggerFilled
            };
            prop_assert_eq!(event, Some(expected));
        }
    }
}
