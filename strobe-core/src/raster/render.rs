//! Capture to frame mapping
//!
//! Columns map to buffer indices by nearest-index scaling, which decimates
//! long captures and replicates short ones. Rows map amplitude linearly
//! with full scale at the top edge; anything above full scale clamps to
//! the edge so one bad sample cannot spoil the frame.

use super::frame::{Frame, FrameError};
use crate::capture::CaptureBuffer;
use crate::config::Configuration;
use crate::{Sample, SAMPLE_MAX};

/// Maps captures into frames of a fixed size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rasterizer {
    width: u16,
    height: u16,
    full_scale: Sample,
    connect: bool,
}

impl Rasterizer {
    /// Create a rasterizer for a `width` x `height` region
    pub fn new(width: u16, height: u16) -> Result<Self, FrameError> {
        Frame::check(width, height)?;
        Ok(Self {
            width,
            height,
            full_scale: SAMPLE_MAX,
            connect: true,
        })
    }

    /// Set the amplitude drawn at the top edge
    pub fn with_full_scale(mut self, full_scale: Sample) -> Self {
        self.full_scale = full_scale.max(1);
        self
    }

    /// Join neighbouring columns with vertical spans (default on)
    pub fn with_connected_trace(mut self, connect: bool) -> Self {
        self.connect = connect;
        self
    }

    /// Output width
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Output height
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Row for an amplitude, clamped to the frame
    pub fn row_for(&self, sample: Sample) -> u16 {
        let bottom = (self.height - 1) as u32;
        let full_scale = self.full_scale as u32;
        let amplitude = (sample as u32).min(full_scale);
        let rise = (amplitude * bottom + full_scale / 2) / full_scale;
        (bottom - rise) as u16
    }

    /// Buffer index shown in `column` for a capture of `count` samples
    ///
    /// Always less than `count` when `count > 0`.
    pub fn sample_index(&self, column: u16, count: usize) -> usize {
        column as usize * count / self.width as usize
    }

    fn column_for(&self, index: usize, count: usize) -> u16 {
        let column = index * self.width as usize / count;
        column.min(self.width as usize - 1) as u16
    }

    /// Render a capture
    ///
    /// Pure: the same buffer and configuration always give the same frame.
    pub fn render<const N: usize>(
        &self,
        buffer: &CaptureBuffer<N>,
        config: &Configuration,
    ) -> Frame {
        let mut frame = Frame::blank(self.width, self.height);
        let count = buffer.len();

        let mut previous_row = None;
        if count > 0 {
            for x in 0..self.width {
                let sample = buffer
                    .get(self.sample_index(x, count))
                    .unwrap_or_default();
                let row = self.row_for(sample);
                match previous_row {
                    Some(previous) if self.connect => frame.vline(x, previous, row),
                    _ => frame.set(x, row, true),
                }
                previous_row = Some(row);
            }
        }

        let trigger_column = buffer
            .trigger_position()
            .filter(|_| count > 0)
            .map(|index| self.column_for(index, count));

        frame.annotate(
            buffer.is_overrun(),
            buffer.trigger_cause(),
            trigger_column,
            Some(self.row_for(config.trigger_level())),
        );

        frame
    }
}
