//! Sample source trait

use crate::Sample;

/// Trait for the sample FIFO
///
/// Implementations wrap the ADC FIFO, whether memory mapped, wired to
/// GPIO, or synthetic.
pub trait SampleSource {
    /// Take the next sample if the FIFO reports data ready
    ///
    /// Never blocks. Each `Some` consumes one queued sample.
    fn poll(&mut self) -> Option<Sample>;

    /// Check the FIFO-full flag
    ///
    /// Takes `&mut self` because reading a status register may have side
    /// effects on some buses.
    fn is_full(&mut self) -> bool;
}

impl<T: SampleSource + ?Sized> SampleSource for &mut T {
    fn poll(&mut self) -> Option<Sample> {
        (**self).poll()
    }

    fn is_full(&mut self) -> bool {
        (**self).is_full()
    }
}
