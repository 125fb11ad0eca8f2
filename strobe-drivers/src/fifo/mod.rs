//! Sample FIFO drivers
//!
//! Both drivers read the head sample when the FIFO signals data ready and
//! then strobe the read clock to advance it.

pub mod mapped;
pub mod parallel;

pub use mapped::MappedFifo;
pub use parallel::ParallelFifo;
