//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels/signals.

pub mod acquisition;
pub mod display;
pub mod keypad;

pub use acquisition::acquisition_task;
pub use display::display_task;
pub use keypad::keypad_task;
