//! Capture state machine
//!
//! Every capture moves through Idle, Armed, Triggered and Complete. The
//! transition table is explicit, finite and deterministic; the capture
//! buffer holds the authoritative instance.

pub mod events;
pub mod machine;

pub use events::Event;
pub use machine::CaptureState;
