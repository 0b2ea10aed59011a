//! Render mode state machine
//!
//! Decides how each cycle reaches the display. The machine is explicit,
//! finite and deterministic.

pub mod events;
pub mod machine;

pub use events::Event;
pub use machine::{ErrorKind, RenderMode};
