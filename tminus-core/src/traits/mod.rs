//! Collaborator traits
//!
//! These traits define the interface between the countdown logic and the
//! hardware or network that supplies time and shows text.

pub mod display;
pub mod time_source;

pub use display::{DisplayError, SegmentDisplay};
pub use time_source::{TimeSource, TimeSourceError};
