//! Board-agnostic core logic for the T-Minus countdown clock
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Calendar instants and epoch arithmetic
//! - Borrowed setting text
//! - Countdown engine and display text layout
//! - Render mode state machine
//! - Settings parser and configuration types
//! - Collaborator traits (time source, segment display)
//! - Render loop driver and error hold

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod config;
pub mod countdown;
pub mod driver;
pub mod error;
pub mod state;
pub mod text;
pub mod time;
pub mod traits;

pub use driver::{error_hold, Driver, STEADY_REFRESH_MS};
pub use error::{AssociationError, Fault};
pub use text::Text;
