//! Time source implementations

pub mod bridge;

pub use bridge::{BridgeLink, LinkError};
