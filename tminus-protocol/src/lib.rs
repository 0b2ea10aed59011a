//! Bridge link protocol
//!
//! This crate defines the UART protocol between the countdown controller
//! (RP2040) and the Wi-Fi bridge coprocessor. The bridge owns network
//! association and cloud time polling; the controller only asks it to
//! join and then requests the current time once per display cycle.
//!
//! # Protocol Overview
//!
//! Every message travels in one binary frame:
//! ```text
//! ┌──────┬────────┬──────┬─────────────┬─────┐
//! │ SYNC │ LENGTH │ KIND │ PAYLOAD     │ XOR │
//! │ 1B   │ 1B     │ 1B   │ 0–240B      │ 1B  │
//! └──────┴────────┴──────┴─────────────┴─────┘
//! ```
//!
//! Requests carry a sequence number so the controller can discard
//! answers to requests that already timed out.

#![no_std]
#![deny(unsafe_code)]

pub mod frame;
pub mod messages;
pub mod reasons;

pub use frame::{Frame, FrameError, FrameParser, LINK_SYNC, MAX_PAYLOAD_SIZE};
pub use messages::{BridgeMessage, ControllerMessage, WallTime};
pub use reasons::{JoinFailure, TimeFault};
