//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in tminus-core:
//!
//! - Segment display: chained HT16K33 quad alphanumeric backpacks (I2C)
//! - Time source: Wi-Fi bridge coprocessor link (UART)

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod display;
pub mod link;
