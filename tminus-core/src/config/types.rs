//! Configuration type definitions
//!
//! These types represent the validated device configuration. They are
//! produced once at start-up from `settings.toml` and never change while
//! the device runs.

use heapless::String;

use crate::countdown::EventTarget;
use tminus_protocol::messages::{
    MAX_KEY_LEN, MAX_PASSPHRASE_LEN, MAX_SSID_LEN, MAX_USERNAME_LEN,
};

/// Hold time before restarting when the swap delay itself is unusable
pub const DEFAULT_SWAP_DELAY_S: u32 = 10;

/// Longest accepted swap delay (one day)
pub const MAX_SWAP_DELAY_S: u32 = 86_400;

/// Scroll step per percent of scroll speed
const SCROLL_STEP_MS_PER_PERCENT: u32 = 10;

/// A percentage in 1..=100
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Percent(u8);

impl Percent {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 100;

    /// Create a percentage, rejecting 0 and anything above 100
    pub fn new(value: u8) -> Option<Self> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Some(Self(value))
        } else {
            None
        }
    }

    pub fn get(&self) -> u8 {
        self.0
    }

    /// Scale `max` by this percentage, rounding to the nearest step
    ///
    /// `Percent(50).scale(15) == 8`
    pub fn scale(&self, max: u32) -> u32 {
        (max * self.0 as u32 + 50) / 100
    }
}

/// Network and time-service account credentials
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Credentials {
    pub ssid: String<MAX_SSID_LEN>,
    pub passphrase: String<MAX_PASSPHRASE_LEN>,
    pub username: String<MAX_USERNAME_LEN>,
    pub key: String<MAX_KEY_LEN>,
}

#[cfg(feature = "defmt")]
impl defmt::Format for Credentials {
    // Secrets stay out of the log
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "Credentials {{ ssid: {}, username: {} }}",
            self.ssid.as_str(),
            self.username.as_str()
        )
    }
}

/// Complete device configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountdownConfig<'a> {
    /// The event being counted down to
    pub target: EventTarget<'a>,
    /// Seconds the error indicator stays up before restarting
    pub swap_delay_s: u32,
    /// Marquee speed; higher is slower
    pub scroll_speed: Percent,
    /// Display brightness
    pub brightness: Percent,
    pub credentials: Credentials,
}

impl CountdownConfig<'_> {
    /// Delay between marquee steps
    pub fn scroll_step_ms(&self) -> u32 {
        self.scroll_speed.get() as u32 * SCROLL_STEP_MS_PER_PERCENT
    }
}
