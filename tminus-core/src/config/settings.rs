//! `settings.toml` reader
//!
//! A minimal parser for the flat key/value subset of TOML the device reads
//! its settings from. It does NOT support the full TOML spec.
//!
//! Supported:
//! - `KEY = value` lines
//! - Decimal integers with an optional sign
//! - Double-quoted strings with `\"`, `\\`, `\n` and `\t` escapes
//! - Comments (`# ...`) on their own line or after a value
//!
//! Unknown keys are skipped. A key given twice keeps the last value.
//! String values borrow from the input, so text settings have no length
//! limit of their own; only the credentials are bounded, by the link.

use core::fmt;

use heapless::String;

use super::types::{Credentials, CountdownConfig, Percent, MAX_SWAP_DELAY_S};
use crate::countdown::{EventTarget, TargetError};
use crate::text::{unescape, Text};
use crate::time::{CalendarError, Instant};

/// Keys the device understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SettingKey {
    EventYear,
    EventMonth,
    EventDay,
    EventHour,
    EventMinute,
    EventName,
    EventMsg,
    SwapDelay,
    ScrollSpeed,
    Brightness,
    WifiSsid,
    WifiPassword,
    AioUsername,
    AioKey,
}

impl SettingKey {
    /// Every key, in file order
    pub const ALL: [SettingKey; 14] = [
        SettingKey::EventYear,
        SettingKey::EventMonth,
        SettingKey::EventDay,
        SettingKey::EventHour,
        SettingKey::EventMinute,
        SettingKey::EventName,
        SettingKey::EventMsg,
        SettingKey::SwapDelay,
        SettingKey::ScrollSpeed,
        SettingKey::Brightness,
        SettingKey::WifiSsid,
        SettingKey::WifiPassword,
        SettingKey::AioUsername,
        SettingKey::AioKey,
    ];

    /// Name as written in `settings.toml`
    pub fn name(&self) -> &'static str {
        match self {
            SettingKey::EventYear => "EVENT_YEAR",
            SettingKey::EventMonth => "EVENT_MONTH",
            SettingKey::EventDay => "EVENT_DAY",
            SettingKey::EventHour => "EVENT_HOUR",
            SettingKey::EventMinute => "EVENT_MINUTE",
            SettingKey::EventName => "EVENT_NAME",
            SettingKey::EventMsg => "EVENT_MSG",
            SettingKey::SwapDelay => "SWAP_DELAY",
            SettingKey::ScrollSpeed => "SCROLL_SPEED",
            SettingKey::Brightness => "BRIGHTNESS",
            SettingKey::WifiSsid => "CIRCUITPY_WIFI_SSID",
            SettingKey::WifiPassword => "CIRCUITPY_WIFI_PASSWORD",
            SettingKey::AioUsername => "AIO_USERNAME",
            SettingKey::AioKey => "AIO_KEY",
        }
    }

    /// Look a key up by its file name (case-sensitive)
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.name() == name)
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Settings file errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Line is not `KEY = value` (1-based line number)
    Malformed { line: usize },
    /// Required key not present
    Missing(SettingKey),
    /// Integer where text is expected or the other way round
    WrongType(SettingKey),
    /// Value outside the accepted range
    OutOfRange(SettingKey),
    /// Text longer than the key allows
    TooLong(SettingKey),
    /// Year, month and day do not name a real date
    InvalidDate,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Malformed { line } => write!(f, "line {}: expected KEY = value", line),
            ConfigError::Missing(key) => write!(f, "{} is missing", key),
            ConfigError::WrongType(key) => write!(f, "{} has the wrong type", key),
            ConfigError::OutOfRange(key) => write!(f, "{} is out of range", key),
            ConfigError::TooLong(key) => write!(f, "{} is too long", key),
            ConfigError::InvalidDate => f.write_str("event date does not exist"),
        }
    }
}

/// A raw setting value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Value<'a> {
    Int(i64),
    Text(Text<'a>),
}

/// Raw values read from a settings file, before validation
#[derive(Debug, Clone, Default)]
pub struct Settings<'a> {
    values: [Option<Value<'a>>; SettingKey::ALL.len()],
}

impl<'a> Settings<'a> {
    /// Read every recognized `KEY = value` line
    pub fn parse(input: &'a str) -> Result<Self, ConfigError> {
        let mut settings = Self::default();

        for (index, line) in input.lines().enumerate() {
            let line_no = index + 1;
            let line = line.trim();

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (name, raw) = line
                .split_once('=')
                .ok_or(ConfigError::Malformed { line: line_no })?;
            let name = name.trim();
            if name.is_empty() {
                return Err(ConfigError::Malformed { line: line_no });
            }

            let Some(key) = SettingKey::from_name(name) else {
                continue;
            };

            let value = parse_value(raw.trim(), key, line_no)?;
            settings.values[key.index()] = Some(value);
        }

        Ok(settings)
    }

    pub fn get(&self, key: SettingKey) -> Option<&Value<'a>> {
        self.values[key.index()].as_ref()
    }

    fn int(&self, key: SettingKey) -> Result<i64, ConfigError> {
        match self.get(key) {
            Some(Value::Int(n)) => Ok(*n),
            Some(Value::Text(_)) => Err(ConfigError::WrongType(key)),
            None => Err(ConfigError::Missing(key)),
        }
    }

    fn text(&self, key: SettingKey) -> Result<Text<'a>, ConfigError> {
        match self.get(key) {
            Some(Value::Text(s)) => Ok(*s),
            Some(Value::Int(_)) => Err(ConfigError::WrongType(key)),
            None => Err(ConfigError::Missing(key)),
        }
    }

    fn ranged<T: TryFrom<i64>>(&self, key: SettingKey) -> Result<T, ConfigError> {
        T::try_from(self.int(key)?).map_err(|_| ConfigError::OutOfRange(key))
    }

    fn percent(&self, key: SettingKey) -> Result<Percent, ConfigError> {
        Percent::new(self.ranged(key)?).ok_or(ConfigError::OutOfRange(key))
    }

    fn bounded<const N: usize>(&self, key: SettingKey) -> Result<String<N>, ConfigError> {
        let mut out = String::new();
        for ch in self.text(key)?.chars() {
            out.push(ch).map_err(|_| ConfigError::TooLong(key))?;
        }
        Ok(out)
    }

    /// Validate the raw values into a device configuration
    pub fn to_config(&self) -> Result<CountdownConfig<'a>, ConfigError> {
        let year: u16 = self.ranged(SettingKey::EventYear)?;
        let month: u8 = self.ranged(SettingKey::EventMonth)?;
        let day: u8 = self.ranged(SettingKey::EventDay)?;
        let hour: u8 = self.ranged(SettingKey::EventHour)?;
        let minute: u8 = self.ranged(SettingKey::EventMinute)?;

        if !(1..=31).contains(&day) {
            return Err(ConfigError::OutOfRange(SettingKey::EventDay));
        }

        let at = Instant::at_minute(year, month, day, hour, minute).map_err(|e| match e {
            CalendarError::Year => ConfigError::OutOfRange(SettingKey::EventYear),
            CalendarError::Month => ConfigError::OutOfRange(SettingKey::EventMonth),
            CalendarError::Hour => ConfigError::OutOfRange(SettingKey::EventHour),
            CalendarError::Minute => ConfigError::OutOfRange(SettingKey::EventMinute),
            CalendarError::Day | CalendarError::Second => ConfigError::InvalidDate,
        })?;

        let name = self.text(SettingKey::EventName)?;
        let message = self.text(SettingKey::EventMsg)?;
        let target = EventTarget::new(at, name, message).map_err(|e| match e {
            TargetError::EmptyMessage => ConfigError::OutOfRange(SettingKey::EventMsg),
        })?;

        let swap_delay_s: u32 = self.ranged(SettingKey::SwapDelay)?;
        if swap_delay_s > MAX_SWAP_DELAY_S {
            return Err(ConfigError::OutOfRange(SettingKey::SwapDelay));
        }

        let credentials = Credentials {
            ssid: self.bounded(SettingKey::WifiSsid)?,
            passphrase: self.bounded(SettingKey::WifiPassword)?,
            username: self.bounded(SettingKey::AioUsername)?,
            key: self.bounded(SettingKey::AioKey)?,
        };

        Ok(CountdownConfig {
            target,
            swap_delay_s,
            scroll_speed: self.percent(SettingKey::ScrollSpeed)?,
            brightness: self.percent(SettingKey::Brightness)?,
            credentials,
        })
    }
}

/// Parse and validate a settings file
pub fn parse_settings(input: &str) -> Result<CountdownConfig<'_>, ConfigError> {
    Settings::parse(input)?.to_config()
}

/// Parse the text after `=` (already trimmed)
fn parse_value(raw: &str, key: SettingKey, line: usize) -> Result<Value<'_>, ConfigError> {
    if let Some(quoted) = raw.strip_prefix('"') {
        return parse_string(quoted, line).map(Value::Text);
    }

    let bare = match raw.find('#') {
        Some(pos) => raw[..pos].trim_end(),
        None => raw,
    };
    if bare.is_empty() {
        return Err(ConfigError::Malformed { line });
    }

    bare.parse::<i64>()
        .map(Value::Int)
        .map_err(|_| ConfigError::WrongType(key))
}

/// Find the closing quote of a string body and check its escapes
///
/// Only whitespace or a comment may follow the closing quote.
fn parse_string(body: &str, line: usize) -> Result<Text<'_>, ConfigError> {
    let malformed = ConfigError::Malformed { line };
    let mut escaped = false;
    let mut chars = body.char_indices();

    while let Some((pos, ch)) = chars.next() {
        match ch {
            '"' => {
                let rest = body[pos + 1..].trim_start();
                if !(rest.is_empty() || rest.starts_with('#')) {
                    return Err(malformed);
                }
                let raw = &body[..pos];
                return Ok(if escaped {
                    Text::escaped(raw)
                } else {
                    Text::plain(raw)
                });
            }
            '\\' => match chars.next() {
                Some((_, next)) if unescape(next).is_some() => escaped = true,
                _ => return Err(malformed),
            },
            _ => {}
        }
    }

    // No closing quote
    Err(malformed)
}
