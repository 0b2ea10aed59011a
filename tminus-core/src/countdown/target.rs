//! Event target

use heapless::String;

use crate::text::Text;
use crate::time::Instant;

/// Display cells reserved for the event name
pub const NAME_CELLS: usize = 4;

/// Byte capacity for the name (four characters of up to four bytes each)
pub const MAX_NAME_BYTES: usize = NAME_CELLS * 4;

/// Errors building an [`EventTarget`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TargetError {
    /// Message is empty; there would be nothing to scroll
    EmptyMessage,
}

/// The instant being counted down to, with its display texts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventTarget<'a> {
    at: Instant,
    name: String<MAX_NAME_BYTES>,
    message: Text<'a>,
}

impl<'a> EventTarget<'a> {
    /// Build a target
    ///
    /// Names longer than [`NAME_CELLS`] characters are cut to their first
    /// four characters. The message is borrowed and kept exactly as given,
    /// whatever its length.
    pub fn new<'n>(
        at: Instant,
        name: impl Into<Text<'n>>,
        message: impl Into<Text<'a>>,
    ) -> Result<Self, TargetError> {
        let message = message.into();
        if message.is_empty() {
            return Err(TargetError::EmptyMessage);
        }

        let mut short = String::new();
        for ch in name.into().chars().take(NAME_CELLS) {
            // Four chars never exceed MAX_NAME_BYTES
            let _ = short.push(ch);
        }

        Ok(Self {
            at,
            name: short,
            message,
        })
    }

    pub fn at(&self) -> &Instant {
        &self.at
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn message(&self) -> Text<'a> {
        self.message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instant() -> Instant {
        Instant::at_minute(2026, 5, 26, 8, 0).unwrap()
    }

    #[test]
    fn test_long_name_is_truncated() {
        let target = EventTarget::new(instant(), "EVENT NAME", "HAPPY EVENT NAME * ").unwrap();
        assert_eq!(target.name(), "EVEN");
    }

    #[test]
    fn test_short_name_is_kept() {
        let target = EventTarget::new(instant(), "BDAY", "party").unwrap();
        assert_eq!(target.name(), "BDAY");

        let target = EventTarget::new(instant(), "AB", "party").unwrap();
        assert_eq!(target.name(), "AB");
    }

    #[test]
    fn test_truncation_counts_characters() {
        let target = EventTarget::new(instant(), "ÉTÉ 2026", "soleil").unwrap();
        assert_eq!(target.name(), "ÉTÉ ");
    }

    #[test]
    fn test_message_is_not_truncated() {
        let message = std::string::String::from("HAPPY EVENT NAME * ").repeat(100);
        let target = EventTarget::new(instant(), "EVNT", message.as_str()).unwrap();
        assert_eq!(target.message(), message.as_str());
        assert_eq!(target.message().chars().count(), 1900);
    }

    #[test]
    fn test_empty_message_is_rejected() {
        assert_eq!(
            EventTarget::new(instant(), "EVNT", ""),
            Err(TargetError::EmptyMessage)
        );
    }
}
