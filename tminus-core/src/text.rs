//! Borrowed setting text
//!
//! String values in `settings.toml` are not copied out of the file: a
//! [`Text`] points at the quoted body in place, so a value is as long as
//! the file allows. Escape sequences are decoded while the characters are
//! read.

use core::fmt::{self, Write};
use core::str::Chars;

/// Character following a `\` in a quoted string, decoded
pub(crate) fn unescape(ch: char) -> Option<char> {
    match ch {
        '"' => Some('"'),
        '\\' => Some('\\'),
        'n' => Some('\n'),
        't' => Some('\t'),
        _ => None,
    }
}

/// A string value borrowed from settings text
///
/// Equality compares decoded characters, so `"a\\tb"` read from a file
/// equals the plain text `"a\tb"`.
#[derive(Debug, Clone, Copy)]
pub struct Text<'a> {
    raw: &'a str,
    escaped: bool,
}

impl<'a> Text<'a> {
    /// Text taken literally
    pub const fn plain(raw: &'a str) -> Self {
        Self {
            raw,
            escaped: false,
        }
    }

    /// Quoted body whose escape sequences have already been checked
    pub(crate) const fn escaped(raw: &'a str) -> Self {
        Self { raw, escaped: true }
    }

    /// No characters at all
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Decoded characters
    pub fn chars(&self) -> TextChars<'a> {
        TextChars {
            inner: self.raw.chars(),
            escaped: self.escaped,
        }
    }
}

impl<'a> From<&'a str> for Text<'a> {
    fn from(raw: &'a str) -> Self {
        Self::plain(raw)
    }
}

impl PartialEq for Text<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.chars().eq(other.chars())
    }
}

impl Eq for Text<'_> {}

impl PartialEq<str> for Text<'_> {
    fn eq(&self, other: &str) -> bool {
        self.chars().eq(other.chars())
    }
}

impl PartialEq<&str> for Text<'_> {
    fn eq(&self, other: &&str) -> bool {
        self.chars().eq(other.chars())
    }
}

impl fmt::Display for Text<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for ch in self.chars() {
            f.write_char(ch)?;
        }
        Ok(())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Text<'_> {
    // Logged as written in the file
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{=str}", self.raw)
    }
}

/// Iterator over the decoded characters of a [`Text`]
#[derive(Debug, Clone)]
pub struct TextChars<'a> {
    inner: Chars<'a>,
    escaped: bool,
}

impl Iterator for TextChars<'_> {
    type Item = char;

    fn next(&mut self) -> Option<char> {
        let ch = self.inner.next()?;
        if self.escaped && ch == '\\' {
            return self.inner.next().and_then(unescape);
        }
        Some(ch)
    }
}
