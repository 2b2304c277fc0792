//! Row/column address of a key cell and its two-digit text form.

use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::config::{COORDINATE_RADIX, COORDINATE_WIDTH};
use crate::error::{Error, Result};
use crate::types::Leniency;

/// Position of a character inside the key square.
///
/// Both components are single decimal digits whenever the coordinate comes
/// from a [`KeyTable`](crate::key::KeyTable), which refuses keys larger than
/// 10x10.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Coordinate {
    row: u8,
    col: u8,
}

impl Coordinate {
    #[inline]
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    #[inline]
    pub const fn row(self) -> u8 {
        self.row
    }

    #[inline]
    pub const fn col(self) -> u8 {
        self.col
    }

    /// Returns the two-digit text form, row digit first.
    #[inline]
    pub fn render(self) -> String {
        self.to_string()
    }

    /// Best-effort parse of a two-character coordinate.
    ///
    /// The first character is the row and the second the column. A character
    /// that is missing or not a decimal digit reads as 0.
    pub fn parse(text: &str) -> Self {
        let mut chars = text.chars();
        let row = chars.next().and_then(digit).unwrap_or(0);
        let col = chars.next().and_then(digit).unwrap_or(0);
        Self { row, col }
    }

    /// Parses a coordinate that must be exactly two decimal digits.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedInput`] for any other length or a non-digit
    /// character; the position is the offset of the offending character.
    pub fn parse_strict(text: &str) -> Result<Self> {
        let chars: Vec<char> = text.chars().collect();
        if chars.len() != COORDINATE_WIDTH {
            let position = chars.len().min(COORDINATE_WIDTH) as u64;
            return Err(Error::MalformedInput { position, reason: "coordinate must be exactly two digits" });
        }

        Self::from_digits(chars[0], chars[1], Leniency::Strict, 0)
    }

    /// Combines a row and a column digit read from a stream.
    ///
    /// `position` is the stream offset of `row`; `col` sits right after it.
    ///
    /// # Errors
    ///
    /// In strict mode a non-digit fails with [`Error::MalformedInput`].
    /// Lenient mode never fails and reads non-digits as 0.
    pub fn from_digits(row: char, col: char, leniency: Leniency, position: u64) -> Result<Self> {
        Ok(Self { row: component(row, leniency, position)?, col: component(col, leniency, position + 1)? })
    }
}

impl Display for Coordinate {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}{}", self.row, self.col)
    }
}

#[inline]
fn digit(ch: char) -> Option<u8> {
    ch.to_digit(COORDINATE_RADIX).and_then(|d| u8::try_from(d).ok())
}

fn component(ch: char, leniency: Leniency, position: u64) -> Result<u8> {
    match (digit(ch), leniency) {
        (Some(value), _) => Ok(value),
        (None, Leniency::Lenient) => Ok(0),
        (None, Leniency::Strict) => Err(Error::MalformedInput { position, reason: "expected a decimal digit" }),
    }
}
