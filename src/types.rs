//! Common type definitions.
//!
//! - [`Mode`]: which transform a run performs
//! - [`Leniency`]: how the decoder treats malformed digit input
//! - [`Summary`]: character counts reported when a stream completes

use strum::Display;

/// Represents the transform to run over the input stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display)]
pub enum Mode {
    /// Characters to coordinate digits.
    #[strum(to_string = "Encode")]
    Encode,

    /// Coordinate digits back to characters.
    #[strum(to_string = "Decode")]
    Decode,
}

impl Mode {
    /// Selects the mode from the `--decode` flag.
    #[inline]
    pub fn from_decode_flag(decode: bool) -> Self {
        if decode { Self::Decode } else { Self::Encode }
    }

    /// Returns the past-tense label used in completion messages.
    #[inline]
    pub fn done_label(self) -> &'static str {
        match self {
            Self::Encode => "Encoded",
            Self::Decode => "Decoded",
        }
    }
}

/// Decoder behaviour on non-digit characters and a dangling row digit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Display)]
pub enum Leniency {
    /// Non-digits read as 0 and a trailing lone digit is dropped.
    #[default]
    #[strum(to_string = "lenient")]
    Lenient,

    /// Both conditions fail with the offending position.
    #[strum(to_string = "strict")]
    Strict,
}

impl Leniency {
    #[inline]
    pub fn from_strict_flag(strict: bool) -> Self {
        if strict { Self::Strict } else { Self::Lenient }
    }
}

/// Character counts of a completed transform.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Summary {
    /// Characters consumed from the input stream.
    pub read: u64,

    /// Characters written to the output stream.
    pub written: u64,
}
