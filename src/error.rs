//! Error taxonomy for key loading and the two stream transforms.

use std::path::PathBuf;

use thiserror::Error;

use crate::config::MAX_DIMENSION;

#[derive(Error, Debug)]
pub enum Error {
    /// The key source is missing, unreadable or not valid CSV.
    #[error("failed to load key {}: {reason}", .path.display())]
    KeyLoad { path: PathBuf, reason: String },

    #[error("key must contain at least one non-empty row")]
    EmptyKey,

    #[error("key is {rows}x{cols}, but coordinates allow at most {max}x{max}", max = MAX_DIMENSION)]
    KeyTooLarge { rows: usize, cols: usize },

    /// A row holds more cells than the first row, which fixes the column count.
    #[error("key row {row} has {len} cells, expected at most {expected}")]
    RaggedRow { row: usize, len: usize, expected: usize },

    #[error("character {ch:?} at position {position} is not in the key")]
    CharacterNotFound { ch: char, position: u64 },

    #[error("coordinate ({row}, {col}) does not address a key cell")]
    CoordinateOutOfRange { row: u8, col: u8 },

    /// Only raised by strict decoding.
    #[error("malformed input at position {position}: {reason}")]
    MalformedInput { position: u64, reason: &'static str },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
