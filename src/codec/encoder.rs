use tokio::io::{AsyncRead, AsyncWrite};

use crate::codec::{Transform, apply, drive};
use crate::coordinate::Coordinate;
use crate::error::{Error, Result};
use crate::key::KeyTable;
use crate::types::Summary;

/// Turns characters into two-digit coordinates.
///
/// Every character is looked up, line terminators included, so input must
/// only contain characters present in the key.
#[derive(Clone, Copy)]
pub struct Encoder<'k> {
    table: &'k KeyTable,
}

impl<'k> Encoder<'k> {
    #[inline]
    pub fn new(table: &'k KeyTable) -> Self {
        Self { table }
    }

    /// Looks up one character read at stream offset `position`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CharacterNotFound`] when `ch` is not in the key.
    #[inline]
    pub fn encode_char(&self, ch: char, position: u64) -> Result<Coordinate> {
        self.table.lookup_coordinate(ch).ok_or(Error::CharacterNotFound { ch, position })
    }

    /// Encodes a whole string.
    ///
    /// # Errors
    ///
    /// Fails on the first character missing from the key.
    pub fn encode_str(&self, text: &str) -> Result<String> {
        let mut encoder = *self;
        apply(&mut encoder, text)
    }

    /// Encodes `input` into `output` until end of stream.
    ///
    /// # Errors
    ///
    /// Stops at the first character missing from the key or the first I/O
    /// failure. Coordinates for the characters before it are still written
    /// and flushed.
    pub async fn encode_stream<R, W>(&self, input: R, output: W) -> Result<Summary>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut encoder = *self;
        drive(&mut encoder, input, output).await
    }
}

impl Transform for Encoder<'_> {
    fn push(&mut self, ch: char, position: u64, out: &mut String) -> Result<()> {
        let coordinate = self.encode_char(ch, position)?;
        out.push_str(&coordinate.render());
        Ok(())
    }
}
