use tokio::io::{AsyncRead, AsyncWrite};
use tracing::debug;

use crate::codec::{Transform, apply, drive};
use crate::coordinate::Coordinate;
use crate::error::{Error, Result};
use crate::key::KeyTable;
use crate::types::{Leniency, Summary};

/// Turns digit pairs back into characters.
///
/// In [`Leniency::Lenient`] mode non-digits read as 0 and a trailing lone
/// digit is dropped, so `n` input characters yield `n / 2` output characters.
/// [`Leniency::Strict`] mode reports both as [`Error::MalformedInput`].
/// A coordinate outside the key fails in either mode.
#[derive(Clone, Copy)]
pub struct Decoder<'k> {
    table: &'k KeyTable,
    leniency: Leniency,
}

impl<'k> Decoder<'k> {
    #[inline]
    pub fn new(table: &'k KeyTable, leniency: Leniency) -> Self {
        Self { table, leniency }
    }

    /// Decodes a whole string.
    ///
    /// # Errors
    ///
    /// See [`Decoder::decode_stream`].
    pub fn decode_str(&self, text: &str) -> Result<String> {
        apply(&mut Session::new(*self), text)
    }

    /// Decodes `input` into `output` until end of stream.
    ///
    /// # Errors
    ///
    /// Stops at the first out-of-range coordinate, strict-mode violation or
    /// I/O failure. Characters decoded before it are still written and
    /// flushed.
    pub async fn decode_stream<R, W>(&self, input: R, output: W) -> Result<Summary>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        drive(&mut Session::new(*self), input, output).await
    }
}

#[derive(Clone, Copy)]
enum State {
    ExpectingRow,
    ExpectingCol { row: char, position: u64 },
}

/// Decoder state for a single run.
struct Session<'k> {
    decoder: Decoder<'k>,
    state: State,
}

impl<'k> Session<'k> {
    fn new(decoder: Decoder<'k>) -> Self {
        Self { decoder, state: State::ExpectingRow }
    }
}

impl Transform for Session<'_> {
    fn push(&mut self, ch: char, position: u64, out: &mut String) -> Result<()> {
        match self.state {
            State::ExpectingRow => {
                self.state = State::ExpectingCol { row: ch, position };
            }
            State::ExpectingCol { row, position: row_position } => {
                let coordinate = Coordinate::from_digits(row, ch, self.decoder.leniency, row_position)?;
                out.push(self.decoder.table.lookup_char(coordinate)?);
                self.state = State::ExpectingRow;
            }
        }

        Ok(())
    }

    fn finish(&mut self, _position: u64, _out: &mut String) -> Result<()> {
        let State::ExpectingCol { row, position } = std::mem::replace(&mut self.state, State::ExpectingRow) else {
            return Ok(());
        };

        match self.decoder.leniency {
            Leniency::Lenient => {
                debug!(digit = %row.escape_debug(), position, "dropped trailing lone digit");
                Ok(())
            }
            Leniency::Strict => Err(Error::MalformedInput { position, reason: "input ends with a lone row digit" }),
        }
    }
}
