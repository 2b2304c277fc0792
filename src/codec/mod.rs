//! Streaming Polybius transforms.
//!
//! Both directions share one driver: input is read in buffered chunks and
//! decoded as UTF-8 on the fly, every character goes through a [`Transform`],
//! and each chunk's output is written before the next chunk is read. A byte
//! that is not valid UTF-8 becomes U+FFFD. The writer is flushed on every
//! exit path, so output produced before a failure is never lost.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader, BufWriter};
use tracing::debug;

use crate::error::Result;
use crate::types::Summary;

mod decoder;
mod encoder;

pub use decoder::Decoder;
pub use encoder::Encoder;

/// Per-character step of a transform.
pub trait Transform {
    /// Consumes the character at stream offset `position`, appending any
    /// produced text to `out`.
    ///
    /// # Errors
    ///
    /// Aborts the whole run; text already appended to `out` is still written.
    fn push(&mut self, ch: char, position: u64, out: &mut String) -> Result<()>;

    /// Called once at end of input; `position` is the total characters read.
    ///
    /// # Errors
    ///
    /// Fails when the input ended in a state the transform cannot accept.
    fn finish(&mut self, _position: u64, _out: &mut String) -> Result<()> {
        Ok(())
    }
}

/// Runs `transform` over an in-memory string.
pub(crate) fn apply<T: Transform>(transform: &mut T, text: &str) -> Result<String> {
    let mut out = String::with_capacity(text.len() * 2);
    let mut position = 0u64;

    for ch in text.chars() {
        transform.push(ch, position, &mut out)?;
        position += 1;
    }
    transform.finish(position, &mut out)?;

    Ok(out)
}

/// Runs `transform` from `input` to `output`.
///
/// The first error stops the run. Whatever the transform produced up to that
/// point is written and the output is flushed before the error is returned.
pub(crate) async fn drive<T, R, W>(transform: &mut T, input: R, output: W) -> Result<Summary>
where
    T: Transform,
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut reader = BufReader::new(input);
    let mut writer = BufWriter::new(output);
    let mut pending = String::new();
    let mut summary = Summary::default();

    let result = run(transform, &mut reader, &mut writer, &mut pending, &mut summary).await;

    let salvaged = writer.write_all(pending.as_bytes()).await;
    let flushed = writer.flush().await;

    result?;
    salvaged?;
    flushed?;

    debug!(read = summary.read, written = summary.written, "stream finished");
    Ok(summary)
}

async fn run<T, R, W>(transform: &mut T, reader: &mut R, writer: &mut W, pending: &mut String, summary: &mut Summary) -> Result<()>
where
    T: Transform,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    // Unread chunk bytes plus at most three bytes of a split UTF-8 sequence.
    let mut bytes: Vec<u8> = Vec::new();

    loop {
        let chunk = reader.fill_buf().await?;
        let at_eof = chunk.is_empty();
        let chunk_len = chunk.len();
        bytes.extend_from_slice(chunk);
        reader.consume(chunk_len);

        let used = decode_utf8(&bytes, at_eof, |ch| {
            transform.push(ch, summary.read, pending)?;
            summary.read += 1;
            Ok(())
        })?;
        bytes.drain(..used);

        if at_eof {
            break;
        }
        emit(writer, pending, summary).await?;
    }

    transform.finish(summary.read, pending)?;
    emit(writer, pending, summary).await
}

/// Feeds the characters of `bytes` to `f` and returns how many bytes it used.
///
/// Every byte of an invalid sequence becomes one U+FFFD. A sequence cut off
/// at the end of `bytes` is left unused so the next chunk can complete it,
/// unless `at_eof` is set.
fn decode_utf8(bytes: &[u8], at_eof: bool, mut f: impl FnMut(char) -> Result<()>) -> Result<usize> {
    let mut rest = bytes;

    loop {
        let error = match std::str::from_utf8(rest) {
            Ok(valid) => {
                valid.chars().try_for_each(&mut f)?;
                return Ok(bytes.len());
            }
            Err(error) => error,
        };

        let (valid, tail) = rest.split_at(error.valid_up_to());
        std::str::from_utf8(valid).unwrap_or_default().chars().try_for_each(&mut f)?;

        let invalid = match error.error_len() {
            Some(len) => len,
            None if at_eof => tail.len(),
            None => return Ok(bytes.len() - tail.len()),
        };
        (0..invalid).try_for_each(|_| f(char::REPLACEMENT_CHARACTER))?;
        rest = &tail[invalid..];
    }
}

async fn emit<W: AsyncWrite + Unpin>(writer: &mut W, pending: &mut String, summary: &mut Summary) -> Result<()> {
    // Taken before writing so a failed write is not retried by the salvage step.
    let chunk = std::mem::take(pending);
    writer.write_all(chunk.as_bytes()).await?;
    summary.written += chunk.chars().count() as u64;
    Ok(())
}
