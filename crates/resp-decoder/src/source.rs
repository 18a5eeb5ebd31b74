use std::io::{BufRead, Read};

use bytes::Bytes;
use resp_types::Frame;
use resp_wire::{CRLF, validate_line};

use crate::error::DecodeError;

/// Upper bound on speculative allocation for a declared length.
///
/// Buffers grow past this as bytes actually arrive, so a header claiming a
/// huge payload cannot allocate more than the stream delivers.
pub(crate) const MAX_PREALLOC: usize = 64 * 1024;

/// Initial byte capacity for a payload of `wanted` declared bytes.
pub(crate) fn prealloc_bytes(wanted: u64) -> usize {
    usize::try_from(wanted).map_or(MAX_PREALLOC, |n| n.min(MAX_PREALLOC))
}

/// Initial element capacity for an array of `len` declared children,
/// bounded to the same byte budget as [`prealloc_bytes`].
pub(crate) fn prealloc_frames(len: u64) -> usize {
    let cap = MAX_PREALLOC / size_of::<Frame>();
    usize::try_from(len).map_or(cap, |n| n.min(cap))
}

/// Position-tracking wrapper around the caller's buffered reader.
///
/// Provides the two reads the decoder needs: one CRLF line, and one
/// fixed-length payload followed by its delimiter.
pub(crate) struct Source<R> {
    inner: R,
    pos: u64,
}

impl<R> Source<R> {
    pub(crate) fn new(inner: R) -> Self {
        Self { inner, pos: 0 }
    }

    pub(crate) fn position(&self) -> u64 {
        self.pos
    }

    pub(crate) fn get_ref(&self) -> &R {
        &self.inner
    }

    pub(crate) fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: BufRead> Source<R> {
    /// Read one line, `\n` included, into `line`.
    ///
    /// Returns `Ok(false)` when the reader is already exhausted, which is
    /// the only way a clean end of stream is signalled.
    ///
    /// # Errors
    ///
    /// - [`DecodeError::Incomplete`] if the stream ends before `\n`.
    /// - [`DecodeError::Wire`] if the line is not CRLF-terminated.
    pub(crate) fn read_line(&mut self, line: &mut Vec<u8>) -> Result<bool, DecodeError> {
        line.clear();
        // Bytes consumed before a transport error still count.
        let read = self.inner.read_until(b'\n', line);
        self.pos += line.len() as u64;
        let n = read?;

        if n == 0 {
            return Ok(false);
        }
        if line.last() != Some(&b'\n') {
            return Err(DecodeError::Incomplete { offset: self.pos });
        }
        validate_line(line)?;
        Ok(true)
    }

    /// Read `len` payload bytes plus the two delimiter bytes behind them,
    /// returning only the payload.
    ///
    /// The delimiter bytes are consumed but not checked.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::Incomplete`] if fewer than `len + 2` bytes
    /// remain.
    pub(crate) fn read_payload(&mut self, len: u64) -> Result<Bytes, DecodeError> {
        let wanted = len + CRLF.len() as u64;
        let mut buf = Vec::with_capacity(prealloc_bytes(wanted));

        let read = self.inner.by_ref().take(wanted).read_to_end(&mut buf);
        self.pos += buf.len() as u64;
        let n = read?;

        if (n as u64) < wanted {
            return Err(DecodeError::Incomplete { offset: self.pos });
        }

        buf.truncate(buf.len() - CRLF.len());
        Ok(Bytes::from(buf))
    }
}
