use std::io::{BufRead, BufReader, Read};
use std::iter::FusedIterator;

use bytes::Bytes;
use resp_types::{Frame, SimpleKind};
use resp_wire::{Tag, WireError, parse_count, simple_payload};
use tracing::{debug, trace};

use crate::config::{DecoderConfig, DecoderLimits};
use crate::error::DecodeError;
use crate::source::{Source, prealloc_frames};

/// Synchronous frame decoder over any buffered reader.
///
/// Each call to [`decode_one`](Self::decode_one) consumes exactly one
/// top-level frame from the source: one header line, then either nothing
/// (simple types), one fixed-length payload (bulk strings), or `count`
/// nested frames (arrays, decoded recursively).
///
/// ```text
///   *2\r\n            ← array header, count = 2
///   $3\r\nGET\r\n     ← child 0: bulk "GET"
///   $1\r\nA\r\n       ← child 1: bulk "A"
///                     → "GET A"
/// ```
///
/// [`decode_pipeline`](Self::decode_pipeline) repeats this until the source
/// is exhausted at a frame boundary.
///
/// The decoder holds no state between frames other than the source's read
/// cursor and a reusable line buffer, so decoding the same bytes with two
/// independent decoders always gives the same result.
///
/// # Example
///
/// ```rust
/// use resp_decoder::RespDecoder;
///
/// let wire = b"*2\r\n$3\r\nGET\r\n$1\r\nA\r\n*2\r\n$3\r\nGET\r\n$1\r\nB\r\n";
/// let mut decoder = RespDecoder::new(&wire[..]);
/// let pipeline = decoder.decode_pipeline().unwrap();
/// assert_eq!(pipeline, vec!["GET A", "GET B"]);
/// ```
pub struct RespDecoder<R> {
    source: Source<R>,
    limits: DecoderLimits,
    /// Scratch buffer for header lines, reused across frames. A line's
    /// contents are fully consumed before any nested read.
    line: Vec<u8>,
}

impl<R: Read> RespDecoder<BufReader<R>> {
    /// Wrap an unbuffered reader with the default configuration.
    pub fn new(reader: R) -> Self {
        Self::with_config(reader, &DecoderConfig::default())
    }

    /// Wrap an unbuffered reader in a `BufReader` of
    /// `config.buffer_capacity` bytes and apply `config.limits`.
    ///
    /// A capacity of zero is raised to one byte: an empty buffer would
    /// read as end of stream.
    pub fn with_config(reader: R, config: &DecoderConfig) -> Self {
        RespDecoder::from_buffered(BufReader::with_capacity(config.read_capacity(), reader))
            .with_limits(config.limits)
    }
}

impl<R> RespDecoder<R> {
    /// Decode from a reader that is already buffered.
    ///
    /// Offsets reported in errors count from the reader's position at the
    /// time of this call.
    pub fn from_buffered(reader: R) -> Self {
        Self {
            source: Source::new(reader),
            limits: DecoderLimits::UNLIMITED,
            line: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_limits(mut self, limits: DecoderLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Bytes consumed from the source so far.
    pub fn position(&self) -> u64 {
        self.source.position()
    }

    pub fn get_ref(&self) -> &R {
        self.source.get_ref()
    }

    /// Give back the source. Any bytes it buffered but the decoder did not
    /// consume stay in it.
    pub fn into_inner(self) -> R {
        self.source.into_inner()
    }
}

impl<R: BufRead> RespDecoder<R> {
    /// Decode one top-level frame and flatten it into bytes.
    ///
    /// Returns `Ok(None)` when the source has no bytes left at a frame
    /// boundary.
    ///
    /// # Errors
    ///
    /// - [`DecodeError::Wire`] for a bad terminator, unknown tag, negative
    ///   bulk length, or unparsable count field.
    /// - [`DecodeError::Incomplete`] if the stream ends inside the frame.
    /// - [`DecodeError::LimitExceeded`] if a configured limit is hit.
    /// - [`DecodeError::Io`] for transport failures.
    pub fn decode_one(&mut self) -> Result<Option<Bytes>, DecodeError> {
        Ok(self.read_frame()?.map(|frame| frame.flatten()))
    }

    /// Decode frames until the source is exhausted.
    ///
    /// Results are in arrival order. The first error aborts the loop and
    /// the frames decoded before it are dropped.
    ///
    /// # Errors
    ///
    /// Any error from [`decode_one`](Self::decode_one).
    pub fn decode_pipeline(&mut self) -> Result<Vec<Bytes>, DecodeError> {
        let mut results = Vec::new();
        while let Some(result) = self.decode_one()? {
            results.push(result);
        }
        debug!(
            frames = results.len(),
            bytes = self.position(),
            "pipeline drained"
        );
        Ok(results)
    }

    /// Decode one top-level frame, keeping its structure.
    ///
    /// # Errors
    ///
    /// Same as [`decode_one`](Self::decode_one).
    pub fn read_frame(&mut self) -> Result<Option<Frame>, DecodeError> {
        let result = self.read_frame_at(0);
        if let Err(err) = &result {
            debug!(offset = self.position(), error = %err, "frame decode aborted");
        }
        result
    }

    /// Iterate over the remaining top-level frames.
    pub fn frames(&mut self) -> Frames<'_, R> {
        Frames {
            decoder: self,
            done: false,
        }
    }

    /// `depth` is the number of arrays enclosing the frame about to be read.
    fn read_frame_at(&mut self, depth: usize) -> Result<Option<Frame>, DecodeError> {
        if !self.source.read_line(&mut self.line)? {
            return Ok(None);
        }

        let tag = Tag::from_byte(self.line[0])?;
        trace!(?tag, depth, offset = self.position(), "frame header");

        let frame = match tag {
            Tag::SimpleString => self.simple(SimpleKind::Status),
            Tag::Error => self.simple(SimpleKind::Error),
            Tag::Integer => self.simple(SimpleKind::Integer),
            Tag::BulkString => self.read_bulk()?,
            Tag::Array => self.read_array(depth + 1)?,
        };
        Ok(Some(frame))
    }

    fn simple(&self, kind: SimpleKind) -> Frame {
        Frame::Simple {
            kind,
            payload: Bytes::copy_from_slice(simple_payload(&self.line)),
        }
    }

    fn read_bulk(&mut self) -> Result<Frame, DecodeError> {
        let count = parse_count(&self.line)?;
        if count == -1 {
            return Ok(Frame::Null);
        }

        let len = u64::try_from(count).map_err(|_| WireError::NegativeBulkLength { count })?;
        self.limits.check_bulk_len(len)?;
        Ok(Frame::Bulk(self.source.read_payload(len)?))
    }

    /// `depth` is this array's own nesting level, 1 for a top-level array.
    fn read_array(&mut self, depth: usize) -> Result<Frame, DecodeError> {
        let count = parse_count(&self.line)?;
        // Any count <= 0, including -1, is an empty array.
        let len = u64::try_from(count).unwrap_or(0);

        self.limits.check_depth(depth)?;
        self.limits.check_array_len(len)?;

        let mut children = Vec::with_capacity(prealloc_frames(len));
        for _ in 0..len {
            match self.read_frame_at(depth)? {
                Some(child) => children.push(child),
                None => {
                    return Err(DecodeError::Incomplete {
                        offset: self.position(),
                    });
                }
            }
        }
        Ok(Frame::Array(children))
    }
}

/// Iterator over the top-level frames of a [`RespDecoder`].
///
/// Ends at a clean end of stream. After yielding an error it yields
/// nothing further, since the source position is no longer at a frame
/// boundary.
pub struct Frames<'a, R> {
    decoder: &'a mut RespDecoder<R>,
    done: bool,
}

impl<R: BufRead> Iterator for Frames<'_, R> {
    type Item = Result<Frame, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.decoder.read_frame() {
            Ok(Some(frame)) => Some(Ok(frame)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}

impl<R: BufRead> FusedIterator for Frames<'_, R> {}

/// Decode one frame from a caller-owned buffered source.
///
/// Equivalent to [`RespDecoder::decode_one`] on a decoder borrowing
/// `source`; bytes after the frame stay in `source`.
///
/// # Errors
///
/// See [`RespDecoder::decode_one`].
pub fn decode_one<R: BufRead>(source: &mut R) -> Result<Option<Bytes>, DecodeError> {
    RespDecoder::from_buffered(source).decode_one()
}

/// Drain a caller-owned buffered source into a pipeline.
///
/// # Errors
///
/// See [`RespDecoder::decode_pipeline`].
pub fn decode_pipeline<R: BufRead>(source: &mut R) -> Result<Vec<Bytes>, DecodeError> {
    RespDecoder::from_buffered(source).decode_pipeline()
}

/// Decode a complete in-memory capture.
///
/// # Errors
///
/// See [`RespDecoder::decode_pipeline`].
pub fn decode_bytes(payload: &[u8]) -> Result<Vec<Bytes>, DecodeError> {
    RespDecoder::from_buffered(payload).decode_pipeline()
}
