use bytes::Bytes;
use resp_types::{Frame, SimpleKind};
use resp_wire::{CRLF, Tag, WireError, parse_count, simple_payload, validate_line};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncRead, AsyncReadExt, BufReader};
use tracing::{debug, trace};

use crate::config::{DecoderConfig, DecoderLimits};
use crate::error::DecodeError;
use crate::source::{prealloc_bytes, prealloc_frames};

/// Asynchronous decoder: the same framing rules as
/// [`RespDecoder`](crate::RespDecoder), driven by a tokio reader.
///
/// Frames are read only when the caller awaits the next one, so
/// backpressure falls out naturally. Nested arrays are assembled on an
/// explicit stack rather than by recursion:
///
/// ```text
///   *2\r\n              push (2, [])
///   *1\r\n              push (1, [])
///   +a\r\n              (1, [a]) complete → pop → Array[a] into parent
///                       parent (2, [[a]]) still open
///   +b\r\n              (2, [[a], b]) complete → pop → top-level frame
/// ```
///
/// # Example
///
/// ```rust,no_run
/// use resp_decoder::StreamingDecoder;
/// use tokio::net::TcpStream;
///
/// async fn drain(stream: TcpStream) {
///     let mut decoder = StreamingDecoder::new(stream);
///     while let Some(result) = decoder.next().await {
///         let frame = result.unwrap();
///         println!("{:?}", frame.flatten());
///     }
/// }
/// ```
pub struct StreamingDecoder<R> {
    reader: R,
    pos: u64,
    limits: DecoderLimits,
    line: Vec<u8>,
    done: bool,
}

impl<R: AsyncRead + Unpin> StreamingDecoder<BufReader<R>> {
    /// Wrap an unbuffered async reader with the default configuration.
    pub fn new(reader: R) -> Self {
        Self::with_config(reader, &DecoderConfig::default())
    }

    /// A capacity of zero is raised to one byte, as in
    /// [`RespDecoder::with_config`](crate::RespDecoder::with_config).
    pub fn with_config(reader: R, config: &DecoderConfig) -> Self {
        StreamingDecoder::from_buffered(BufReader::with_capacity(config.read_capacity(), reader))
            .with_limits(config.limits)
    }
}

impl<R> StreamingDecoder<R> {
    pub fn from_buffered(reader: R) -> Self {
        Self {
            reader,
            pos: 0,
            limits: DecoderLimits::UNLIMITED,
            line: Vec::new(),
            done: false,
        }
    }

    #[must_use]
    pub fn with_limits(mut self, limits: DecoderLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Bytes consumed from the reader so far.
    pub fn position(&self) -> u64 {
        self.pos
    }

    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: AsyncBufRead + Unpin> StreamingDecoder<R> {
    /// Next top-level frame, or `None` once the stream is exhausted.
    ///
    /// After an error has been yielded this returns `None`: the reader is
    /// no longer positioned at a frame boundary.
    pub async fn next(&mut self) -> Option<Result<Frame, DecodeError>> {
        if self.done {
            return None;
        }
        let next = self.read_frame().await.transpose();
        if !matches!(next, Some(Ok(_))) {
            self.done = true;
        }
        next
    }

    /// Decode one top-level frame and flatten it.
    ///
    /// # Errors
    ///
    /// See [`RespDecoder::decode_one`](crate::RespDecoder::decode_one).
    pub async fn decode_one(&mut self) -> Result<Option<Bytes>, DecodeError> {
        Ok(self.read_frame().await?.map(|frame| frame.flatten()))
    }

    /// Decode flattened frames until the stream is exhausted.
    ///
    /// # Errors
    ///
    /// See [`RespDecoder::decode_pipeline`](crate::RespDecoder::decode_pipeline).
    pub async fn decode_pipeline(&mut self) -> Result<Vec<Bytes>, DecodeError> {
        let mut results = Vec::new();
        while let Some(result) = self.decode_one().await? {
            results.push(result);
        }
        debug!(frames = results.len(), bytes = self.pos, "pipeline drained");
        Ok(results)
    }

    /// Decode one top-level frame, keeping its structure.
    ///
    /// # Errors
    ///
    /// See [`RespDecoder::read_frame`](crate::RespDecoder::read_frame).
    pub async fn read_frame(&mut self) -> Result<Option<Frame>, DecodeError> {
        let result = self.read_frame_inner().await;
        if let Err(err) = &result {
            debug!(offset = self.pos, error = %err, "frame decode aborted");
        }
        result
    }

    async fn read_frame_inner(&mut self) -> Result<Option<Frame>, DecodeError> {
        // Open arrays, innermost last: (children still expected, children so far).
        let mut pending: Vec<(u64, Vec<Frame>)> = Vec::new();

        loop {
            if !self.read_line().await? {
                if pending.is_empty() {
                    return Ok(None);
                }
                return Err(DecodeError::Incomplete { offset: self.pos });
            }

            let tag = Tag::from_byte(self.line[0])?;
            trace!(?tag, depth = pending.len(), offset = self.pos, "frame header");

            let mut frame = match tag {
                Tag::SimpleString => self.simple(SimpleKind::Status),
                Tag::Error => self.simple(SimpleKind::Error),
                Tag::Integer => self.simple(SimpleKind::Integer),
                Tag::BulkString => self.read_bulk().await?,
                Tag::Array => {
                    let count = parse_count(&self.line)?;
                    let len = u64::try_from(count).unwrap_or(0);
                    self.limits.check_depth(pending.len() + 1)?;
                    self.limits.check_array_len(len)?;
                    if len > 0 {
                        pending.push((len, Vec::with_capacity(prealloc_frames(len))));
                        continue;
                    }
                    Frame::Array(Vec::new())
                }
            };

            // Hand the finished frame to its parent, closing every array it
            // completes on the way up.
            loop {
                let Some((remaining, mut children)) = pending.pop() else {
                    return Ok(Some(frame));
                };
                children.push(frame);
                if remaining > 1 {
                    pending.push((remaining - 1, children));
                    break;
                }
                frame = Frame::Array(children);
            }
        }
    }

    fn simple(&self, kind: SimpleKind) -> Frame {
        Frame::Simple {
            kind,
            payload: Bytes::copy_from_slice(simple_payload(&self.line)),
        }
    }

    async fn read_bulk(&mut self) -> Result<Frame, DecodeError> {
        let count = parse_count(&self.line)?;
        if count == -1 {
            return Ok(Frame::Null);
        }

        let len = u64::try_from(count).map_err(|_| WireError::NegativeBulkLength { count })?;
        self.limits.check_bulk_len(len)?;

        let wanted = len + CRLF.len() as u64;
        let mut buf = Vec::with_capacity(prealloc_bytes(wanted));
        let read = (&mut self.reader).take(wanted).read_to_end(&mut buf).await;
        self.pos += buf.len() as u64;
        let n = read?;

        if (n as u64) < wanted {
            return Err(DecodeError::Incomplete { offset: self.pos });
        }
        buf.truncate(buf.len() - CRLF.len());
        Ok(Frame::Bulk(Bytes::from(buf)))
    }

    /// Returns `Ok(false)` on a clean end of stream.
    async fn read_line(&mut self) -> Result<bool, DecodeError> {
        self.line.clear();
        let read = self.reader.read_until(b'\n', &mut self.line).await;
        self.pos += self.line.len() as u64;
        let n = read?;

        if n == 0 {
            return Ok(false);
        }
        if self.line.last() != Some(&b'\n') {
            return Err(DecodeError::Incomplete { offset: self.pos });
        }
        validate_line(&self.line)?;
        Ok(true)
    }
}
