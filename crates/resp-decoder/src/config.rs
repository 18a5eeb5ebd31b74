use crate::error::DecodeError;

/// Read buffer size used when the decoder wraps an unbuffered reader.
pub const DEFAULT_BUFFER_CAPACITY: usize = 32 * 1024;

/// Configuration for [`RespDecoder`](crate::RespDecoder) and
/// [`StreamingDecoder`](crate::StreamingDecoder).
///
/// ```text
/// ┌─────────────────┬──────────────────────────────────────────────────┐
/// │ Field           │ Purpose                                          │
/// ├─────────────────┼──────────────────────────────────────────────────┤
/// │ buffer_capacity │ BufReader capacity when wrapping a raw reader    │
/// │ limits          │ Optional bulk / array / nesting bounds           │
/// └─────────────────┴──────────────────────────────────────────────────┘
/// ```
///
/// The default enforces no limits at all: any declared length is honored
/// as long as the bytes actually arrive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecoderConfig {
    /// Capacity of the internal `BufReader` used by
    /// [`RespDecoder::with_config`](crate::RespDecoder::with_config).
    /// Ignored when the caller hands in an already-buffered source.
    pub buffer_capacity: usize,

    /// Size and depth bounds.
    pub limits: DecoderLimits,
}

impl DecoderConfig {
    /// `buffer_capacity`, raised to at least one byte.
    pub(crate) fn read_capacity(&self) -> usize {
        self.buffer_capacity.max(1)
    }
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            buffer_capacity: DEFAULT_BUFFER_CAPACITY,
            limits: DecoderLimits::default(),
        }
    }
}

/// Upper bounds on what a single frame may declare.
///
/// Each bound is optional; `None` disables the check. Checks run on the
/// declared counts before any payload is read.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DecoderLimits {
    /// Largest accepted bulk string length in bytes.
    pub max_bulk_len: Option<u64>,
    /// Largest accepted array element count.
    pub max_array_len: Option<u64>,
    /// Deepest accepted array nesting. A top-level array is depth 1.
    pub max_depth: Option<usize>,
}

impl DecoderLimits {
    /// No bounds.
    pub const UNLIMITED: Self = Self {
        max_bulk_len: None,
        max_array_len: None,
        max_depth: None,
    };

    pub(crate) fn check_bulk_len(&self, len: u64) -> Result<(), DecodeError> {
        check("bulk length", len, self.max_bulk_len)
    }

    pub(crate) fn check_array_len(&self, len: u64) -> Result<(), DecodeError> {
        check("array length", len, self.max_array_len)
    }

    pub(crate) fn check_depth(&self, depth: usize) -> Result<(), DecodeError> {
        check("nesting depth", depth as u64, self.max_depth.map(|d| d as u64))
    }
}

fn check(what: &'static str, value: u64, limit: Option<u64>) -> Result<(), DecodeError> {
    match limit {
        Some(limit) if value > limit => Err(DecodeError::LimitExceeded { what, value, limit }),
        _ => Ok(()),
    }
}
