use resp_wire::WireError;

/// Errors that can occur while decoding a frame or a pipeline.
///
/// Every error aborts the frame being decoded and, through
/// `decode_pipeline`, the whole pipeline. A clean end of stream at a
/// top-level frame boundary is never an error; it is reported as
/// `Ok(None)` / an empty continuation instead.
///
/// ```text
///   DecodeError
///   ├── Wire(WireError)   ← bad terminator, unknown tag, bad count field
///   ├── Incomplete        ← stream ended inside a frame
///   ├── LimitExceeded     ← configured size or depth limit hit
///   └── Io(io::Error)     ← transport failure from the source
/// ```
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// A line failed framing validation.
    ///
    /// Use [`WireError::is_syntax`] (or [`DecodeError::is_invalid_syntax`])
    /// to separate malformed lines from count parse failures.
    #[error(transparent)]
    Wire(#[from] WireError),

    /// The source ran dry before a line, a bulk payload, or the children
    /// of an array were complete.
    ///
    /// `offset` is the number of bytes consumed from the stream when the
    /// shortfall was detected.
    #[error("incomplete stream: input ended mid-frame at offset {offset}")]
    Incomplete { offset: u64 },

    /// A configured [`DecoderLimits`](crate::DecoderLimits) bound was
    /// exceeded. Never produced with the default configuration.
    #[error("{what} {value} exceeds limit {limit}")]
    LimitExceeded {
        what: &'static str,
        value: u64,
        limit: u64,
    },

    /// An I/O error from the underlying reader.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl DecodeError {
    /// Malformed terminator or unrecognized type tag.
    pub fn is_invalid_syntax(&self) -> bool {
        matches!(self, Self::Wire(err) if err.is_syntax())
    }

    pub fn is_incomplete(&self) -> bool {
        matches!(self, Self::Incomplete { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn syntax_classification_follows_wire_error() {
        let syntax = DecodeError::from(WireError::UnknownTag { tag: b'?' });
        assert!(syntax.is_invalid_syntax());

        let count = DecodeError::from(resp_wire::parse_count(b"$x\r\n").unwrap_err());
        assert!(!count.is_invalid_syntax());
        assert!(!count.is_incomplete());
    }

    #[test]
    fn incomplete_reports_offset() {
        let err = DecodeError::Incomplete { offset: 7 };
        assert!(err.is_incomplete());
        assert_eq!(
            err.to_string(),
            "incomplete stream: input ended mid-frame at offset 7"
        );
    }
}
