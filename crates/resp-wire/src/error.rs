use std::num::ParseIntError;

/// Framing errors raised while interpreting a single protocol line.
///
/// Everything except [`InvalidCount`](Self::InvalidCount) belongs to the
/// "invalid syntax" class; use [`WireError::is_syntax`] to tell them apart
/// without matching every variant.
///
/// ```text
///   WireError
///   ├── UnterminatedLine     ← shorter than 2 bytes, or `\n` without `\r`
///   ├── UnknownTag           ← first byte is not one of + - : $ *
///   ├── NegativeBulkLength   ← `$` count below -1
///   └── InvalidCount         ← count field is not a decimal integer
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WireError {
    /// The line is too short to hold a delimiter, or the byte before `\n`
    /// is not `\r`.
    #[error("invalid syntax: line of {len} bytes is not CRLF-terminated")]
    UnterminatedLine { len: usize },

    /// The first byte of a line is not a known type tag.
    #[error("invalid syntax: unknown type tag {tag:#04X}")]
    UnknownTag { tag: u8 },

    /// A bulk string declared a length below -1.
    #[error("invalid syntax: bulk length {count} is negative")]
    NegativeBulkLength { count: i64 },

    /// The count field of a `$` or `*` line did not parse as an integer.
    ///
    /// The parse error is surfaced as-is rather than folded into the
    /// syntax class.
    #[error("invalid count field: {0}")]
    InvalidCount(#[from] ParseIntError),
}

impl WireError {
    /// Returns `true` for the malformed-line and unknown-tag family.
    pub fn is_syntax(&self) -> bool {
        !matches!(self, Self::InvalidCount(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_errors_are_not_syntax_errors() {
        let parse = "x".parse::<i64>().unwrap_err();
        assert!(!WireError::InvalidCount(parse).is_syntax());
        assert!(WireError::UnknownTag { tag: b'!' }.is_syntax());
        assert!(WireError::UnterminatedLine { len: 1 }.is_syntax());
    }

    #[test]
    fn unknown_tag_displays_hex() {
        let err = WireError::UnknownTag { tag: b'!' };
        assert_eq!(err.to_string(), "invalid syntax: unknown type tag 0x21");
    }
}
