use crate::error::WireError;

/// Type tag: the first byte of every protocol line.
///
/// ```text
/// ┌──────┬──────────────┬───────────────────────────────────────┐
/// │ Byte │ Variant      │ Rest of the line                      │
/// ├──────┼──────────────┼───────────────────────────────────────┤
/// │ '+'  │ SimpleString │ payload                               │
/// │ '-'  │ Error        │ payload                               │
/// │ ':'  │ Integer      │ payload (kept as bytes)               │
/// │ '$'  │ BulkString   │ byte count, payload on the next read  │
/// │ '*'  │ Array        │ element count, elements follow        │
/// └──────┴──────────────┴───────────────────────────────────────┘
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tag {
    SimpleString,
    Error,
    Integer,
    BulkString,
    Array,
}

impl Tag {
    /// Map a raw byte to its tag.
    ///
    /// # Errors
    ///
    /// Returns [`WireError::UnknownTag`] for any byte outside `+ - : $ *`.
    pub fn from_byte(byte: u8) -> Result<Self, WireError> {
        match byte {
            b'+' => Ok(Self::SimpleString),
            b'-' => Ok(Self::Error),
            b':' => Ok(Self::Integer),
            b'$' => Ok(Self::BulkString),
            b'*' => Ok(Self::Array),
            tag => Err(WireError::UnknownTag { tag }),
        }
    }

    /// The wire byte for this tag.
    pub fn as_byte(self) -> u8 {
        match self {
            Self::SimpleString => b'+',
            Self::Error => b'-',
            Self::Integer => b':',
            Self::BulkString => b'$',
            Self::Array => b'*',
        }
    }

    /// Simple tags carry their whole payload on the header line.
    pub fn is_simple(self) -> bool {
        matches!(self, Self::SimpleString | Self::Error | Self::Integer)
    }
}
