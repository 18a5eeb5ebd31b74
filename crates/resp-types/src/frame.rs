use bytes::{BufMut, Bytes, BytesMut};
use resp_wire::Tag;

/// What a flattened null bulk string materializes as.
///
/// A `$-1` header carries no payload, but the flattened form keeps the
/// header bytes themselves (tag and digits, delimiter stripped). Callers
/// that need to tell a null apart from a bulk string holding the text
/// `$-1` should inspect the [`Frame`] instead of its flattened bytes.
pub const NULL_BULK: &[u8] = b"$-1";

/// Which single-line type a [`Frame::Simple`] came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SimpleKind {
    /// `+OK`
    Status,
    /// `-ERR message`
    Error,
    /// `:1000`, kept as the raw digits.
    Integer,
}

impl SimpleKind {
    /// The simple kind for a tag, or `None` for bulk strings and arrays.
    pub fn from_tag(tag: Tag) -> Option<Self> {
        match tag {
            Tag::SimpleString => Some(Self::Status),
            Tag::Error => Some(Self::Error),
            Tag::Integer => Some(Self::Integer),
            Tag::BulkString | Tag::Array => None,
        }
    }

    pub fn tag(self) -> Tag {
        match self {
            Self::Status => Tag::SimpleString,
            Self::Error => Tag::Error,
            Self::Integer => Tag::Integer,
        }
    }
}

/// One decoded protocol unit.
///
/// ```text
///   Frame
///   ├── Simple { kind, payload }  ← + - :   (single line)
///   ├── Bulk(payload)             ← $<n>    (binary-safe, explicit length)
///   ├── Null                      ← $-1
///   └── Array(children)           ← *<n>    (nested frames)
/// ```
///
/// Frames are built bottom-up by the decoder and never mutated afterwards.
/// Most consumers only want the [`flatten`](Self::flatten)ed bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Frame {
    Simple { kind: SimpleKind, payload: Bytes },
    Bulk(Bytes),
    Null,
    Array(Vec<Frame>),
}

impl Frame {
    /// The wire tag this frame was decoded from.
    pub fn tag(&self) -> Tag {
        match self {
            Self::Simple { kind, .. } => kind.tag(),
            Self::Bulk(_) | Self::Null => Tag::BulkString,
            Self::Array(_) => Tag::Array,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Materialize the frame as a single byte sequence.
    ///
    /// Simple and bulk frames yield their payload. Arrays yield their
    /// children's flattened bytes joined by one ASCII space. The space is
    /// written only when the array's accumulated output is already
    /// non-empty, so leading empty children add nothing while a trailing
    /// empty child still leaves a trailing space:
    ///
    /// ```text
    ///   ["", "a", "b"]  →  "a b"
    ///   ["a", ""]       →  "a "
    ///   [["a", "b"]]    →  "a b"
    /// ```
    ///
    /// Nesting is not recoverable from the result.
    pub fn flatten(&self) -> Bytes {
        match self {
            Self::Simple { payload, .. } | Self::Bulk(payload) => payload.clone(),
            Self::Null => Bytes::from_static(NULL_BULK),
            Self::Array(_) => {
                let mut out = BytesMut::new();
                self.flatten_into(&mut out);
                out.freeze()
            }
        }
    }

    /// Append the flattened bytes of this frame to `out`.
    pub fn flatten_into(&self, out: &mut BytesMut) {
        match self {
            Self::Simple { payload, .. } | Self::Bulk(payload) => out.put_slice(payload),
            Self::Null => out.put_slice(NULL_BULK),
            Self::Array(children) => {
                let start = out.len();
                for child in children {
                    if out.len() > start {
                        out.put_u8(b' ');
                    }
                    child.flatten_into(out);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bulk(data: &'static [u8]) -> Frame {
        Frame::Bulk(Bytes::from_static(data))
    }

    #[test]
    fn simple_flattens_to_payload() {
        let frame = Frame::Simple {
            kind: SimpleKind::Status,
            payload: Bytes::from_static(b"OK"),
        };
        assert_eq!(frame.flatten(), Bytes::from_static(b"OK"));
        assert_eq!(frame.tag(), Tag::SimpleString);
    }

    #[test]
    fn array_joins_with_single_space() {
        let frame = Frame::Array(vec![bulk(b"GET"), bulk(b"A")]);
        assert_eq!(&frame.flatten()[..], b"GET A");
    }

    #[test]
    fn nested_arrays_flatten_fully() {
        let frame = Frame::Array(vec![
            Frame::Array(vec![bulk(b"a"), bulk(b"b")]),
            bulk(b"c"),
        ]);
        assert_eq!(&frame.flatten()[..], b"a b c");
    }

    #[test]
    fn leading_empty_children_add_no_separator() {
        let frame = Frame::Array(vec![bulk(b""), bulk(b"a"), bulk(b"b")]);
        assert_eq!(&frame.flatten()[..], b"a b");
    }

    #[test]
    fn trailing_empty_child_leaves_trailing_space() {
        let frame = Frame::Array(vec![bulk(b"a"), bulk(b"")]);
        assert_eq!(&frame.flatten()[..], b"a ");
    }

    #[test]
    fn separator_tracks_the_enclosing_array_only() {
        // The inner array starts its own accumulator even though the outer
        // buffer already holds bytes.
        let frame = Frame::Array(vec![
            bulk(b"x"),
            Frame::Array(vec![bulk(b""), bulk(b"y")]),
        ]);
        assert_eq!(&frame.flatten()[..], b"x y");
    }

    #[test]
    fn empty_array_flattens_to_nothing() {
        assert!(Frame::Array(Vec::new()).flatten().is_empty());
    }

    #[test]
    fn null_flattens_to_raw_header() {
        assert_eq!(&Frame::Null.flatten()[..], b"$-1");
        assert!(Frame::Null.is_null());
        assert_eq!(Frame::Null.tag(), Tag::BulkString);
    }

    #[test]
    fn simple_kind_round_trips_through_tag() {
        for kind in [SimpleKind::Status, SimpleKind::Error, SimpleKind::Integer] {
            assert_eq!(SimpleKind::from_tag(kind.tag()), Some(kind));
        }
        assert_eq!(SimpleKind::from_tag(Tag::Array), None);
    }
}
