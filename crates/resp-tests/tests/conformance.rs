//! Conformance snapshots: fixed captures decoded and rendered to text.
//!
//! Each pipeline entry is rendered as `index: "escaped bytes"` so binary
//! payloads and empty results stay visible. Snapshots are inline; a diff
//! means either a deliberate decoding change (accept via
//! `cargo insta review`) or a regression.

use insta::assert_snapshot;
use resp_decoder::decode_bytes;
use resp_tests::{BINARY_SET, GET_PIPELINE, HELLO_PAIR, MIXED_REPLIES, NESTED};

fn render(capture: &[u8]) -> String {
    let pipeline =
        decode_bytes(capture).unwrap_or_else(|e| panic!("decode failed for {capture:?}: {e}"));
    pipeline
        .iter()
        .enumerate()
        .map(|(i, entry)| format!("{i}: \"{}\"", entry.escape_ascii()))
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn get_pipeline() {
    assert_snapshot!(render(GET_PIPELINE), @r#"
    0: "GET A"
    1: "GET B"
    "#);
}

#[test]
fn hello_pair() {
    assert_snapshot!(render(HELLO_PAIR), @r#"
    0: "Hello,world"
    1: "Hello,world"
    "#);
}

#[test]
fn mixed_replies() {
    assert_snapshot!(render(MIXED_REPLIES), @r#"
    0: "OK"
    1: "ERR unknown command FOO"
    2: "1000"
    3: "foobar"
    4: ""
    5: "$-1"
    6: ""
    7: "1 2 3"
    "#);
}

#[test]
fn binary_set() {
    assert_snapshot!(render(BINARY_SET), @r#"0: "SET key v\r\na\r\nl""#);
}

#[test]
fn nested() {
    assert_snapshot!(render(NESTED), @r#"0: "a b 3""#);
}

#[test]
fn truncated_array_error_message() {
    let err = decode_bytes(b"*2\r\n+a\r\n").unwrap_err();
    assert_snapshot!(err.to_string(), @"incomplete stream: input ended mid-frame at offset 8");
}

#[test]
fn bad_terminator_error_message() {
    let err = decode_bytes(b"+OK\n").unwrap_err();
    assert_snapshot!(err.to_string(), @"invalid syntax: line of 4 bytes is not CRLF-terminated");
}
