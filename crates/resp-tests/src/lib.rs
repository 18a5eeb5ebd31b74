//! Shared wire captures for the integration suites and benches.
//!
//! Every capture is a literal byte string exactly as it would arrive on a
//! socket, so the suites exercise the decoder against fixed input rather
//! than against anything generated at test time.

/// Two pipelined `GET` commands.
pub const GET_PIPELINE: &[u8] = b"*2\r\n$3\r\nGET\r\n$1\r\nA\r\n*2\r\n$3\r\nGET\r\n$1\r\nB\r\n";

/// Two bare bulk strings back to back.
pub const HELLO_PAIR: &[u8] = b"$11\r\nHello,world\r\n$11\r\nHello,world\r\n";

/// One frame of every type, in reply order.
pub const MIXED_REPLIES: &[u8] = b"+OK\r\n\
-ERR unknown command FOO\r\n\
:1000\r\n\
$6\r\nfoobar\r\n\
$0\r\n\r\n\
$-1\r\n\
*0\r\n\
*3\r\n:1\r\n:2\r\n:3\r\n";

/// A `SET` with a payload that contains the delimiter itself.
pub const BINARY_SET: &[u8] = b"*3\r\n$3\r\nSET\r\n$3\r\nkey\r\n$7\r\nv\r\na\r\nl\r\n";

/// Arrays nested three deep, mixing element types.
pub const NESTED: &[u8] = b"*2\r\n*2\r\n+a\r\n*1\r\n$1\r\nb\r\n:3\r\n";

/// `count` copies of a two-argument command.
pub fn command_burst(count: usize) -> Vec<u8> {
    b"*2\r\n$4\r\nINCR\r\n$7\r\ncounter\r\n".repeat(count)
}

/// A single bulk string of `len` bytes of `x`.
pub fn large_bulk(len: usize) -> Vec<u8> {
    let mut wire = format!("${len}\r\n").into_bytes();
    wire.resize(wire.len() + len, b'x');
    wire.extend_from_slice(b"\r\n");
    wire
}
