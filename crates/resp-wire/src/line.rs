use crate::error::WireError;

/// Line delimiter. Every header line and every bulk payload ends with it.
pub const CRLF: &[u8; 2] = b"\r\n";

/// Check that `line` (as returned by a `read_until(b'\n')`) ends in CRLF.
///
/// The reader only guarantees the trailing `\n`; this rejects lines with
/// fewer than two bytes and lines whose `\n` is not preceded by `\r`.
///
/// # Errors
///
/// Returns [`WireError::UnterminatedLine`] on either failure.
pub fn validate_line(line: &[u8]) -> Result<(), WireError> {
    let len = line.len();
    if len > 1 && line[len - 2] == b'\r' {
        Ok(())
    } else {
        Err(WireError::UnterminatedLine { len })
    }
}

/// Payload of a simple line: tag byte and trailing CRLF removed.
///
/// Expects a line that already passed [`validate_line`]. A bare `\r\n`
/// yields an empty slice rather than panicking.
pub fn simple_payload(line: &[u8]) -> &[u8] {
    let end = line.len().saturating_sub(CRLF.len());
    line.get(1..end).unwrap_or_default()
}

/// Parse the decimal count of a `$` or `*` header line.
///
/// The digits are the bytes between the tag and the first `\r`. A leading
/// sign is accepted, so `-1` and `+3` both parse.
///
/// # Errors
///
/// Returns [`WireError::InvalidCount`] with the underlying parse error
/// when the digits are empty, non-numeric, or overflow `i64`.
pub fn parse_count(line: &[u8]) -> Result<i64, WireError> {
    let end = line
        .iter()
        .position(|&b| b == b'\r')
        .unwrap_or(line.len());
    let digits = line.get(1..end).unwrap_or_default();
    // Non-UTF-8 digits become U+FFFD and fail as an invalid digit.
    let count = String::from_utf8_lossy(digits).parse::<i64>()?;
    Ok(count)
}
