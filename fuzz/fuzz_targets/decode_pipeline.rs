#![no_main]

use libfuzzer_sys::fuzz_target;

// Fuzz target: full pipeline decode of arbitrary bytes.
//
// Catches bugs in:
// - Line framing (short lines, bare `\n`, missing delimiter at EOF)
// - Count parsing (signs, overflow, non-digits)
// - Bulk reads with lying lengths
// - Deep or wide array recursion
//
// Also checks that decoding is deterministic and that the structured
// frames flatten to exactly what the flat pipeline returns.
fuzz_target!(|data: &[u8]| {
    let limits = resp_decoder::DecoderLimits {
        max_depth: Some(256),
        ..resp_decoder::DecoderLimits::UNLIMITED
    };

    let flat = resp_decoder::RespDecoder::from_buffered(data)
        .with_limits(limits)
        .decode_pipeline();
    let again = resp_decoder::RespDecoder::from_buffered(data)
        .with_limits(limits)
        .decode_pipeline();
    assert_eq!(flat.is_ok(), again.is_ok());

    let mut decoder = resp_decoder::RespDecoder::from_buffered(data).with_limits(limits);
    let frames: Result<Vec<_>, _> = decoder.frames().collect();

    if let (Ok(flat), Ok(again), Ok(frames)) = (flat, again, frames) {
        assert_eq!(flat, again);
        let flattened: Vec<_> = frames.iter().map(resp_types::Frame::flatten).collect();
        assert_eq!(flat, flattened);
    }
});
