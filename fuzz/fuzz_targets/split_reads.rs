#![no_main]

use std::io::{BufReader, Read};

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

// Fuzz target: the same bytes decoded through readers that hand out data
// in arbitrary chunk sizes must give the same result as one contiguous
// slice.

#[derive(Arbitrary, Debug)]
struct Input {
    data: Vec<u8>,
    chunk: u8,
    capacity: u8,
}

/// Reader that returns at most `chunk` bytes per call.
struct Trickle<'a> {
    data: &'a [u8],
    chunk: usize,
}

impl Read for Trickle<'_> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let n = self.chunk.min(buf.len()).min(self.data.len());
        buf[..n].copy_from_slice(&self.data[..n]);
        self.data = &self.data[n..];
        Ok(n)
    }
}

fuzz_target!(|input: Input| {
    let limits = resp_decoder::DecoderLimits {
        max_depth: Some(256),
        ..resp_decoder::DecoderLimits::UNLIMITED
    };

    let whole = resp_decoder::RespDecoder::from_buffered(&input.data[..])
        .with_limits(limits)
        .decode_pipeline();

    let trickle = Trickle {
        data: &input.data,
        chunk: usize::from(input.chunk.max(1)),
    };
    let reader = BufReader::with_capacity(usize::from(input.capacity.max(1)), trickle);
    let split = resp_decoder::RespDecoder::from_buffered(reader)
        .with_limits(limits)
        .decode_pipeline();

    match (whole, split) {
        (Ok(a), Ok(b)) => assert_eq!(a, b),
        (Err(_), Err(_)) => {}
        (a, b) => panic!("chunking changed the outcome: {a:?} vs {b:?}"),
    }
});
