#![no_main]

use libfuzzer_sys::fuzz_target;

// Fuzz target: single-line helpers in `resp-wire`.
//
// None of them may panic on any input, validated or not.
fuzz_target!(|data: &[u8]| {
    let _ = resp_wire::validate_line(data);
    let _ = resp_wire::parse_count(data);
    let _ = resp_wire::simple_payload(data);
    if let Some(&first) = data.first() {
        let _ = resp_wire::Tag::from_byte(first);
    }
});
