#![no_main]
use bytespan::{ParseOptions, Span, from_hex};
use libfuzzer_sys::fuzz_target;

// Every knob combination must hold the no-panic and exact-output-size
// guarantees for arbitrary input bytes.
const OPTION_SETS: &[ParseOptions] = &[
    ParseOptions {
        base: 10,
        allow_whitespace: true,
        allow_underscore: false,
        allow_prefix: false,
        strict: true,
    },
    ParseOptions {
        base: 2,
        allow_whitespace: false,
        allow_underscore: true,
        allow_prefix: true,
        strict: false,
    },
    ParseOptions {
        base: 16,
        allow_whitespace: true,
        allow_underscore: true,
        allow_prefix: true,
        strict: true,
    },
    ParseOptions {
        base: 62,
        allow_whitespace: true,
        allow_underscore: false,
        allow_prefix: false,
        strict: false,
    },
];

fuzz_target!(|data: &[u8]| {
    let span = Span::from_slice(data);

    for options in OPTION_SETS {
        let _ = span.parse_number_with::<i64>(options);
        let _ = span.parse_number_with::<u8>(options);
        let _ = span.parse_f64_with(options);
    }

    let encoded = span.to_hex_string();
    assert_eq!(encoded.len(), data.len() * 2);
    let decoded = from_hex(&encoded).expect("own encoding must decode");
    assert_eq!(decoded.as_slice(), data);

    let dump = span.to_hex_dump();
    if data.is_empty() {
        assert!(dump.is_empty());
    } else {
        assert_eq!(dump.lines().count(), data.len().div_ceil(16));
    }
});
