#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    let value = match fson::parse(text) {
        Ok(v) => v,
        Err(_) => return,
    };

    // Invariant: a value that parsed successfully must serialize and
    // reparse into an equal value (spec §8 property 1), for both output
    // modes. Never panics on arbitrary (valid-parse) input.
    for opts in [fson::FormatOptions::compact(), fson::FormatOptions::pretty()] {
        let text = fson::serialize(&value, &opts);
        match fson::parse(&text) {
            Ok(reparsed) => {
                assert!(
                    value.equals(&reparsed),
                    "roundtrip mismatch: {:?} -> {:?} -> {:?}",
                    value,
                    text,
                    reparsed
                );
            }
            Err(e) => panic!("serialize output failed to reparse: {:?}\ntext: {}", e, text),
        }
    }
});
