#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let s = String::from_utf8_lossy(data);

    // Parse must never panic; validation must not panic on anything parse accepts.
    if let Ok(doc) = apiscore::parse(&s) {
        let _ = apiscore::validate(&doc);
    }
});
