#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input {
    a: String,
    b: String,
}

fuzz_target!(|input: Input| {
    let forward = apiscore::primitives::paths_overlap(&input.a, &input.b);
    let backward = apiscore::primitives::paths_overlap(&input.b, &input.a);
    assert_eq!(forward, backward, "overlap must be symmetric: {:?}", input);
    assert!(apiscore::primitives::paths_overlap(&input.a, &input.a));

    let _ = apiscore::primitives::compare_naming(&input.a, &input.b);
    let _ = apiscore::primitives::StatusKey::parse(&input.a);
});
