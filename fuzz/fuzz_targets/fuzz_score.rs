#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let s = String::from_utf8_lossy(data);

    let Ok(result) = apiscore::score(&s) else {
        return;
    };
    let report = result.report;

    if report.total_score > report.max_total_score {
        panic!(
            "Total {} exceeds maximum {}.\nInput (lossy): {:?}",
            report.total_score,
            report.max_total_score,
            s.get(..200).unwrap_or(&s),
        );
    }
    for category in &report.reports {
        assert!(
            category.points >= 0.0 && category.points <= category.max_points,
            "{} scored {} of {}",
            category.category,
            category.points,
            category.max_points,
        );
    }

    let json = apiscore::serialize::to_json(&report).expect("report serializes");
    let _: serde_json::Value = serde_json::from_str(&json).expect("report JSON parses");
});
