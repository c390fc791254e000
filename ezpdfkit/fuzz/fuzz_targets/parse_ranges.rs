#![no_main]

use ezpdfkit::plan::{Strategy, plan};
use ezpdfkit::range;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Some((&first, rest)) = data.split_first() else {
        return;
    };
    let total = u32::from(first) + 1;
    let text = String::from_utf8_lossy(rest);

    let set = range::parse(&text, total);
    assert!(set.pages().windows(2).all(|w| w[0] < w[1]));
    assert!(set.pages().iter().all(|&p| (1..=total).contains(&p)));

    let points = range::parse_split_points(&text, total);
    if !points.is_empty() {
        let split = plan(
            total,
            &Strategy::SplitAt {
                points: points.pages().to_vec(),
            },
        )
        .unwrap();
        let joined: Vec<u32> = split.segments.iter().flat_map(|s| s.pages()).collect();
        assert_eq!(joined, (1..=total).collect::<Vec<_>>());
    }
});
