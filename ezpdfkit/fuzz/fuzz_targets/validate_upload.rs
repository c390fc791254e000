#![no_main]

use ezpdfkit::validation::{Upload, Validator};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut bytes = b"%PDF-1.4\n".to_vec();
    bytes.extend_from_slice(data);

    // Arbitrary bytes must be refused or accepted, never panic.
    if let Ok(source) = Validator::default().validate(&Upload::new("fuzz.pdf", bytes)) {
        assert!(source.page_count > 0);
    }
});
