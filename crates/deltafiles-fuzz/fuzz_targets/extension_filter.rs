#![no_main]
use deltafiles_core::patterns::{extension_of, ExtensionFilter};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    // First line is the extension list, the rest are paths
    let mut lines = s.lines();
    let filter = ExtensionFilter::parse(lines.next().unwrap_or(""));

    for ext in filter.extensions() {
        assert!(ext.starts_with('.') && ext.len() > 1);
    }
    for path in lines {
        if filter.is_empty() {
            assert!(filter.accepts(path));
        } else if filter.accepts(path) {
            assert!(extension_of(path).is_some());
        }
    }
});
