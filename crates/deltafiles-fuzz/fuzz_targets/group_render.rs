#![no_main]
use deltafiles_core::coordination::classify;
use deltafiles_core::patterns::ExtensionFilter;
use deltafiles_core::types::ComparedFile;
use deltafiles_core::{ComputedOutputs, OutputFormat};
use libfuzzer_sys::fuzz_target;

const STATUSES: [&str; 5] = ["added", "modified", "removed", "renamed", "copied"];

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    let files: Vec<ComparedFile> = s
        .split('\0')
        .enumerate()
        .map(|(i, name)| ComparedFile::new(name, STATUSES[i % STATUSES.len()]))
        .collect();

    let Ok(groups) = classify(&files, &ExtensionFilter::default()) else {
        return;
    };

    if let Ok(outputs) = ComputedOutputs::compute(&groups, OutputFormat::Json) {
        let all: Vec<String> = serde_json::from_str(&outputs.all).unwrap();
        assert_eq!(all, groups.all);
    }
    for format in [OutputFormat::SpaceDelimited, OutputFormat::Csv] {
        if let Ok(outputs) = ComputedOutputs::compute(&groups, format) {
            assert_eq!(outputs.get("deleted"), outputs.get("removed"));
        }
    }
});
