#![no_main]
use deltafiles_core::git::branches::PARENT_BRANCHES;
use deltafiles_core::git::{find_parent_branch, parse_branch_listing};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(listing) = std::str::from_utf8(data) {
        let names = parse_branch_listing(listing);
        for name in &names {
            assert!(!name.is_empty());
            assert!(!name.starts_with('('));
        }
        if let Some(parent) = find_parent_branch(names.iter().copied()) {
            assert!(PARENT_BRANCHES.contains(&parent));
        }
    }
});
