#![no_main]
use deltafiles_core::{Event, EventKind};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(payload) = serde_json::from_slice::<serde_json::Value>(data) else {
        return;
    };
    for kind in [EventKind::Push, EventKind::PullRequest, EventKind::WorkflowDispatch] {
        if let Ok(event) = Event::from_payload(kind, &payload, Some("0000000")) {
            assert_eq!(event.kind(), kind);
        }
    }
});
