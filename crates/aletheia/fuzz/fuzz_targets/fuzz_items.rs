//! Fuzz target for item parsing and session start-up.
//!
//! This fuzzer tests that:
//! 1. JSON and JSONL item parsing never panics on malformed input
//! 2. Any collection that parses can drive a session through a full pass

#![no_main]

use aletheia::input::{parse_items, parse_jsonl};
use aletheia::{LabelerConfig, LabelingSession};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Only process reasonable-sized inputs to avoid OOM
    if data.len() > 100_000 {
        return;
    }

    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    let _ = parse_jsonl(text);

    if let Ok(items) = parse_items(text) {
        let total = items.len();
        let mut session = LabelingSession::new(items, LabelerConfig::default());
        for _ in 0..total {
            session.validate();
            let _ = session.validate_rules();
            if session.mark_completed(None).is_err() {
                break;
            }
        }
        assert!(session.progress() <= 100);
    }
});
