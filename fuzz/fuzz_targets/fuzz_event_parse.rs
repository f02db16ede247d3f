#![no_main]

use libfuzzer_sys::fuzz_target;

use vestra_ledger::{LedgerConfig, LedgerEvent};

// Parsing untrusted audit lines and config text must never panic.
fuzz_target!(|data: &[u8]| {
    if let Ok(event) = serde_json::from_slice::<LedgerEvent>(data) {
        let line = event.to_json().expect("parsed event re-serializes");
        let back: LedgerEvent = serde_json::from_str(&line).expect("round trip");
        assert_eq!(back, event);
    }

    if let Ok(text) = std::str::from_utf8(data) {
        if let Ok(config) = LedgerConfig::from_toml_str(text) {
            let _ = config.into_params();
        }
    }
});
