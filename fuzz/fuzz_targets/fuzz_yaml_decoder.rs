//! Fuzz target for manifest stream decoding and container extraction.
//!
//! Goal: decoding should **never panic** on any input. Malformed YAML is an error, not a crash.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_yaml_decoder
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        let decoded = kubecheck_repo::fuzz::decode_manifest_stream(text);
        let extracted = kubecheck_repo::fuzz::decode_and_extract(text);
        assert_eq!(decoded.is_ok(), extracted.is_ok());
    }
});
