//! Fuzz target for rule configuration parsing and resolution.
//!
//! Goal: YAML and TOML configs should **never panic** during parse or resolve.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_config_parser
//! ```

#![no_main]

use kubecheck_settings::{ConfigFormat, Overrides, parse_config, resolve_config};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        for format in [ConfigFormat::Yaml, ConfigFormat::Toml] {
            if let Ok(cfg) = parse_config(text, format) {
                let _ = resolve_config(cfg, Overrides::default());
            }
        }
    }
});
