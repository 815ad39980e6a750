//! Fuzz target for `--exclude` glob compilation and matching.
//!
//! Goal: invalid patterns are errors, never panics.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_exclude_globs
//! ```

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct GlobInput {
    /// Exclude patterns (e.g. "vendor/**", "*.generated.yaml")
    patterns: Vec<String>,
    /// Relative manifest paths to match against
    candidates: Vec<String>,
}

fuzz_target!(|input: GlobInput| {
    if input.patterns.len() > 20 || input.candidates.len() > 100 {
        return;
    }

    let patterns: Vec<String> = input
        .patterns
        .into_iter()
        .filter(|p| p.len() <= 256)
        .collect();
    let candidates: Vec<String> = input
        .candidates
        .into_iter()
        .filter(|c| c.len() <= 512)
        .collect();

    if let Ok(matched) = kubecheck_repo::fuzz::match_excludes(&patterns, &candidates) {
        assert!(matched.len() <= candidates.len());
    }
});
