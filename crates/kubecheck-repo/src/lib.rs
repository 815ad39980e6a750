//! Input adapters: discover manifest files, read them, and decode YAML into resources.
//!
//! This crate is allowed to do filesystem IO. It does not spawn processes; rendered chart
//! output is handed in as text by the caller (typically the CLI).

#![forbid(unsafe_code)]

mod decode;
mod discover;

use camino::Utf8PathBuf;
use kubecheck_domain::Resource;
use kubecheck_types::{SkippedSource, SourcePath, ids};

pub use decode::{DecodeError, Location, decode_documents, to_value};
pub use discover::{DiscoverOptions, discover_documents, is_yaml_file};

/// Fuzz-friendly API for testing decoding robustness without filesystem access.
/// These functions are designed to never panic on any input.
pub mod fuzz {
    use super::*;

    /// Decode arbitrary text as a manifest stream.
    ///
    /// Returns the number of resources kept. **Never panics** on any input.
    pub fn decode_manifest_stream(text: &str) -> Result<usize, DecodeError> {
        Ok(decode::decode_documents(text)?.len())
    }

    /// Decode arbitrary text and extract containers from every resource.
    ///
    /// **Never panics** on any input.
    pub fn decode_and_extract(text: &str) -> Result<usize, DecodeError> {
        let resources = decode::decode_documents(text)?;
        Ok(resources.iter().map(|r| kubecheck_domain::extract(r).len()).sum())
    }

    /// Compile exclude globs and match them against candidate paths.
    ///
    /// Returns `Ok(matched_paths)` if every pattern is valid, `Err(...)` otherwise.
    /// **Never panics** on any input.
    pub fn match_excludes(patterns: &[String], candidates: &[String]) -> anyhow::Result<Vec<String>> {
        let set = discover::build_globset(patterns)?;
        Ok(candidates
            .iter()
            .filter(|c| set.is_match(c.as_str()))
            .cloned()
            .collect())
    }
}

/// The resources decoded from one source, in document order.
#[derive(Clone, Debug, PartialEq)]
pub struct SourceDocuments {
    pub source: SourcePath,
    pub resources: Vec<Resource>,
}

/// Result of reading a batch of files: what decoded, and what was skipped and why.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LoadedSources {
    pub sources: Vec<SourceDocuments>,
    pub skipped: Vec<SkippedSource>,
}

impl LoadedSources {
    pub fn files_scanned(&self) -> usize {
        self.sources.len() + self.skipped.len()
    }

    pub fn documents(&self) -> usize {
        self.sources.iter().map(|s| s.resources.len()).sum()
    }

    /// Add the outcome of decoding one in-memory source.
    pub fn push_text(&mut self, source: SourcePath, text: &str) {
        match decode_source(source.clone(), text) {
            Ok(docs) => self.sources.push(docs),
            Err(err) => {
                log::warn!("skipping {source}: {err}");
                self.skipped.push(SkippedSource {
                    source,
                    reason: ids::REASON_DECODE_ERROR.to_string(),
                    detail: err.to_string(),
                });
            }
        }
    }
}

/// Decode in-memory text (stdin, rendered chart output) under a synthetic source name.
pub fn decode_source(source: SourcePath, text: &str) -> Result<SourceDocuments, DecodeError> {
    let resources = decode::decode_documents(text)?;
    log::debug!("{source}: {} document(s)", resources.len());
    Ok(SourceDocuments { source, resources })
}

/// Read and decode every file in `paths`, in order.
///
/// Per-file read or decode failures are recorded in `skipped`; the batch always completes.
pub fn load_sources(paths: &[Utf8PathBuf]) -> LoadedSources {
    let mut out = LoadedSources::default();

    for path in paths {
        let source = SourcePath::from(path.as_path());
        match std::fs::read_to_string(path) {
            Ok(text) => out.push_text(source, &text),
            Err(err) => {
                log::warn!("skipping {source}: {err}");
                out.skipped.push(SkippedSource {
                    source,
                    reason: ids::REASON_READ_ERROR.to_string(),
                    detail: err.to_string(),
                });
            }
        }
    }

    out
}
