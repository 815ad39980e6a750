use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::PathBuf;
use walkdir::WalkDir;

#[derive(Clone, Debug, Default)]
pub struct DiscoverOptions {
    /// Globs matched against paths relative to the walked directory.
    pub exclude: Vec<String>,
    pub follow_links: bool,
}

/// Find the manifest files under `root`.
///
/// Behavior:
/// - A file is returned as-is, whatever its extension.
/// - A directory is walked recursively, keeping `.yaml` / `.yml` files (case-insensitive)
///   that match none of the `exclude` globs. A subdirectory matching a glob is pruned whole,
///   so `vendor` excludes everything under `vendor/`.
/// - Output is sorted lexicographically.
pub fn discover_documents(root: &Utf8Path, opts: &DiscoverOptions) -> anyhow::Result<Vec<Utf8PathBuf>> {
    let meta = std::fs::metadata(root).with_context(|| format!("stat {root}"))?;
    if !meta.is_dir() {
        return Ok(vec![root.to_path_buf()]);
    }

    let exclude_set = build_globset(&opts.exclude).context("compile exclude globset")?;

    let mut out: Vec<Utf8PathBuf> = Vec::new();
    let walker = WalkDir::new(root)
        .follow_links(opts.follow_links)
        .into_iter()
        .filter_entry(|e| !is_excluded_dir(root, e, &exclude_set));
    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(err) => {
                log::warn!("skipping unreadable entry under {root}: {err}");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(abs) = pathbuf_to_utf8(entry.path().to_path_buf()) else {
            log::warn!("skipping non UTF-8 path: {}", entry.path().display());
            continue;
        };
        if !is_yaml_file(&abs) {
            continue;
        }

        let rel = relative_str(root, &abs);
        if exclude_set.is_match(&rel) {
            log::debug!("excluded {rel}");
            continue;
        }

        out.push(abs);
    }

    // Stable order.
    out.sort();
    out.dedup();

    log::debug!("discovered {} manifest file(s) under {root}", out.len());
    Ok(out)
}

/// Directories below `root` whose relative path matches an exclude glob are not descended into.
fn is_excluded_dir(root: &Utf8Path, entry: &walkdir::DirEntry, exclude_set: &GlobSet) -> bool {
    if entry.depth() == 0 || !entry.file_type().is_dir() {
        return false;
    }
    let Some(abs) = Utf8Path::from_path(entry.path()) else {
        return false;
    };
    let rel = relative_str(root, abs);
    if exclude_set.is_match(&rel) {
        log::debug!("excluded directory {rel}");
        return true;
    }
    false
}

fn relative_str(root: &Utf8Path, path: &Utf8Path) -> String {
    path.strip_prefix(root).unwrap_or(path).as_str().replace('\\', "/")
}

pub fn is_yaml_file(path: &Utf8Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"))
        .unwrap_or(false)
}

pub(crate) fn build_globset(patterns: &[String]) -> anyhow::Result<GlobSet> {
    let mut b = GlobSetBuilder::new();
    for p in patterns {
        b.add(Glob::new(p).with_context(|| format!("invalid exclude glob: {p}"))?);
    }
    Ok(b.build()?)
}

fn pathbuf_to_utf8(path: PathBuf) -> Option<Utf8PathBuf> {
    Utf8PathBuf::from_path_buf(path).ok()
}
