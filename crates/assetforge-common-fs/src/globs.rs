//! Glob expansion with `!` exclusion patterns.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use assetforge_common_core::{Error, ErrorCode, Result};
use glob::Pattern;

/// A compiled set of include and exclude patterns.
///
/// Patterns prefixed with `!` exclude otherwise-matching paths, as in
/// the asset glob lists of the settings file.
#[derive(Debug, Clone)]
pub struct GlobSet {
    includes: Vec<Pattern>,
    excludes: Vec<Pattern>,
}

impl GlobSet {
    /// Compile a pattern list. Entries starting with `!` are exclusions.
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self> {
        let mut includes = Vec::new();
        let mut excludes = Vec::new();

        for raw in patterns {
            let raw = raw.as_ref();
            let (negated, text) = match raw.strip_prefix('!') {
                Some(rest) => (true, rest),
                None => (false, raw),
            };

            let pattern = Pattern::new(text).map_err(|e| Error::FileSystem {
                code: ErrorCode::GLOB_ERROR,
                message: format!("invalid glob pattern `{text}`: {e}"),
                path: None,
                source: Some(Box::new(e)),
            })?;

            if negated {
                excludes.push(pattern);
            } else {
                includes.push(pattern);
            }
        }

        Ok(Self { includes, excludes })
    }

    /// Whether `path` matches an include pattern and no exclude pattern.
    pub fn is_match(&self, path: impl AsRef<Path>) -> bool {
        let path = path.as_ref();
        self.includes.iter().any(|p| p.matches_path(path))
            && !self.excludes.iter().any(|p| p.matches_path(path))
    }
}

/// Whether `path` matches any of the given patterns (ignoring exclusions).
pub fn matches_any<S: AsRef<str>>(path: impl AsRef<Path>, patterns: &[S]) -> Result<bool> {
    let set = GlobSet::new(patterns)?;
    Ok(set.is_match(path))
}

/// Expand a pattern list against the filesystem, rooted at `base`.
///
/// Returns matching files (not directories), sorted and deduplicated,
/// with exclusion patterns applied.
pub fn expand_globs<S: AsRef<str>>(base: &Path, patterns: &[S]) -> Result<Vec<PathBuf>> {
    let mut matched = BTreeSet::new();
    let mut excludes = Vec::new();

    for raw in patterns {
        let raw = raw.as_ref();
        if let Some(rest) = raw.strip_prefix('!') {
            let full = base.join(rest);
            let pattern =
                Pattern::new(&full.to_string_lossy()).map_err(|e| Error::FileSystem {
                    code: ErrorCode::GLOB_ERROR,
                    message: format!("invalid glob pattern `{rest}`: {e}"),
                    path: None,
                    source: Some(Box::new(e)),
                })?;
            excludes.push(pattern);
            continue;
        }

        let full = base.join(raw);
        let entries = glob::glob(&full.to_string_lossy()).map_err(|e| Error::FileSystem {
            code: ErrorCode::GLOB_ERROR,
            message: format!("invalid glob pattern `{raw}`: {e}"),
            path: None,
            source: Some(Box::new(e)),
        })?;

        for entry in entries {
            let path = entry.map_err(|e| Error::FileSystem {
                code: ErrorCode::FILE_READ_ERROR,
                message: format!("failed to read glob entry: {e}"),
                path: None,
                source: Some(Box::new(e)),
            })?;
            if path.is_file() {
                matched.insert(path);
            }
        }
    }

    Ok(matched
        .into_iter()
        .filter(|p| !excludes.iter().any(|e| e.matches_path(p)))
        .collect())
}

/// The static directory prefix of a glob pattern: everything before the
/// first path component containing a metacharacter. Matched files keep
/// their layout relative to this base when copied.
pub fn glob_base(pattern: &str) -> &str {
    let mut end = 0;
    for component in pattern.split('/') {
        if component.contains(['*', '?', '[', '{']) {
            break;
        }
        end += component.len() + 1;
    }
    if end == 0 {
        return "";
    }
    // Drop the trailing separator; a fully static pattern keeps its parent
    let base = &pattern[..end - 1];
    if end >= pattern.len() {
        match base.rfind('/') {
            Some(idx) => &base[..idx],
            None => "",
        }
    } else {
        base
    }
}

/// Expand patterns preserving pattern-list order.
///
/// Files matched by an earlier pattern come first; within one pattern
/// matches are sorted. Duplicates across patterns keep their first
/// position. Used where order is load-bearing, such as script
/// concatenation.
pub fn expand_globs_ordered<S: AsRef<str>>(base: &Path, patterns: &[S]) -> Result<Vec<PathBuf>> {
    let mut seen = BTreeSet::new();
    let mut ordered = Vec::new();

    for raw in patterns {
        let raw = raw.as_ref();
        if raw.starts_with('!') {
            continue;
        }
        for path in expand_globs(base, &[raw])? {
            if seen.insert(path.clone()) {
                ordered.push(path);
            }
        }
    }

    Ok(ordered)
}
