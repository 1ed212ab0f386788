//! Icon indexing and memoized prefix search.

use crate::error::IconError;
use indexmap::IndexMap;
use log::debug;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// One icon search location.
#[derive(Clone, Debug)]
pub struct IconRoot {
    pub dir: PathBuf,
    pub recursive: bool,
}

impl IconRoot {
    /// A root whose whole subtree is scanned.
    pub fn recursive(dir: PathBuf) -> Self {
        Self {
            dir,
            recursive: true,
        }
    }

    /// A root where only the directory itself is scanned.
    pub fn flat(dir: PathBuf) -> Self {
        Self {
            dir,
            recursive: false,
        }
    }
}

/// Name-addressable index of icon files across ordered search roots.
///
/// Roots are scanned once at construction, in order; a later root's
/// entry for an already-seen name overwrites the earlier one. Entry
/// iteration order is scan order, which prefix search results
/// preserve. The only mutator after construction is [`IconIndex::add_icon`].
pub struct IconIndex {
    entries: IndexMap<String, PathBuf>,
    user_dir: PathBuf,
    search_cache: HashMap<String, Vec<(String, PathBuf)>>,
}

impl IconIndex {
    /// Scan `roots` in order and build the index. `user_dir` is the
    /// directory `add_icon` imports into.
    ///
    /// Unreadable or missing roots are skipped; the index holds
    /// whatever the remaining roots yield.
    pub fn build(roots: &[IconRoot], user_dir: PathBuf) -> Self {
        let mut entries = IndexMap::new();
        for root in roots {
            scan_root(&mut entries, root);
        }
        debug!("indexed {} icons across {} roots", entries.len(), roots.len());

        // The empty query is seeded as "no results" and, like every
        // other cached query, never recomputed.
        let mut search_cache = HashMap::new();
        search_cache.insert(String::new(), Vec::new());

        Self {
            entries,
            user_dir,
            search_cache,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether `key` names an indexed icon.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Path of the icon indexed under `key`.
    pub fn get(&self, key: &str) -> Option<&Path> {
        self.entries.get(key).map(PathBuf::as_path)
    }

    /// Memoized prefix search over the index, in scan order.
    ///
    /// A cached result is returned as-is even if the index grew since
    /// it was computed; repeated type-ahead queries stay O(1) at the
    /// cost of staleness after `add_icon`.
    pub fn search(&mut self, query: &str) -> &[(String, PathBuf)] {
        let entries = &self.entries;
        self.search_cache
            .entry(query.to_string())
            .or_insert_with(|| {
                entries
                    .iter()
                    .filter(|(name, _)| name.starts_with(query))
                    .map(|(name, path)| (name.clone(), path.clone()))
                    .collect()
            })
    }

    /// Import `source` into the user icon directory and merge it into
    /// the index. Only `png` and `svg` files are accepted.
    ///
    /// Previously cached search results are left alone: a query cached
    /// before the import keeps reflecting the index as it was then.
    pub fn add_icon(&mut self, source: &Path) -> Result<(), IconError> {
        match source.extension().and_then(|e| e.to_str()) {
            Some("png") | Some("svg") => {}
            _ => return Err(IconError::UnsupportedFormat(source.to_path_buf())),
        }

        let file_name = source
            .file_name()
            .ok_or_else(|| IconError::UnsupportedFormat(source.to_path_buf()))?;
        fs::create_dir_all(&self.user_dir)?;
        fs::copy(source, self.user_dir.join(file_name))?;

        scan_root(&mut self.entries, &IconRoot::flat(self.user_dir.clone()));
        Ok(())
    }
}

fn scan_root(entries: &mut IndexMap<String, PathBuf>, root: &IconRoot) {
    if !root.dir.is_dir() {
        debug!("skipping icon root {}", root.dir.display());
        return;
    }

    let mut walker = walkdir::WalkDir::new(&root.dir);
    if !root.recursive {
        walker = walker.max_depth(1);
    }

    for entry in walker.into_iter().filter_map(|e| e.ok()) {
        // Regular files only; symlinked and broken entries are skipped.
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        if !has_icon_ext(path) {
            continue;
        }

        let stem = match path.file_stem().and_then(|s| s.to_str()) {
            Some(s) => s.to_string(),
            None => continue,
        };

        // IndexMap keeps the original position on overwrite, so
        // precedence changes the path without reordering results.
        entries.insert(stem, path.to_path_buf());
    }
}

/// Extension filter matching the `*.[ps][nv]g` icon pattern: `png`,
/// `svg` and the degenerate forms the character classes admit.
fn has_icon_ext(path: &Path) -> bool {
    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        return false;
    };
    let ext = ext.to_ascii_lowercase();
    let b = ext.as_bytes();
    b.len() == 3 && matches!(b[0], b'p' | b's') && matches!(b[1], b'n' | b'v') && b[2] == b'g'
}
