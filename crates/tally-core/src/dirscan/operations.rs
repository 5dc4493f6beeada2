use crate::aggregate::ScoredItem;
use crate::dirscan::errors::ScanError;
use crate::dirscan::types::ScanMode;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Stream every entry under `root` that `mode` includes and that is at least
/// `min_size` bytes, scored by size and keyed by its path.
///
/// Nothing is buffered; entries are yielded as the walk reaches them. Entries
/// that cannot be read or stat'ed come out as `Err` for the caller to skip.
/// Symlinked directories are not descended into; a symlink's size is the size
/// of its target.
pub fn scan_entries(
    root: &Path,
    mode: ScanMode,
    min_size: u64,
) -> impl Iterator<Item = Result<ScoredItem<PathBuf>, ScanError>> {
    WalkDir::new(root)
        .min_depth(1)
        .into_iter()
        .filter_map(move |entry| {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    return Some(Err(ScanError::WalkFailed {
                        path: e
                            .path()
                            .map(|p| p.display().to_string())
                            .unwrap_or_default(),
                        message: e.to_string(),
                    }));
                }
            };

            if !mode.includes(entry.file_type(), entry.path()) {
                return None;
            }

            let size = match std::fs::metadata(entry.path()) {
                Ok(metadata) => metadata.len(),
                Err(e) => {
                    return Some(Err(ScanError::StatFailed {
                        path: entry.path().display().to_string(),
                        message: e.to_string(),
                    }));
                }
            };

            if size < min_size {
                return None;
            }

            let path = entry.into_path();
            Some(Ok(ScoredItem::new(
                size,
                path.to_string_lossy().into_owned(),
                path,
            )))
        })
}

/// Display form of a scanned path: relative to `root` when asked and
/// possible, otherwise unchanged.
pub fn format_path(path: &Path, root: &Path, relative: bool) -> String {
    if relative && let Ok(stripped) = path.strip_prefix(root) {
        return stripped.display().to_string();
    }
    path.display().to_string()
}
