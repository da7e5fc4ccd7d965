//! Recursive file enumeration
//!
//! Used by services at startup to discover route handlers, schema files,
//! and similar assets under a source tree. Traversal order is made
//! deterministic by sorting directory entries.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Recursively collects files under the given roots.
///
/// Directories whose name appears in `ignore_dirs` are skipped entirely.
/// Only files whose extension (without the dot) appears in `extensions`
/// are collected; an empty extension list collects nothing.
pub fn collect_files<P: AsRef<Path>>(
    roots: &[P],
    ignore_dirs: &[&str],
    extensions: &[&str],
) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let mut pending: Vec<PathBuf> = roots.iter().map(|p| p.as_ref().to_path_buf()).collect();

    while let Some(dir) = pending.pop() {
        let mut entries: Vec<PathBuf> = fs::read_dir(&dir)?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<io::Result<_>>()?;
        entries.sort();

        for path in entries {
            let metadata = fs::metadata(&path)?;

            if metadata.is_dir() {
                let name = path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .unwrap_or_default();
                if !ignore_dirs.contains(&name) {
                    pending.push(path);
                }
            } else if metadata.is_file() {
                let ext = path
                    .extension()
                    .and_then(|e| e.to_str())
                    .unwrap_or_default();
                if extensions.contains(&ext) {
                    files.push(path);
                }
            }
        }
    }

    Ok(files)
}
