//! Recursive file discovery and reading
//!
//! The analyzer consumes text in, reports out; everything filesystem-shaped
//! lives here.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use walkdir::{DirEntry, WalkDir};

fn is_excluded(entry: &DirEntry, skip_patterns: &[String]) -> bool {
    let path_str = entry.path().to_str().unwrap_or("");

    for component in entry.path().components() {
        if let Some(name) = component.as_os_str().to_str() {
            if skip_patterns
                .iter()
                .any(|pattern| name == pattern || path_str.contains(pattern))
            {
                return true;
            }
        }
    }
    false
}

/// Recursively collect every file under a directory.
pub fn find_files(root: &Path, skip_patterns: &[String]) -> Vec<PathBuf> {
    let walker = WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| !is_excluded(e, skip_patterns));

    walker
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_file())
        .map(|entry| entry.path().to_path_buf())
        .collect()
}

/// Recursively collect the Python files under a directory.
pub fn find_python_files(root: &Path, skip_patterns: &[String]) -> Vec<PathBuf> {
    find_files(root, skip_patterns)
        .into_iter()
        .filter(|path| path.extension().and_then(|ext| ext.to_str()) == Some("py"))
        .collect()
}

/// Read a file's full contents.
pub fn read_file_contents(path: &Path) -> Result<String> {
    Ok(fs::read_to_string(path)?)
}
