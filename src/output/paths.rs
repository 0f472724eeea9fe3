// src/output/paths.rs
//! Pure functions for path calculations and filename sanitizing.
//!
//! This module handles all path-related operations without
//! performing any I/O operations.

use crate::constants::MAX_PATH_SEGMENT_BYTES;
use crate::site::Route;
use std::path::{Component, Path, PathBuf};

/// File name every route is written to inside its directory.
pub const ROUTE_DOCUMENT: &str = "index.html";

/// Sanitizes a string to be safe for use as a single path segment.
pub fn sanitize_filename(name: &str) -> String {
    let safe_name = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '#' | '%' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect::<String>();

    let safe_name = truncate_bytes(safe_name.trim().trim_matches('.'), MAX_PATH_SEGMENT_BYTES);

    if safe_name.is_empty() {
        "unnamed".to_string()
    } else {
        safe_name
    }
}

/// The longest prefix of `s` that fits in `max` bytes without splitting a char.
fn truncate_bytes(s: &str, max: usize) -> String {
    let mut end = s.len().min(max);
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    s[..end].to_string()
}

/// Where the document of the route at `route_path` lives under `out_dir`.
pub fn route_path_file(out_dir: &Path, route_path: &str) -> PathBuf {
    out_dir
        .join(route_path.trim_start_matches('/'))
        .join(ROUTE_DOCUMENT)
}

/// `<out_dir>/blog/{genre}/.../index.html` for `route`.
pub fn route_file_path(out_dir: &Path, route: &Route) -> PathBuf {
    route_path_file(out_dir, &route.path())
}

/// Checks that `path` stays inside `base_dir` once `.` and `..` are resolved.
pub fn is_safe_path(path: &Path, base_dir: &Path) -> bool {
    normalize_path(path).starts_with(normalize_path(base_dir))
}

/// Normalizes a path by resolving .. and . components.
fn normalize_path(path: &Path) -> PathBuf {
    let mut components = Vec::new();

    for component in path.components() {
        match component {
            Component::ParentDir => {
                components.pop();
            }
            Component::CurDir => {}
            c => components.push(c),
        }
    }

    components.into_iter().collect()
}
