// src/site/routes.rs
//! The three static route shapes of the blog.

use crate::constants::BLOG_ROOT;
use crate::output::sanitize_filename;
use crate::types::PageId;
use serde::Serialize;
use std::fmt;

/// A statically generated page.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Route {
    /// `/blog/{genre}/list`
    List { genre: String },
    /// `/blog/{genre}/detail/{id}`
    Detail { genre: String, id: PageId },
    /// `/blog/{genre}/categories/{tag}`
    Category { genre: String, tag: String },
}

impl Route {
    pub fn list(genre: &str) -> Self {
        Route::List {
            genre: genre.to_string(),
        }
    }

    pub fn detail(genre: &str, id: PageId) -> Self {
        Route::Detail {
            genre: genre.to_string(),
            id,
        }
    }

    pub fn category(genre: &str, tag: &str) -> Self {
        Route::Category {
            genre: genre.to_string(),
            tag: tag.to_string(),
        }
    }

    pub fn genre(&self) -> &str {
        match self {
            Route::List { genre } | Route::Detail { genre, .. } | Route::Category { genre, .. } => {
                genre
            }
        }
    }

    /// The URL path of the route. Page ids use Notion's dashed form; tag
    /// names are made safe to serve as a single path segment.
    pub fn path(&self) -> String {
        match self {
            Route::List { genre } => format!("{}/{}/list", BLOG_ROOT, path_segment(genre)),
            Route::Detail { genre, id } => format!(
                "{}/{}/detail/{}",
                BLOG_ROOT,
                path_segment(genre),
                id.to_dashed()
            ),
            Route::Category { genre, tag } => format!(
                "{}/{}/categories/{}",
                BLOG_ROOT,
                path_segment(genre),
                tag_segment(tag)
            ),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

fn path_segment(raw: &str) -> String {
    sanitize_filename(raw)
}

/// A tag that had to be altered to become a segment gets a hash of its
/// original text appended, so distinct tags never share a file.
fn tag_segment(tag: &str) -> String {
    let segment = sanitize_filename(tag);
    if segment == tag {
        segment
    } else {
        format!("{}-{:08x}", segment, fnv1a(tag.as_bytes()))
    }
}

/// 32-bit FNV-1a. Stable across builds and platforms, unlike `DefaultHasher`.
fn fnv1a(bytes: &[u8]) -> u32 {
    bytes.iter().fold(0x811c_9dc5, |hash, &b| {
        (hash ^ u32::from(b)).wrapping_mul(0x0100_0193)
    })
}
