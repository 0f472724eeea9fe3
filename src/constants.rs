// src/constants.rs
//! Domain constants that define the operational boundaries of the system.
//!
//! Each constant is named for the domain concept it constrains, not its
//! technical role.

// ---------------------------------------------------------------------------
// Notion API boundaries
// ---------------------------------------------------------------------------

/// How many objects the Notion API returns per page of results.
///
/// The Notion API maximum is 100.
pub const NOTION_API_PAGE_SIZE: usize = 100;

/// Maximum nesting depth when recursively fetching a block tree.
pub const NOTION_MAX_FETCH_DEPTH: usize = 50;

/// Maximum characters shown when previewing unparseable response bodies.
pub const ERROR_BODY_PREVIEW_LENGTH: usize = 500;

// ---------------------------------------------------------------------------
// Content database schema
// ---------------------------------------------------------------------------

/// Title property of a blog post row.
pub const TITLE_PROPERTY: &str = "Name";

/// URL (or files) property holding a post's cover image.
pub const COVER_IMAGE_PROPERTY: &str = "Image";

/// Multi-select property holding a post's tags.
pub const TAGS_PROPERTY: &str = "Tags";

// ---------------------------------------------------------------------------
// Site layout
// ---------------------------------------------------------------------------

/// URL prefix under which every generated route lives.
pub const BLOG_ROOT: &str = "/blog";

/// Name of the route-generation ledger inside the output directory.
pub const REVALIDATION_LEDGER_FILE: &str = ".revalidation.json";

/// Default seconds a generated route stays fresh before it is rebuilt.
pub const DEFAULT_REVALIDATE_SECS: u64 = 60;

/// Shortest pause between two watch-mode build cycles.
pub const MIN_WATCH_INTERVAL_SECS: u64 = 1;

/// Offset applied to timestamps before they are shown to readers (JST).
pub const DISPLAY_UTC_OFFSET_SECS: i32 = 9 * 3600;

/// Hosts whose embeds are rendered as tweet widgets.
pub const SOCIAL_EMBED_HOSTS: &[&str] = &[
    "twitter.com",
    "www.twitter.com",
    "mobile.twitter.com",
    "x.com",
    "www.x.com",
];

/// Path segment (after splitting on `/`) holding a status id in a tweet URL.
pub const TWEET_ID_SEGMENT: usize = 5;

/// Estimated characters per block, used to pre-allocate output strings.
pub const CHARS_PER_BLOCK_ESTIMATE: usize = 256;

/// Longest filesystem segment, in bytes, produced for a route parameter.
/// Leaves room under the usual 255-byte name limit for a disambiguating suffix.
pub const MAX_PATH_SEGMENT_BYTES: usize = 200;
