// src/formatting/embed.rs
//! Recognizing social-media embeds.

use crate::constants::{SOCIAL_EMBED_HOSTS, TWEET_ID_SEGMENT};
use url::Url;

/// Whether `url` points at a host whose embeds render as tweet widgets.
pub fn is_social_embed(url: &str) -> bool {
    Url::parse(url)
        .ok()
        .and_then(|parsed| {
            parsed
                .host_str()
                .map(|host| SOCIAL_EMBED_HOSTS.contains(&host))
        })
        .unwrap_or(false)
}

/// The status id of a tweet URL.
///
/// The id is the path segment at `TWEET_ID_SEGMENT` of the URL with its
/// query string removed; when that segment is missing, the same segment of
/// the full URL is tried.
pub fn tweet_id(url: &str) -> Option<String> {
    let segment = |s: &str| {
        s.split('/')
            .nth(TWEET_ID_SEGMENT)
            .filter(|id| !id.is_empty())
            .map(str::to_string)
    };

    url.find('?')
        .and_then(|pos| segment(&url[..pos]))
        .or_else(|| segment(url))
}
