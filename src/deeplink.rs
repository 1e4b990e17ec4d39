//! Deep-link adapter.
//!
//! Turns a Comick web link into the direct-lookup search query understood by
//! [`QueryBuilder::search`](crate::query::QueryBuilder::search). Links to a title's
//! follower or cover pages are not title links and yield nothing.
//!
//! ```rust
//! use hondana::deeplink;
//!
//! assert_eq!(
//!     deeplink::search_query("https://comick.app/comic/xK3b9").as_deref(),
//!     Some("id:xK3b9")
//! );
//! assert_eq!(deeplink::search_query("https://comick.app/comic/xK3b9/covers"), None);
//! ```

use url::Url;

use crate::query::ID_SEARCH_PREFIX;

/// Title sub-pages that are not handled as title links.
pub const EXCLUDED_SECTIONS: [&str; 2] = ["follows", "covers"];

/// Search query for a link given as path segments, e.g. `["comic", "xK3b9"]`.
///
/// The second segment is the title identifier; when a third segment names an
/// excluded section, `None` is returned.
pub fn search_query_for_segments<S: AsRef<str>>(segments: &[S]) -> Option<String> {
    if segments.len() < 2 {
        return None;
    }
    if let Some(section) = segments.get(2) {
        if EXCLUDED_SECTIONS.contains(&section.as_ref()) {
            return None;
        }
    }

    let raw = segments[1].as_ref();
    let id = urlencoding::decode(raw)
        .map(|decoded| decoded.into_owned())
        .unwrap_or_else(|_| raw.to_string());
    let id = id.trim();
    if id.is_empty() {
        return None;
    }
    Some(format!("{}{}", ID_SEARCH_PREFIX, id))
}

/// Search query for a full link such as `https://comick.app/comic/xK3b9`.
pub fn search_query(link: &str) -> Option<String> {
    let url = Url::parse(link.trim()).ok()?;
    let segments: Vec<&str> = url.path_segments()?.filter(|s| !s.is_empty()).collect();
    search_query_for_segments(&segments)
}
