//! Core data types handed to the reader host.
//!
//! This module defines the normalized content model produced from Comick responses:
//!
//! - [`MangaId`] - Tagged identifier distinguishing stable keys from legacy slugs
//! - [`Manga`] - A list entry (search, popular, latest, browse results)
//! - [`MangaPage`] - One page of list entries plus the "maybe more" flag
//! - [`MangaDetails`] - Full metadata of a single title
//! - [`MangaStatus`] - Publication status
//! - [`Chapter`] - A single chapter entry
//! - [`Page`] - A single image of a chapter
//!
//! # Examples
//!
//! ```rust
//! use hondana::types::*;
//!
//! let manga = Manga {
//!     id: MangaId::StableKey("xK3b9".to_string()),
//!     title: "One Piece".to_string(),
//!     cover_url: Some("https://meo.comick.pictures/cover.jpg".to_string()),
//! };
//! assert!(manga.id.is_stable());
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Error, Result};

/// Identifier of a Comick title.
///
/// Search and listing responses carry the API's immutable `hid` ([`StableKey`](MangaId::StableKey)).
/// The hot browse listing still answers with human readable slugs
/// ([`LegacySlug`](MangaId::LegacySlug)), which the details and chapter endpoints reject.
///
/// ```rust
/// use hondana::types::MangaId;
///
/// let id = MangaId::StableKey("xK3b9".to_string());
/// assert_eq!(id.stable_key().unwrap(), "xK3b9");
///
/// let slug = MangaId::LegacySlug("one-piece".to_string());
/// assert!(slug.stable_key().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum MangaId {
    StableKey(String),
    LegacySlug(String),
}

impl MangaId {
    /// Raw identifier text, whatever its form.
    pub fn as_str(&self) -> &str {
        match self {
            MangaId::StableKey(id) | MangaId::LegacySlug(id) => id,
        }
    }

    pub fn is_stable(&self) -> bool {
        matches!(self, MangaId::StableKey(_))
    }

    /// Returns the stable key or fails with [`Error::MalformedIdentifier`].
    pub fn stable_key(&self) -> Result<&str> {
        match self {
            MangaId::StableKey(hid) => Ok(hid),
            MangaId::LegacySlug(slug) => Err(Error::malformed_id(slug.as_str())),
        }
    }

    /// Path of the title relative to the API or web host, e.g. `/comic/xK3b9`.
    pub fn path(&self) -> String {
        format!("/comic/{}", self.as_str())
    }
}

impl fmt::Display for MangaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A title as it appears in list results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manga {
    pub id: MangaId,
    pub title: String,
    pub cover_url: Option<String>,
}

/// One page of list results.
///
/// `has_next_page` is true whenever the page came back full: an exactly
/// page-sized response always signals that more results may follow.
///
/// ```rust
/// use hondana::types::MangaPage;
///
/// let page = MangaPage::new(Vec::new(), 20);
/// assert!(!page.has_next_page);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MangaPage {
    pub entries: Vec<Manga>,
    pub has_next_page: bool,
}

impl MangaPage {
    /// Wraps list entries, deriving `has_next_page` from the page size.
    pub fn new(entries: Vec<Manga>, page_size: usize) -> Self {
        let has_next_page = page_size > 0 && entries.len() >= page_size;
        Self {
            entries,
            has_next_page,
        }
    }

    /// A page holding exactly one entity, as returned by direct lookups.
    pub fn single(entry: Manga) -> Self {
        Self {
            entries: vec![entry],
            has_next_page: false,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Publication status of a title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MangaStatus {
    Ongoing,
    Completed,
    Hiatus,
    Cancelled,
    #[default]
    Unknown,
}

impl MangaStatus {
    /// Maps Comick's numeric status code.
    ///
    /// `translation_completed == Some(true)` turns an ongoing code into
    /// [`Completed`](MangaStatus::Completed).
    ///
    /// ```rust
    /// use hondana::types::MangaStatus;
    ///
    /// assert_eq!(MangaStatus::from_code(Some(1), None), MangaStatus::Ongoing);
    /// assert_eq!(MangaStatus::from_code(Some(1), Some(true)), MangaStatus::Completed);
    /// assert_eq!(MangaStatus::from_code(Some(9), None), MangaStatus::Unknown);
    /// ```
    pub fn from_code(code: Option<i64>, translation_completed: Option<bool>) -> Self {
        match code {
            Some(1) if translation_completed == Some(true) => MangaStatus::Completed,
            Some(1) => MangaStatus::Ongoing,
            Some(2) => MangaStatus::Completed,
            Some(3) => MangaStatus::Cancelled,
            Some(4) => MangaStatus::Hiatus,
            _ => MangaStatus::Unknown,
        }
    }
}

/// Full metadata for a single title.
///
/// `artists` and `authors` keep their first-seen order with duplicates removed.
/// `description` is assembled by [`format::description`](crate::format::description).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MangaDetails {
    pub id: MangaId,
    pub title: String,
    pub description: String,
    pub status: MangaStatus,
    pub cover_url: Option<String>,
    pub artists: Vec<String>,
    pub authors: Vec<String>,
    pub tags: Vec<String>,
}

/// A chapter of a title.
///
/// `id` is the chapter key `/comic/{manga hid}/{chapter hid}-chapter-{number}-{lang}`,
/// usable both as a web path and as input for page-list requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chapter {
    pub id: String,
    pub lang: String,
    pub volume: String,
    pub chapter: String,
    pub title: String,

    /// Display name such as `Vol. 2, Ch. 10: Title`
    pub name: String,

    pub uploaded_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub scanlators: Vec<String>,
}

impl Chapter {
    /// Scanlation groups joined for display, or `"Unknown"` when there are none.
    ///
    /// ```rust
    /// # use hondana::types::Chapter;
    /// # let mut chapter = Chapter {
    /// #     id: String::new(), lang: "en".into(), volume: String::new(), chapter: "1".into(),
    /// #     title: String::new(), name: "Chapter 1".into(), uploaded_at: None, scanlators: vec![],
    /// # };
    /// assert_eq!(chapter.scanlator(), "Unknown");
    /// chapter.scanlators = vec!["Group A".into(), "Group B".into()];
    /// assert_eq!(chapter.scanlator(), "Group A, Group B");
    /// ```
    pub fn scanlator(&self) -> String {
        let joined = self
            .scanlators
            .iter()
            .map(|g| g.trim())
            .filter(|g| !g.is_empty())
            .collect::<Vec<_>>()
            .join(", ");
        if joined.is_empty() {
            "Unknown".to_string()
        } else {
            joined
        }
    }
}

/// A single chapter image. Indices are contiguous from zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub index: usize,
    pub image_url: String,
}
