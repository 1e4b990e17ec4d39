//! Comick API response shapes.
//!
//! These mirror the JSON the API returns and are only ever read by [`mapping`](crate::mapping).
//! Unknown fields are ignored, `null` falls back to defaults and loosely typed scalars
//! are coerced through [`net::json`](crate::net::json).

use serde::Deserialize;

use crate::net::json::{loose_bool, loose_i64, loose_string, loose_u64, null_default};

/// Entry of `/v1.0/search` results.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchComic {
    pub hid: String,
    #[serde(default, deserialize_with = "loose_string")]
    pub title: String,
    #[serde(default, deserialize_with = "null_default")]
    pub md_covers: Vec<Cover>,
    #[serde(default)]
    pub cover_url: Option<String>,
}

/// Comic as embedded in the hot chapter listing; identified by slug.
#[derive(Debug, Clone, Deserialize)]
pub struct BrowseComic {
    pub slug: String,
    #[serde(default, deserialize_with = "loose_string")]
    pub title: String,
    #[serde(default, deserialize_with = "null_default")]
    pub md_covers: Vec<Cover>,
    #[serde(default)]
    pub cover_url: Option<String>,
}

/// Entry of `/chapter?order=hot`.
///
/// Older deployments answer with flat comic records, newer ones nest the comic
/// under `md_comics`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum HotEntry {
    Nested { md_comics: BrowseComic },
    Flat(BrowseComic),
}

impl HotEntry {
    pub fn comic(&self) -> &BrowseComic {
        match self {
            HotEntry::Nested { md_comics } => md_comics,
            HotEntry::Flat(comic) => comic,
        }
    }
}

/// Response of `/comic/{hid}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ComicDetail {
    pub comic: Comic,
    #[serde(default, deserialize_with = "null_default")]
    pub artists: Vec<Name>,
    #[serde(default, deserialize_with = "null_default")]
    pub authors: Vec<Name>,
    #[serde(default, deserialize_with = "null_default")]
    pub genres: Vec<Name>,
    #[serde(default)]
    pub demographic: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Comic {
    pub hid: String,
    #[serde(default, deserialize_with = "loose_string")]
    pub title: String,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default, deserialize_with = "loose_i64")]
    pub year: Option<i64>,
    #[serde(default, deserialize_with = "loose_u64")]
    pub user_follow_count: u64,
    #[serde(default, deserialize_with = "loose_string")]
    pub content_rating: String,
    #[serde(
        rename = "mu_comic_categories",
        default,
        deserialize_with = "null_default"
    )]
    pub categories: Vec<Category>,
    #[serde(rename = "md_titles", default, deserialize_with = "null_default")]
    pub alt_titles: Vec<Title>,
    #[serde(default)]
    pub desc: Option<String>,
    #[serde(default, deserialize_with = "null_default")]
    pub relate_from: Vec<RelateFrom>,
    #[serde(default, deserialize_with = "loose_i64")]
    pub status: Option<i64>,
    /// Absent means complete; only an explicit `false` (or null) keeps status 1 ongoing.
    #[serde(default = "absent_means_completed", deserialize_with = "loose_bool")]
    pub translation_completed: Option<bool>,
    #[serde(default, deserialize_with = "null_default")]
    pub md_covers: Vec<Cover>,
    #[serde(default)]
    pub cover_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Cover {
    #[serde(default)]
    pub b2key: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Title {
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Name {
    #[serde(default, deserialize_with = "loose_string")]
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RelateFrom {
    pub relate_to: Title,
    pub md_relates: Name,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Category {
    #[serde(rename = "mu_categories")]
    pub category: Title,
}

/// Response of `/comic/{hid}/chapters`.
#[derive(Debug, Clone, Deserialize)]
pub struct ChapterList {
    #[serde(default, deserialize_with = "null_default")]
    pub chapters: Vec<ComicChapter>,
    #[serde(default, deserialize_with = "loose_u64")]
    pub total: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ComicChapter {
    pub hid: String,
    #[serde(default, deserialize_with = "loose_string")]
    pub lang: String,
    #[serde(default, deserialize_with = "loose_string")]
    pub title: String,
    #[serde(default, deserialize_with = "loose_string")]
    pub created_at: String,
    #[serde(default, deserialize_with = "loose_string")]
    pub chap: String,
    #[serde(default, deserialize_with = "loose_string")]
    pub vol: String,
    #[serde(rename = "group_name", default, deserialize_with = "null_default")]
    pub groups: Vec<String>,
}

/// Response of `/chapter/{hid}`.
#[derive(Debug, Clone, Deserialize)]
pub struct PageList {
    pub chapter: ChapterImages,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChapterImages {
    #[serde(default, deserialize_with = "null_default")]
    pub images: Vec<Image>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Image {
    #[serde(default)]
    pub url: Option<String>,
}

fn absent_means_completed() -> Option<bool> {
    Some(true)
}
