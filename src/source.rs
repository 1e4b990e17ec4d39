//! Source trait and collection.
//!
//! [`Source`] is the contract a reader host consumes: list pages, search, title
//! details, chapter lists and page lists. [`Sources`] keeps several sources by ID,
//! typically one Comick source per content language.
//!
//! # Examples
//!
//! ```rust
//! use hondana::prelude::*;
//! use hondana::error::Result;
//!
//! # async fn example() -> Result<()> {
//! let sources = Sources::comick_all();
//!
//! if let Some(source) = sources.get("comick-en") {
//!     let popular = source.popular(1).await?;
//!     if let Some(manga) = popular.entries.first() {
//!         let chapters = source.chapters(&manga.id).await?;
//!         println!("{}: {} chapters", manga.title, chapters.len());
//!     }
//! }
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use std::collections::HashMap;

use crate::{
    config::Language,
    error::{Error, Result},
    filters::FilterSet,
    sources::ComickSource,
    types::{Chapter, MangaDetails, MangaId, MangaPage, Page},
};

/// Operations a reader host performs against a catalog.
///
/// # Errors
///
/// * [`Error::MalformedIdentifier`] - details or chapters requested for a legacy slug
/// * [`Error::Unimplemented`] - a browse mode without a defined endpoint was selected
/// * transport errors ([`Error::is_transport`]) - the request or any follow-up failed
#[async_trait]
pub trait Source: Send + Sync {
    /// Unique identifier, e.g. `comick-en`.
    fn id(&self) -> &str;

    /// Human-readable name.
    fn name(&self) -> &'static str;

    /// Host language tag of the content served.
    fn lang(&self) -> &str;

    /// Public web URL without trailing slash.
    fn base_url(&self) -> &str;

    fn supports_latest(&self) -> bool {
        true
    }

    /// Filters the host should present for [`search`](Source::search).
    fn filters(&self) -> FilterSet;

    async fn popular(&self, page: u32) -> Result<MangaPage>;

    async fn latest(&self, page: u32) -> Result<MangaPage>;

    /// Search with a text query and filters. Pages are 1-based.
    async fn search(&self, query: &str, page: u32, filters: &FilterSet) -> Result<MangaPage>;

    async fn details(&self, id: &MangaId) -> Result<MangaDetails>;

    /// Every chapter of a title, in the order the API lists them.
    async fn chapters(&self, id: &MangaId) -> Result<Vec<Chapter>>;

    /// Images of a chapter, with resolved URLs.
    async fn pages(&self, chapter: &Chapter) -> Result<Vec<Page>>;

    /// Resolves the image URL of a page whose URL was not known up front.
    ///
    /// Sources that always return resolved URLs from [`pages`](Source::pages) keep
    /// this default, which reports [`Error::Unsupported`].
    async fn image_url(&self, _page: &Page) -> Result<String> {
        Err(Error::Unsupported("image URLs are resolved in the page list"))
    }
}

/// A collection of sources indexed by ID.
///
/// ```rust
/// use hondana::prelude::*;
///
/// let mut sources = Sources::new();
/// assert!(sources.is_empty());
///
/// sources.add(ComickSource::new(Language::english()));
/// assert_eq!(sources.list_ids(), vec!["comick-en"]);
/// ```
pub struct Sources {
    sources: Vec<Box<dyn Source>>,
    by_id: HashMap<String, usize>,
}

impl Sources {
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
            by_id: HashMap::new(),
        }
    }

    /// One Comick source per supported language, `comick-all` first.
    pub fn comick_all() -> Self {
        let mut sources = Self::new();
        for language in Language::supported() {
            sources.add(ComickSource::new(language));
        }
        sources
    }

    /// Adds a source. A source with the same ID replaces the earlier one in lookups.
    pub fn add(&mut self, source: impl Source + 'static) -> &mut Self {
        let id = source.id().to_string();
        let index = self.sources.len();
        self.sources.push(Box::new(source));
        self.by_id.insert(id, index);
        self
    }

    pub fn get(&self, id: &str) -> Option<&dyn Source> {
        self.by_id
            .get(id)
            .and_then(|&index| self.sources.get(index))
            .map(|s| s.as_ref())
    }

    /// Source serving the given host language tag.
    pub fn for_lang(&self, lang: &str) -> Option<&dyn Source> {
        self.sources
            .iter()
            .find(|s| s.lang().eq_ignore_ascii_case(lang))
            .map(|s| s.as_ref())
    }

    /// IDs in insertion order.
    pub fn list_ids(&self) -> Vec<&str> {
        self.sources.iter().map(|s| s.id()).collect()
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

impl Default for Sources {
    fn default() -> Self {
        Self::new()
    }
}
