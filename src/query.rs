//! Request construction.
//!
//! [`QueryBuilder`] turns a page number, a text query and a [`FilterSet`] into exactly
//! one [`ApiRequest`]. Search requests are resolved by priority:
//!
//! 1. a query starting with [`ID_SEARCH_PREFIX`] becomes a direct lookup,
//! 2. the `hot` sort switches to the hot chapter listing,
//! 3. browse modes without a defined endpoint fail with [`Error::Unimplemented`],
//! 4. anything else is a `/v1.0/search` request.
//!
//! ```rust
//! use hondana::config::SourceConfig;
//! use hondana::filters::FilterSet;
//! use hondana::query::{ApiRequest, QueryBuilder};
//!
//! let config = SourceConfig::default();
//! let queries = QueryBuilder::new(&config);
//!
//! let request = queries.search("id:xK3b9", 1, &FilterSet::default()).unwrap();
//! assert!(matches!(request, ApiRequest::Direct(_)));
//! assert_eq!(request.url().path(), "/comic/xK3b9");
//! ```

use url::Url;

use crate::config::SourceConfig;
use crate::error::{Error, Result};
use crate::filters::{BrowseMode, FilterSet, HOT_SORT};
use crate::types::MangaId;

/// Prefix marking a search query as a direct lookup by identifier.
pub const ID_SEARCH_PREFIX: &str = "id:";

/// One outbound request, tagged with the response shape it yields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiRequest {
    /// Single title by stable key; the response is a detail record
    Direct(Url),
    /// Hot chapter listing; entries carry legacy slugs
    HotBrowse(Url),
    /// `/v1.0/search` listing
    Search(Url),
}

impl ApiRequest {
    pub fn url(&self) -> &Url {
        match self {
            ApiRequest::Direct(url) | ApiRequest::HotBrowse(url) | ApiRequest::Search(url) => url,
        }
    }
}

/// Builds request URLs for one source configuration.
#[derive(Debug, Clone, Copy)]
pub struct QueryBuilder<'a> {
    config: &'a SourceConfig,
}

impl<'a> QueryBuilder<'a> {
    pub fn new(config: &'a SourceConfig) -> Self {
        Self { config }
    }

    fn api(&self, path: &str) -> Result<Url> {
        Ok(Url::parse(&format!("{}{}", self.config.api_root(), path))?)
    }

    /// Most followed titles.
    pub fn popular(&self, page: u32) -> Result<Url> {
        self.sorted_listing("user_follow_count", page)
    }

    /// Most recently updated titles.
    pub fn latest(&self, page: u32) -> Result<Url> {
        self.sorted_listing("uploaded", page)
    }

    fn sorted_listing(&self, sort: &str, page: u32) -> Result<Url> {
        let mut url = self.api("/v1.0/search")?;
        url.query_pairs_mut()
            .append_pair("sort", sort)
            .append_pair("limit", &self.config.page_size.to_string())
            .append_pair("page", &page.to_string())
            .append_pair("tachiyomi", "true");
        Ok(url)
    }

    /// Resolves a search into one request; see the module docs for the priority order.
    pub fn search(&self, query: &str, page: u32, filters: &FilterSet) -> Result<ApiRequest> {
        if let Some(id) = query.trim().strip_prefix(ID_SEARCH_PREFIX) {
            let id = id.trim();
            if id.is_empty() {
                return Err(Error::parse("`id:` search needs an identifier"));
            }
            let id = MangaId::StableKey(id.to_string());
            return Ok(ApiRequest::Direct(self.details(&id)?));
        }

        if filters.sort_value() == Some(HOT_SORT) {
            return self.hot_browse(page, filters).map(ApiRequest::HotBrowse);
        }

        if let Some(mode) = filters.active_browse_mode() {
            let name = match mode {
                BrowseMode::PopularNewComics => "popular new comics",
                BrowseMode::MostViewed => "most viewed",
            };
            return Err(Error::Unimplemented(format!(
                "the {} listing has no defined endpoint",
                name
            )));
        }

        let query = query.trim();
        if filters.text_search_mode() {
            return self.text_search(query, page).map(ApiRequest::Search);
        }
        self.filtered_search(query, page, filters)
            .map(ApiRequest::Search)
    }

    /// Plain text search: only the query and pagination.
    pub fn text_search(&self, query: &str, page: u32) -> Result<Url> {
        let mut url = self.api("/v1.0/search")?;
        url.query_pairs_mut()
            .append_pair("q", query)
            .append_pair("limit", &self.config.page_size.to_string())
            .append_pair("page", &page.to_string())
            .append_pair("tachiyomi", "true");
        Ok(url)
    }

    /// Search carrying every filter contribution, then query and pagination.
    pub fn filtered_search(&self, query: &str, page: u32, filters: &FilterSet) -> Result<Url> {
        let mut url = self.api("/v1.0/search")?;
        {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in filters.contributions() {
                pairs.append_pair(key, &value);
            }
            pairs
                .append_pair("q", query)
                .append_pair("tachiyomi", "true")
                .append_pair("limit", &self.config.page_size.to_string())
                .append_pair("page", &page.to_string());
        }
        Ok(url)
    }

    /// Hot chapter listing filtered by origin type and configured language.
    pub fn hot_browse(&self, page: u32, filters: &FilterSet) -> Result<Url> {
        let mut url = self.api("/chapter")?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs
                .append_pair("order", "hot")
                .append_pair("accept_erotic_content", "true")
                .append_pair("page", &page.to_string())
                .append_pair("tachiyomi", "true");
            for comic_type in filters.origin_countries().into_iter().filter_map(comic_type) {
                pairs.append_pair("comic_types", comic_type);
            }
            if !self.config.language.is_all() {
                pairs.append_pair("lang", self.config.language.api_code);
            }
        }
        Ok(url)
    }

    /// Detail record of a title. Legacy slugs fail before a URL is built.
    pub fn details(&self, id: &MangaId) -> Result<Url> {
        let hid = id.stable_key()?;
        let mut url = self.api(&format!("/comic/{}", hid))?;
        url.query_pairs_mut().append_pair("tachiyomi", "true");
        Ok(url)
    }

    /// First page of a title's chapter listing.
    pub fn chapter_list(&self, id: &MangaId) -> Result<Url> {
        let hid = id.stable_key()?;
        let mut url = self.api(&format!("/comic/{}/chapters", hid))?;
        {
            let mut pairs = url.query_pairs_mut();
            if !self.config.language.is_all() {
                pairs.append_pair("lang", self.config.language.api_code);
            }
            pairs
                .append_pair("tachiyomi", "true")
                .append_pair("page", "1");
        }
        Ok(url)
    }

    /// Page list of a chapter, addressed by the hid embedded in its key.
    pub fn page_list(&self, chapter_key: &str) -> Result<Url> {
        let hid = chapter_hid(chapter_key)?;
        let mut url = self.api(&format!("/chapter/{}", hid))?;
        url.query_pairs_mut().append_pair("tachiyomi", "true");
        Ok(url)
    }
}

/// Maps an origin country to the hot listing's `comic_types` value.
///
/// ```rust
/// use hondana::query::comic_type;
///
/// assert_eq!(comic_type("jp"), Some("manga"));
/// assert_eq!(comic_type("gb"), None);
/// ```
pub fn comic_type(country: &str) -> Option<&'static str> {
    match country {
        "jp" => Some("manga"),
        "cn" => Some("manhua"),
        "kr" => Some("manhwa"),
        _ => None,
    }
}

/// Extracts the chapter hid from a chapter key such as
/// `/comic/xK3b9/aB12c-chapter-10-en`.
pub fn chapter_hid(chapter_key: &str) -> Result<&str> {
    let last = chapter_key.trim_end_matches('/').rsplit('/').next().unwrap_or_default();
    let hid = last.split('-').next().unwrap_or_default();
    if hid.is_empty() {
        return Err(Error::parse(format!(
            "Chapter key '{}' has no chapter id",
            chapter_key
        )));
    }
    Ok(hid)
}

/// Returns `url` with its `page` parameter set to `page`, other parameters kept in order.
pub fn with_page(url: &Url, page: u32) -> Url {
    let retained: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| key != "page")
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    let mut next = url.clone();
    next.query_pairs_mut()
        .clear()
        .extend_pairs(retained)
        .append_pair("page", &page.to_string());
    next
}
