use crate::{
    chapters::ChapterAggregator,
    config::{Language, SourceConfig},
    error::Result,
    filters::FilterSet,
    mapping,
    models::{ComicDetail, HotEntry, PageList, SearchComic},
    net::{self, HttpClient, Transport},
    query::{ApiRequest, QueryBuilder},
    source::Source,
    types::{Chapter, MangaDetails, MangaId, MangaPage, Page},
};
use async_trait::async_trait;
use std::sync::Arc;
use url::Url;

/// Comick source for one content language.
///
/// Talks to the public Comick JSON API through a [`Transport`] (an [`HttpClient`]
/// rate limited to three requests per second unless configured otherwise).
///
/// # Examples
///
/// ```rust
/// use hondana::sources::ComickSource;
/// use hondana::prelude::*;
///
/// # async fn example() -> hondana::Result<()> {
/// let source = ComickSource::new(Language::english());
///
/// let results = source.search("one piece", 1, &source.filters()).await?;
/// if let Some(manga) = results.entries.first() {
///     let details = source.details(&manga.id).await?;
///     let chapters = source.chapters(&manga.id).await?;
///     println!("{} ({} chapters)", details.title, chapters.len());
/// }
/// # Ok(())
/// # }
/// ```
pub struct ComickSource {
    id: String,
    config: SourceConfig,
    transport: Arc<dyn Transport>,
}

impl ComickSource {
    /// Create a source for `language` with default settings
    pub fn new(language: Language) -> Self {
        Self::with_config(SourceConfig::for_language(language))
    }

    /// Create a source backed by an [`HttpClient`] built from `config`
    pub fn with_config(config: SourceConfig) -> Self {
        let id = source_id(&config.language);
        let client = HttpClient::from_config(id.clone(), &config);
        Self {
            id,
            config,
            transport: Arc::new(client),
        }
    }

    /// Create a source issuing its requests through `transport`
    pub fn with_transport(config: SourceConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            id: source_id(&config.language),
            config,
            transport,
        }
    }

    pub fn config(&self) -> &SourceConfig {
        &self.config
    }

    fn queries(&self) -> QueryBuilder<'_> {
        QueryBuilder::new(&self.config)
    }

    /// Public web page of a title.
    pub fn manga_url(&self, id: &MangaId) -> String {
        format!("{}{}", self.config.web_root(), id.path())
    }

    /// Public web page of a chapter.
    pub fn chapter_url(&self, chapter: &Chapter) -> String {
        format!("{}{}", self.config.web_root(), chapter.id)
    }

    async fn search_page(&self, url: &Url) -> Result<MangaPage> {
        let results: Vec<SearchComic> = net::fetch_json(self.transport.as_ref(), url).await?;
        let entries = results
            .iter()
            .map(|comic| mapping::search_entry(comic, &self.config.image_cdn))
            .collect();
        Ok(MangaPage::new(entries, self.config.page_size))
    }

    async fn hot_page(&self, url: &Url) -> Result<MangaPage> {
        let results: Vec<HotEntry> = net::fetch_json(self.transport.as_ref(), url).await?;
        let entries = results
            .iter()
            .map(|entry| mapping::browse_entry(entry.comic(), &self.config.image_cdn))
            .collect();
        Ok(MangaPage::new(entries, self.config.page_size))
    }

    async fn detail_record(&self, url: &Url) -> Result<ComicDetail> {
        net::fetch_json(self.transport.as_ref(), url).await
    }
}

fn source_id(language: &Language) -> String {
    format!("comick-{}", language.tag.to_ascii_lowercase())
}

#[async_trait]
impl Source for ComickSource {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &'static str {
        "Comick"
    }

    fn lang(&self) -> &str {
        self.config.language.tag
    }

    fn base_url(&self) -> &str {
        self.config.web_root()
    }

    fn filters(&self) -> FilterSet {
        FilterSet::default()
    }

    async fn popular(&self, page: u32) -> Result<MangaPage> {
        let url = self.queries().popular(page)?;
        self.search_page(&url).await
    }

    async fn latest(&self, page: u32) -> Result<MangaPage> {
        let url = self.queries().latest(page)?;
        self.search_page(&url).await
    }

    async fn search(&self, query: &str, page: u32, filters: &FilterSet) -> Result<MangaPage> {
        match self.queries().search(query, page, filters)? {
            ApiRequest::Direct(url) => {
                let detail = self.detail_record(&url).await?;
                Ok(MangaPage::single(mapping::detail_entry(
                    &detail,
                    &self.config.image_cdn,
                )))
            }
            ApiRequest::HotBrowse(url) => self.hot_page(&url).await,
            ApiRequest::Search(url) => self.search_page(&url).await,
        }
    }

    async fn details(&self, id: &MangaId) -> Result<MangaDetails> {
        let url = self.queries().details(id)?;
        let detail = self.detail_record(&url).await?;
        Ok(mapping::details(&detail, &self.config.image_cdn))
    }

    async fn chapters(&self, id: &MangaId) -> Result<Vec<Chapter>> {
        let url = self.queries().chapter_list(id)?;
        ChapterAggregator::new(self.transport.as_ref())
            .collect(&url)
            .await
    }

    async fn pages(&self, chapter: &Chapter) -> Result<Vec<Page>> {
        let url = self.queries().page_list(&chapter.id)?;
        let list: PageList = net::fetch_json(self.transport.as_ref(), &url).await?;
        Ok(mapping::pages(&list.chapter.images))
    }
}
