//! Chapter list aggregation.
//!
//! Comick returns chapter listings in fixed-size pages together with the declared
//! `total`. [`ChapterAggregator`] fetches page 1, then pages 2, 3, … strictly one
//! after another, appending each batch in arrival order until the collected count
//! reaches the total. A page that adds nothing also ends the walk, so a total the
//! server can never satisfy does not loop forever. Any failed page fails the whole
//! listing; partial results are never returned.
//!
//! ```rust,no_run
//! use hondana::chapters::ChapterAggregator;
//! use hondana::config::SourceConfig;
//! use hondana::net::HttpClient;
//! use hondana::query::QueryBuilder;
//! use hondana::types::MangaId;
//!
//! # async fn example() -> hondana::Result<()> {
//! let config = SourceConfig::default();
//! let client = HttpClient::from_config("comick-all", &config);
//! let first = QueryBuilder::new(&config).chapter_list(&MangaId::StableKey("xK3b9".into()))?;
//!
//! let chapters = ChapterAggregator::new(&client).collect(&first).await?;
//! println!("{} chapters", chapters.len());
//! # Ok(())
//! # }
//! ```

use tracing::debug;
use url::Url;

use crate::error::Result;
use crate::mapping;
use crate::models::{ChapterList, ComicChapter};
use crate::net::{self, Transport};
use crate::query::with_page;
use crate::types::Chapter;

/// Chapters gathered so far and where to continue.
#[derive(Debug)]
struct Accumulator {
    chapters: Vec<ComicChapter>,
    total: usize,
    next_page: u32,
}

/// Outcome of absorbing one page.
#[derive(Debug)]
enum Step {
    Continue(Accumulator),
    Done(Accumulator),
}

impl Accumulator {
    /// Starts from the first page; its `total` is the target for the whole walk.
    fn first(page: ChapterList) -> Step {
        let start = Accumulator {
            chapters: Vec::new(),
            total: page.total as usize,
            next_page: 1,
        };
        start.absorb(page.chapters)
    }

    fn absorb(mut self, batch: Vec<ComicChapter>) -> Step {
        let grew = !batch.is_empty();
        self.chapters.extend(batch);
        self.next_page += 1;

        if self.chapters.len() >= self.total || !grew {
            Step::Done(self)
        } else {
            Step::Continue(self)
        }
    }
}

/// Sequentially walks a paginated chapter listing.
pub struct ChapterAggregator<'a> {
    transport: &'a dyn Transport,
}

impl<'a> ChapterAggregator<'a> {
    pub fn new(transport: &'a dyn Transport) -> Self {
        Self { transport }
    }

    /// Fetches every page of the listing starting at `first_page` and maps the
    /// chapters, in first-seen order.
    pub async fn collect(&self, first_page: &Url) -> Result<Vec<Chapter>> {
        let prefix = manga_prefix(first_page);
        let raw = self.collect_raw(first_page).await?;
        Ok(raw
            .iter()
            .map(|chapter| mapping::chapter(chapter, &prefix))
            .collect())
    }

    async fn collect_raw(&self, first_page: &Url) -> Result<Vec<ComicChapter>> {
        let first: ChapterList = net::fetch_json(self.transport, first_page).await?;
        debug!(total = first.total, received = first.chapters.len(), "chapter page 1");

        let mut step = Accumulator::first(first);
        loop {
            match step {
                Step::Done(acc) => return Ok(acc.chapters),
                Step::Continue(acc) => {
                    let url = with_page(first_page, acc.next_page);
                    let page: ChapterList = net::fetch_json(self.transport, &url).await?;
                    debug!(
                        page = acc.next_page,
                        received = page.chapters.len(),
                        collected = acc.chapters.len(),
                        total = acc.total,
                        "chapter page"
                    );
                    step = acc.absorb(page.chapters);
                }
            }
        }
    }
}

/// Title path shared by every chapter key of a listing: the listing path from its
/// `/comic/` segment on, without the trailing `/chapters` segment. A path carried by
/// the API root is not part of the prefix.
///
/// ```rust
/// use hondana::chapters::manga_prefix;
/// use url::Url;
///
/// let url = Url::parse("https://api.comick.fun/comic/xK3b9/chapters?lang=en&page=1").unwrap();
/// assert_eq!(manga_prefix(&url), "/comic/xK3b9");
/// ```
pub fn manga_prefix(listing: &Url) -> String {
    let path = listing.path().trim_end_matches('/');
    let path = path.strip_suffix("/chapters").unwrap_or(path);
    match path.rfind("/comic/") {
        Some(start) => path[start..].to_string(),
        None => path.to_string(),
    }
}
