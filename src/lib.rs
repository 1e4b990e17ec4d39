//! # Hondana - Comick catalog client for manga readers
//!
//! Hondana turns a reader host's requests (list a page, search with filters, show a
//! title, list its chapters, list a chapter's pages) into Comick API calls and maps
//! the JSON answers into a normalized content model.
//!
//! ## Features
//!
//! - **One source per language**: `comick-all` plus a source for every language Comick serves
//! - **Filtered search**: genres, demographics, origin, sort, status, year range, tags
//! - **Direct lookup**: `id:{hid}` queries and web deep links resolve a single title
//! - **Chapter aggregation**: paginated chapter listings are walked sequentially until complete
//! - **Rate limiting**: three requests per second by default, shared per source
//! - **Typed identifiers**: stable keys and legacy slugs are distinct, slugs fail early
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use hondana::prelude::*;
//! use hondana::error::Result;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let source = ComickSource::new(Language::english());
//!
//!     let mut filters = source.filters();
//!     filters.tri_state_mut("genres").unwrap().set("action", TriState::Included);
//!
//!     match source.search("", 1, &filters).await {
//!         Ok(page) => println!("{} results, more: {}", page.len(), page.has_next_page),
//!         Err(e) => println!("search failed: {}", e),
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`source`]: the [`Source`] contract and the [`Sources`] collection
//! - [`sources`]: the Comick implementation
//! - [`query`]: request construction and search mode selection
//! - [`filters`]: the filter set and tag normalization
//! - [`chapters`]: sequential chapter list aggregation
//! - [`mapping`] and [`format`]: API records to the content model
//! - [`models`]: API response shapes
//! - [`net`]: the transport seam, HTTP client and rate limiting
//! - [`deeplink`]: web links to direct-lookup queries
//! - [`config`]: source configuration and language presets
//! - [`error`]: error handling

pub mod chapters;
pub mod config;
pub mod deeplink;
pub mod error;
pub mod filters;
pub mod format;
pub mod mapping;
pub mod models;
pub mod net;
pub mod query;
pub mod source;
pub mod sources;
pub mod types;

/// Prelude module for convenient imports.
///
/// ```rust
/// use hondana::prelude::*;
///
/// let sources = Sources::comick_all();
/// assert!(sources.get("comick-en").is_some());
/// ```
pub mod prelude {
    pub use crate::{
        config::{Language, SourceConfig, SourceConfigBuilder},
        filters::{Filter, FilterSet, TriState},
        source::{Source, Sources},
        sources::ComickSource,
        types::{Chapter, Manga, MangaDetails, MangaId, MangaPage, MangaStatus, Page},
    };
}

// Re-export main types at crate root for direct access
pub use error::{Error, Result};
pub use source::{Source, Sources};
pub use sources::ComickSource;
pub use types::{Chapter, Manga, MangaDetails, MangaId, MangaPage, MangaStatus, Page};
