//! Error types and result handling for Hondana operations.
//!
//! All operations return a [`Result<T>`] which is a type alias for
//! `std::result::Result<T, Error>`.
//!
//! # Error Categories
//!
//! - **Input shape errors**: [`Error::MalformedIdentifier`], raised before any request is made
//! - **Transport errors**: connection issues, HTTP status errors, rate limiting, JSON decoding.
//!   [`Error::is_transport`] groups them.
//! - **Contract violations**: [`Error::Unsupported`], for entry points the Comick source never
//!   needs the host to call
//! - **Unimplemented browse modes**: [`Error::Unimplemented`]
//!
//! # Examples
//!
//! ```rust
//! use hondana::prelude::*;
//! use hondana::error::{Error, Result};
//!
//! # async fn example() -> Result<()> {
//! let source = ComickSource::new(Language::english());
//! let legacy = MangaId::LegacySlug("one-piece".to_string());
//!
//! match source.details(&legacy).await {
//!     Ok(details) => println!("{}", details.title),
//!     Err(Error::MalformedIdentifier { id }) => println!("migrate entry {}", id),
//!     Err(e) if e.is_transport() => println!("server problem: {}", e),
//!     Err(e) => println!("other error: {}", e),
//! }
//! # Ok(())
//! # }
//! ```

use thiserror::Error;

/// Type alias for Results with Hondana errors.
///
/// ```rust
/// use hondana::{Result, Error};
///
/// fn example_with_error() -> Result<()> {
///     Err(Error::parse("Something went wrong"))
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for all Hondana operations.
///
/// The variants distinguish "bad input shape" ([`MalformedIdentifier`](Error::MalformedIdentifier))
/// from "transport or server problem" ([`Network`](Error::Network), [`Source`](Error::Source),
/// [`RateLimit`](Error::RateLimit), [`Json`](Error::Json)) and from contract violations
/// ([`Unsupported`](Error::Unsupported)).
#[derive(Error, Debug)]
pub enum Error {
    /// Network-related errors from the underlying HTTP client (reqwest):
    /// connection timeouts, DNS resolution failures, TLS errors.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A details or chapter-list request was made with a legacy slug identifier.
    ///
    /// Only stable keys can be looked up. Entries saved from the old browse listing
    /// carry slugs and have to be migrated by searching for the title again.
    #[error(
        "Identifier '{id}' is a legacy slug; migrate this entry from Comick to Comick to refresh it"
    )]
    MalformedIdentifier { id: String },

    /// Data parsing and format errors.
    ///
    /// ```rust
    /// use hondana::Error;
    ///
    /// let error = Error::parse("Chapter key has no hid segment");
    /// ```
    #[error("Parse error: {0}")]
    Parse(String),

    /// Source-specific errors, such as non-success HTTP statuses.
    ///
    /// * `src` - The identifier of the source that encountered the error
    /// * `message` - Descriptive error message explaining what went wrong
    #[error("Source error [{src}]: {message}")]
    Source { src: String, message: String },

    /// Resource not found errors.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The API answered 429 and retries were exhausted.
    ///
    /// `retry_after` comes from the `Retry-After` header when present.
    #[error("Rate limited, retry after {retry_after:?} seconds")]
    RateLimit { retry_after: Option<u64> },

    /// JSON deserialization errors for API responses.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A request URL could not be assembled.
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// An entry point the host should never call for this source.
    ///
    /// Comick page lists always carry fully resolved image URLs, so resolving an
    /// image URL from a page is a contract violation rather than a runtime condition.
    #[error("Unsupported operation: {0}")]
    Unsupported(&'static str),

    /// A browse mode whose endpoint is not defined.
    #[error("Unimplemented: {0}")]
    Unimplemented(String),

    /// Generic error messages.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Creates a parse error with the given message.
    ///
    /// ```rust
    /// use hondana::Error;
    ///
    /// let error = Error::parse(format!("Expected {} chapters, found {}", 10, 5));
    /// ```
    pub fn parse(msg: impl Into<String>) -> Self {
        Error::Parse(msg.into())
    }

    /// Creates a source-specific error with source ID and message.
    ///
    /// ```rust
    /// use hondana::Error;
    ///
    /// let error = Error::source("comick-en", "HTTP 503 Service Unavailable");
    /// ```
    pub fn source(src: impl Into<String>, msg: impl Into<String>) -> Self {
        Error::Source {
            src: src.into(),
            message: msg.into(),
        }
    }

    /// Creates a not found error with the given message.
    pub fn not_found(msg: impl Into<String>) -> Self {
        Error::NotFound(msg.into())
    }

    /// Creates a rate limit error with optional retry-after time.
    pub fn rate_limit(retry_after: Option<u64>) -> Self {
        Error::RateLimit { retry_after }
    }

    /// Creates a malformed identifier error for a legacy slug.
    ///
    /// ```rust
    /// use hondana::Error;
    ///
    /// let error = Error::malformed_id("one-piece");
    /// assert!(error.to_string().contains("one-piece"));
    /// ```
    pub fn malformed_id(id: impl Into<String>) -> Self {
        Error::MalformedIdentifier { id: id.into() }
    }

    /// Returns `true` for failures of the outbound request itself: network, HTTP
    /// status, rate limiting or an undecodable body.
    ///
    /// ```rust
    /// use hondana::Error;
    ///
    /// assert!(Error::rate_limit(None).is_transport());
    /// assert!(!Error::malformed_id("slug").is_transport());
    /// ```
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Error::Network(_) | Error::Source { .. } | Error::RateLimit { .. } | Error::Json(_)
        )
    }
}
