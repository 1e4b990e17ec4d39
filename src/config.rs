//! Source configuration and language presets.
//!
//! [`SourceConfig`] is built with `derive_builder`; every field has a default matching
//! the public Comick deployment, so most callers only pick a [`Language`].
//!
//! ```rust
//! use hondana::config::{Language, SourceConfigBuilder};
//!
//! let config = SourceConfigBuilder::default()
//!     .language(Language::english())
//!     .rate_limit_ms(500u64)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.page_size, 20);
//! assert_eq!(config.language.api_code, "en");
//! ```

use derive_builder::Builder;

pub const DEFAULT_API_URL: &str = "https://api.comick.fun";
pub const DEFAULT_BASE_URL: &str = "https://comick.app";
pub const DEFAULT_IMAGE_CDN: &str = "https://meo.comick.pictures";
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Three requests per second.
pub const DEFAULT_RATE_LIMIT_MS: u64 = 334;

/// Sentinel API language code meaning "no language filter".
pub const ALL_LANGUAGES: &str = "all";

/// Host language tag paired with the code the Comick API expects.
const LANGUAGES: &[(&str, &str)] = &[
    ("all", "all"),
    ("en", "en"),
    ("pt-BR", "pt-br"),
    ("ru", "ru"),
    ("fr", "fr"),
    ("es-419", "es-419"),
    ("pl", "pl"),
    ("tr", "tr"),
    ("it", "it"),
    ("es", "es"),
    ("id", "id"),
    ("hu", "hu"),
    ("vi", "vi"),
    ("zh-Hant", "zh-hk"),
    ("ar", "ar"),
    ("de", "de"),
    ("zh", "zh"),
    ("ca", "ca"),
    ("bg", "bg"),
    ("th", "th"),
    ("fa", "fa"),
    ("uk", "uk"),
    ("mn", "mn"),
    ("ro", "ro"),
    ("he", "he"),
    ("ms", "ms"),
    ("tl", "tl"),
    ("ja", "ja"),
    ("hi", "hi"),
    ("my", "my"),
    ("ko", "ko"),
    ("cs", "cs"),
    ("pt", "pt"),
    ("nl", "nl"),
    ("sv", "sv"),
    ("bn", "bn"),
    ("no", "no"),
    ("lt", "lt"),
    ("el", "el"),
    ("sr", "sr"),
    ("da", "da"),
];

/// A content language served by Comick.
///
/// `tag` is what the host shows and stores; `api_code` is sent as the `lang`
/// query parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Language {
    pub tag: &'static str,
    pub api_code: &'static str,
}

impl Language {
    /// Every language the source ships, `all` first.
    pub fn supported() -> Vec<Language> {
        LANGUAGES
            .iter()
            .map(|&(tag, api_code)| Language { tag, api_code })
            .collect()
    }

    /// Looks a language up by host tag or API code, case-insensitively.
    ///
    /// ```rust
    /// use hondana::config::Language;
    ///
    /// assert_eq!(Language::find("pt-br").unwrap().tag, "pt-BR");
    /// assert_eq!(Language::find("zh-Hant").unwrap().api_code, "zh-hk");
    /// assert!(Language::find("xx").is_none());
    /// ```
    pub fn find(code: &str) -> Option<Language> {
        LANGUAGES
            .iter()
            .find(|(tag, api)| tag.eq_ignore_ascii_case(code) || api.eq_ignore_ascii_case(code))
            .map(|&(tag, api_code)| Language { tag, api_code })
    }

    pub fn all() -> Self {
        Language {
            tag: ALL_LANGUAGES,
            api_code: ALL_LANGUAGES,
        }
    }

    pub fn english() -> Self {
        Language {
            tag: "en",
            api_code: "en",
        }
    }

    /// Whether this is the `all` sentinel, which never reaches the API.
    pub fn is_all(&self) -> bool {
        self.api_code == ALL_LANGUAGES
    }
}

impl Default for Language {
    fn default() -> Self {
        Self::all()
    }
}

/// Settings for one Comick source instance.
#[derive(Debug, Clone, Builder)]
#[builder(setter(into))]
pub struct SourceConfig {
    #[builder(default)]
    pub language: Language,

    #[builder(default = "DEFAULT_API_URL.to_string()")]
    pub api_url: String,

    /// Public web host, used for `Referer` and for shareable URLs
    #[builder(default = "DEFAULT_BASE_URL.to_string()")]
    pub base_url: String,

    #[builder(default = "DEFAULT_IMAGE_CDN.to_string()")]
    pub image_cdn: String,

    #[builder(default = "DEFAULT_PAGE_SIZE")]
    pub page_size: usize,

    /// Minimum delay between two requests, in milliseconds
    #[builder(default = "DEFAULT_RATE_LIMIT_MS")]
    pub rate_limit_ms: u64,

    /// Retries performed by the HTTP transport; zero leaves failures to the caller
    #[builder(default)]
    pub max_retries: u32,

    #[builder(default = "default_user_agent()")]
    pub user_agent: String,
}

impl SourceConfig {
    /// Default configuration for the given language.
    pub fn for_language(language: Language) -> Self {
        Self {
            language,
            ..Self::default()
        }
    }

    /// API URL without a trailing slash.
    pub fn api_root(&self) -> &str {
        self.api_url.trim_end_matches('/')
    }

    /// Web URL without a trailing slash.
    pub fn web_root(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            language: Language::default(),
            api_url: DEFAULT_API_URL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            image_cdn: DEFAULT_IMAGE_CDN.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            rate_limit_ms: DEFAULT_RATE_LIMIT_MS,
            max_retries: 0,
            user_agent: default_user_agent(),
        }
    }
}

fn default_user_agent() -> String {
    format!("Hondana/{} (Comick reader client)", env!("CARGO_PKG_VERSION"))
}
