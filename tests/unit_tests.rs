use hondana::config::{DEFAULT_PAGE_SIZE, DEFAULT_RATE_LIMIT_MS};
use hondana::prelude::*;
use hondana::{Error, deeplink, format};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_config_builder() {
        let config = SourceConfigBuilder::default()
            .language(Language::find("pt-br").unwrap())
            .base_url("https://comick.io/")
            .page_size(50usize)
            .max_retries(2u32)
            .build()
            .unwrap();

        assert_eq!(config.language.tag, "pt-BR");
        assert_eq!(config.language.api_code, "pt-br");
        assert_eq!(config.web_root(), "https://comick.io");
        assert_eq!(config.page_size, 50);
        assert_eq!(config.max_retries, 2);
        assert_eq!(config.rate_limit_ms, DEFAULT_RATE_LIMIT_MS);
    }

    #[test]
    fn test_source_config_defaults() {
        let config = SourceConfig::default();

        assert!(config.language.is_all());
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(config.max_retries, 0);
        assert_eq!(config.api_root(), "https://api.comick.fun");
        assert!(config.user_agent.starts_with("Hondana/"));
    }

    #[test]
    fn test_language_presets() {
        let languages = Language::supported();

        assert_eq!(languages[0], Language::all());
        assert!(languages.contains(&Language::english()));
        assert_eq!(Language::find("zh-Hant").unwrap().api_code, "zh-hk");
        assert_eq!(Language::find("ES-419").unwrap().tag, "es-419");
        assert!(Language::find("klingon").is_none());

        let mut tags: Vec<&str> = languages.iter().map(|l| l.tag).collect();
        tags.sort();
        tags.dedup();
        assert_eq!(tags.len(), languages.len(), "language tags must be unique");
    }

    #[test]
    fn test_manga_id_variants() {
        let stable = MangaId::StableKey("xK3b9".to_string());
        let slug = MangaId::LegacySlug("one-piece".to_string());

        assert!(stable.is_stable());
        assert!(!slug.is_stable());
        assert_eq!(stable.path(), "/comic/xK3b9");
        assert_eq!(slug.to_string(), "one-piece");

        match slug.stable_key() {
            Err(Error::MalformedIdentifier { id }) => assert_eq!(id, "one-piece"),
            other => panic!("expected MalformedIdentifier, got {:?}", other),
        }
    }

    #[test]
    fn test_manga_id_serialization_keeps_kind() {
        let slug = MangaId::LegacySlug("one-piece".to_string());
        let json = serde_json::to_string(&slug).unwrap();
        assert_eq!(json, r#"{"kind":"legacy_slug","value":"one-piece"}"#);

        let back: MangaId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, slug);
    }

    #[test]
    fn test_manga_page_next_flag() {
        let entry = |n: usize| Manga {
            id: MangaId::StableKey(format!("h{}", n)),
            title: format!("Title {}", n),
            cover_url: None,
        };

        let full = MangaPage::new((0..20).map(entry).collect(), 20);
        assert!(full.has_next_page);

        let short = MangaPage::new((0..19).map(entry).collect(), 20);
        assert!(!short.has_next_page);

        let single = MangaPage::single(entry(1));
        assert_eq!(single.len(), 1);
        assert!(!single.has_next_page);
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(MangaStatus::from_code(Some(1), Some(false)), MangaStatus::Ongoing);
        assert_eq!(MangaStatus::from_code(Some(1), Some(true)), MangaStatus::Completed);
        assert_eq!(MangaStatus::from_code(Some(2), None), MangaStatus::Completed);
        assert_eq!(MangaStatus::from_code(Some(3), None), MangaStatus::Cancelled);
        assert_eq!(MangaStatus::from_code(Some(4), Some(true)), MangaStatus::Hiatus);
        assert_eq!(MangaStatus::from_code(None, None), MangaStatus::Unknown);
    }

    #[test]
    fn test_sources_collection() {
        let mut sources = Sources::new();

        // Initially empty
        assert_eq!(sources.len(), 0);
        assert!(sources.is_empty());

        sources.add(ComickSource::new(Language::english()));
        assert_eq!(sources.len(), 1);
        assert!(!sources.is_empty());

        let ids = sources.list_ids();
        assert!(ids.contains(&"comick-en"));
        assert!(sources.get("comick-xx").is_none());
    }

    #[test]
    fn test_comick_all_sources() {
        let sources = Sources::comick_all();

        assert_eq!(sources.len(), Language::supported().len());
        assert_eq!(sources.list_ids()[0], "comick-all");

        let brazilian = sources.for_lang("pt-BR").unwrap();
        assert_eq!(brazilian.id(), "comick-pt-br");
        assert_eq!(brazilian.name(), "Comick");
        assert!(brazilian.supports_latest());
        assert!(brazilian.base_url().starts_with("https://"));
    }

    #[test]
    fn test_error_handling() {
        let error = Error::parse("Test parse error");
        assert!(error.to_string().contains("Test parse error"));

        let error = Error::not_found("Test not found error");
        assert!(error.to_string().contains("Test not found error"));

        let error = Error::malformed_id("one-piece");
        assert!(error.to_string().contains("migrate"));
        assert!(!error.is_transport());

        assert!(Error::source("comick-en", "HTTP 503").is_transport());
        assert!(Error::rate_limit(Some(5)).is_transport());
        assert!(!Error::Unimplemented("most viewed".to_string()).is_transport());
    }

    #[test]
    fn test_chapter_scanlator() {
        let mut chapter = Chapter {
            id: "/comic/xK3b9/aB12c-chapter-1-en".to_string(),
            lang: "en".to_string(),
            volume: String::new(),
            chapter: "1".to_string(),
            title: String::new(),
            name: "Chapter 1".to_string(),
            uploaded_at: None,
            scanlators: vec![],
        };
        assert_eq!(chapter.scanlator(), "Unknown");

        chapter.scanlators = vec!["Alpha".to_string(), " ".to_string(), "Beta".to_string()];
        assert_eq!(chapter.scanlator(), "Alpha, Beta");
    }

    #[test]
    fn test_chapter_names() {
        let cases = vec![
            (("1", "3", "Start"), "Vol. 1, Ch. 3: Start"),
            (("1", "3", ""), "Vol. 1, Ch. 3"),
            (("", "3", "Start"), "Chapter 3: Start"),
            (("2", "", "Extras"), "Volume 2: Extras"),
            (("", "", ""), ""),
        ];

        for ((vol, chap, title), expected) in cases {
            assert_eq!(
                format::chapter_name(vol, chap, title),
                expected,
                "Chapter name failed for vol={:?} chap={:?} title={:?}",
                vol,
                chap,
                title
            );
        }
    }

    #[test]
    fn test_upload_dates() {
        let date = format::parse_upload_date("2023-04-01T12:30:00Z").unwrap();
        assert_eq!(date.to_rfc3339(), "2023-04-01T12:30:00+00:00");

        let fractional = format::parse_upload_date("2023-04-01T12:30:00.250Z").unwrap();
        assert_eq!(fractional.timestamp(), date.timestamp());

        assert!(format::parse_upload_date("").is_none());
        assert!(format::parse_upload_date("yesterday").is_none());
    }

    #[test]
    fn test_deep_links() {
        assert_eq!(
            deeplink::search_query_for_segments(&["comic", "xK3b9"]).as_deref(),
            Some("id:xK3b9")
        );
        assert_eq!(
            deeplink::search_query_for_segments(&["comic", "xK3b9", "chapters"]).as_deref(),
            Some("id:xK3b9")
        );
        assert_eq!(deeplink::search_query_for_segments(&["comic", "xK3b9", "follows"]), None);
        assert_eq!(deeplink::search_query_for_segments(&["comic", "xK3b9", "covers"]), None);
        assert_eq!(deeplink::search_query_for_segments(&["comic"]), None);
        assert_eq!(deeplink::search_query_for_segments::<&str>(&[]), None);

        assert_eq!(
            deeplink::search_query("https://comick.app/comic/a%20b/").as_deref(),
            Some("id:a b")
        );
        assert_eq!(deeplink::search_query("not a link"), None);
    }
}
