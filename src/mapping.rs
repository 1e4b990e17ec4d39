//! Mapping from API records to the host content model.
//!
//! Pure functions only; identifiers, covers, status, tags and descriptions are all
//! derived here from [`models`](crate::models) records.

use crate::format::{self, DescriptionSections};
use crate::models::{BrowseComic, ComicChapter, ComicDetail, Cover, Image, SearchComic};
use crate::types::{Chapter, Manga, MangaDetails, MangaId, MangaStatus, Page};

/// Search/list entry; carries the stable key.
pub fn search_entry(comic: &SearchComic, image_cdn: &str) -> Manga {
    Manga {
        id: MangaId::StableKey(comic.hid.clone()),
        title: comic.title.trim().to_string(),
        cover_url: cover(comic.cover_url.as_deref(), &comic.md_covers, image_cdn),
    }
}

/// Hot listing entry; only a legacy slug is available.
pub fn browse_entry(comic: &BrowseComic, image_cdn: &str) -> Manga {
    Manga {
        id: MangaId::LegacySlug(comic.slug.clone()),
        title: comic.title.trim().to_string(),
        cover_url: cover(comic.cover_url.as_deref(), &comic.md_covers, image_cdn),
    }
}

/// List entry for a direct lookup answered with a detail record.
pub fn detail_entry(detail: &ComicDetail, image_cdn: &str) -> Manga {
    let comic = &detail.comic;
    Manga {
        id: MangaId::StableKey(comic.hid.clone()),
        title: comic.title.trim().to_string(),
        cover_url: cover(comic.cover_url.as_deref(), &comic.md_covers, image_cdn),
    }
}

/// Full title metadata.
pub fn details(detail: &ComicDetail, image_cdn: &str) -> MangaDetails {
    let comic = &detail.comic;

    let sections = DescriptionSections {
        synopsis: comic
            .desc
            .as_deref()
            .map(format::clean_synopsis)
            .unwrap_or_default(),
        related_series: format::related_series(
            comic
                .relate_from
                .iter()
                .map(|r| (r.md_relates.name.as_str(), r.relate_to.title.as_deref())),
        ),
        alternative_titles: format::alternative_titles(
            comic.alt_titles.iter().map(|t| t.title.as_deref()),
        ),
        published: format::published(comic.year),
        followed_by: format!("Followed by: {}", format::follow_count(comic.user_follow_count)),
    };

    let genres = detail.genres.iter().map(|g| g.name.as_str());
    let categories = comic
        .categories
        .iter()
        .filter_map(|c| c.category.title.as_deref());

    MangaDetails {
        id: MangaId::StableKey(comic.hid.clone()),
        title: comic.title.trim().to_string(),
        description: format::description(&sections),
        status: MangaStatus::from_code(comic.status, comic.translation_completed),
        cover_url: cover(comic.cover_url.as_deref(), &comic.md_covers, image_cdn),
        artists: distinct(detail.artists.iter().map(|n| n.name.as_str())),
        authors: distinct(detail.authors.iter().map(|n| n.name.as_str())),
        tags: tags(
            comic.country.as_deref(),
            detail.demographic.as_deref(),
            genres,
            &comic.content_rating,
            categories,
        ),
    }
}

/// Resolves a cover: the first `md_covers` key rendered on the image CDN, else
/// the bare `cover_url`, else nothing.
///
/// ```rust
/// use hondana::mapping::cover;
///
/// let fallback = cover(Some("https://x/c.jpg"), &[], "https://cdn");
/// assert_eq!(fallback.as_deref(), Some("https://x/c.jpg"));
/// assert_eq!(cover(None, &[], "https://cdn"), None);
/// ```
pub fn cover(cover_url: Option<&str>, covers: &[Cover], image_cdn: &str) -> Option<String> {
    let key = covers
        .iter()
        .filter_map(|c| c.b2key.as_deref())
        .map(str::trim)
        .find(|k| !k.is_empty());

    match key {
        Some(key) => Some(format!("{}/{}", image_cdn.trim_end_matches('/'), key)),
        None => cover_url
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .map(str::to_string),
    }
}

/// Pseudo-genres derived from the origin country.
///
/// ```rust
/// use hondana::mapping::origination;
///
/// assert_eq!(origination(Some("hk")), vec!["Manhua", "Hong Kong"]);
/// assert!(origination(Some("fr")).is_empty());
/// ```
pub fn origination(country: Option<&str>) -> Vec<&'static str> {
    match country {
        Some("jp") => vec!["Manga"],
        Some("kr") => vec!["Manhwa"],
        Some("cn") => vec!["Manhua"],
        Some("hk") => vec!["Manhua", "Hong Kong"],
        Some("gb") => vec!["English"],
        _ => Vec::new(),
    }
}

/// Tag list: origin pseudo-genres, demographic, genres, content rating when known,
/// then categories, with duplicates removed keeping the first occurrence.
pub fn tags<'a, G, C>(
    country: Option<&str>,
    demographic: Option<&'a str>,
    genres: G,
    content_rating: &str,
    categories: C,
) -> Vec<String>
where
    G: IntoIterator<Item = &'a str>,
    C: IntoIterator<Item = &'a str>,
{
    let content_rating = content_rating.trim();
    let rating = (!content_rating.is_empty())
        .then(|| format!("Content Rating: {}", format::capitalize(content_rating)));

    let all = origination(country)
        .into_iter()
        .map(str::to_string)
        .chain(demographic.map(str::to_string))
        .chain(genres.into_iter().map(str::to_string))
        .chain(rating)
        .chain(categories.into_iter().map(str::to_string));

    distinct_owned(all)
}

/// Chapter entry keyed under `manga_prefix`.
pub fn chapter(chapter: &ComicChapter, manga_prefix: &str) -> Chapter {
    Chapter {
        id: format!(
            "{}/{}-chapter-{}-{}",
            manga_prefix, chapter.hid, chapter.chap, chapter.lang
        ),
        lang: chapter.lang.clone(),
        volume: chapter.vol.clone(),
        chapter: chapter.chap.clone(),
        title: chapter.title.clone(),
        name: format::chapter_name(&chapter.vol, &chapter.chap, chapter.title.trim()),
        uploaded_at: format::parse_upload_date(&chapter.created_at),
        scanlators: chapter
            .groups
            .iter()
            .map(|g| g.trim())
            .filter(|g| !g.is_empty())
            .map(str::to_string)
            .collect(),
    }
}

/// Pages with a URL, re-indexed contiguously in their original order.
pub fn pages(images: &[Image]) -> Vec<Page> {
    images
        .iter()
        .filter_map(|image| image.url.as_deref())
        .filter(|url| !url.trim().is_empty())
        .enumerate()
        .map(|(index, url)| Page {
            index,
            image_url: url.to_string(),
        })
        .collect()
}

fn distinct<'a, I>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    distinct_owned(items.into_iter().map(str::to_string))
}

fn distinct_owned<I>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut out: Vec<String> = Vec::new();
    for item in items {
        let item = item.trim();
        if !item.is_empty() && !out.iter().any(|seen| seen == item) {
            out.push(item.to_string());
        }
    }
    out
}
