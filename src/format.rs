//! Deterministic text assembly for titles and chapters.
//!
//! Everything here is pure: descriptions, follow counts, chapter display names
//! and upload dates are derived only from their inputs.

use chrono::{DateTime, NaiveDateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::Html;

static LINE_BREAK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<br\s*/?>").expect("valid regex"));
static MARKDOWN_LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("valid regex"));
static MARKDOWN_BOLD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*+\s*([^*]*?)\s*\*+").expect("valid regex"));
static MARKDOWN_ITALIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"_+\s*([^_]*?)\s*_+").expect("valid regex"));

const SECTION_SEPARATOR: &str = "\n\n";

/// Cleans a Comick synopsis for plain-text display.
///
/// `<br>` becomes a newline and HTML entities are decoded; any other `<` is kept
/// as literal text. Anything after a `---` rule is dropped and markdown
/// links, bold and italic markers are reduced to their text.
///
/// ```rust
/// use hondana::format::clean_synopsis;
///
/// let raw = "A **pirate** story &amp; more [wiki](https://x.y)\n---\nSource: MU";
/// assert_eq!(clean_synopsis(raw), "A pirate story & more wiki");
/// ```
pub fn clean_synopsis(raw: &str) -> String {
    let decoded = decode_entities(raw);
    let body = decoded.split("---").next().unwrap_or_default();
    let body = MARKDOWN_LINK.replace_all(body, "$1");
    let body = MARKDOWN_BOLD.replace_all(&body, "$1");
    let body = MARKDOWN_ITALIC.replace_all(&body, "$1");
    body.trim().to_string()
}

fn decode_entities(raw: &str) -> String {
    let text = LINE_BREAK.replace_all(raw, "\n");
    if !text.contains('&') {
        return text.into_owned();
    }
    // escaped so the parser only ever sees text nodes
    Html::parse_fragment(&text.replace('<', "&lt;"))
        .root_element()
        .text()
        .collect::<String>()
}

/// Joins `"{relation}: {title}"` lines, skipping relations without a title.
pub fn related_series<'a, I>(relations: I) -> String
where
    I: IntoIterator<Item = (&'a str, Option<&'a str>)>,
{
    relations
        .into_iter()
        .filter_map(|(relation, title)| title.map(|t| format!("{}: {}", relation.trim(), t.trim())))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Bulleted alternative titles under a heading, or empty when there are none.
///
/// ```rust
/// use hondana::format::alternative_titles;
///
/// assert_eq!(
///     alternative_titles([Some("ワンピース"), None, Some("OP")]),
///     "Alternative Titles:\n• ワンピース\n• OP"
/// );
/// assert_eq!(alternative_titles([None::<&str>]), "");
/// ```
pub fn alternative_titles<'a, I>(titles: I) -> String
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    let bullets = titles
        .into_iter()
        .flatten()
        .map(|t| format!("• {}", t.trim()))
        .collect::<Vec<_>>();
    if bullets.is_empty() {
        String::new()
    } else {
        format!("Alternative Titles:\n{}", bullets.join("\n"))
    }
}

/// `Published: {year}` with `N/A` for unknown years.
pub fn published(year: Option<i64>) -> String {
    match year {
        Some(year) => format!("Published: {}", year),
        None => "Published: N/A".to_string(),
    }
}

/// US-grouped follow count. Zero and one take the singular.
///
/// ```rust
/// use hondana::format::follow_count;
///
/// assert_eq!(follow_count(0), "0 user");
/// assert_eq!(follow_count(1), "1 user");
/// assert_eq!(follow_count(1000), "1,000 users");
/// ```
pub fn follow_count(count: u64) -> String {
    let unit = if count == 0 || count == 1 {
        "user"
    } else {
        "users"
    };
    format!("{} {}", group_thousands(count), unit)
}

/// Formats an integer with `,` thousands separators.
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Sections of a title description, in display order.
#[derive(Debug, Clone, Default)]
pub struct DescriptionSections {
    pub synopsis: String,
    pub related_series: String,
    pub alternative_titles: String,
    pub published: String,
    pub followed_by: String,
}

/// Concatenates the non-empty sections in their fixed order, separated by a blank line.
///
/// A section never gets a leading separator when it and everything before it is empty.
///
/// ```rust
/// use hondana::format::{description, DescriptionSections};
///
/// let text = description(&DescriptionSections {
///     published: "Published: 1997".into(),
///     followed_by: "Followed by: 2 users".into(),
///     ..Default::default()
/// });
/// assert_eq!(text, "Published: 1997\n\nFollowed by: 2 users");
/// ```
pub fn description(sections: &DescriptionSections) -> String {
    [
        sections.synopsis.as_str(),
        sections.related_series.as_str(),
        sections.alternative_titles.as_str(),
        sections.published.as_str(),
        sections.followed_by.as_str(),
    ]
    .into_iter()
    .filter(|section| !section.is_empty())
    .collect::<Vec<_>>()
    .join(SECTION_SEPARATOR)
}

/// Chapter display name from its volume, number and title.
///
/// ```rust
/// use hondana::format::chapter_name;
///
/// assert_eq!(chapter_name("2", "10", "The Duel"), "Vol. 2, Ch. 10: The Duel");
/// assert_eq!(chapter_name("", "10", ""), "Chapter 10");
/// assert_eq!(chapter_name("3", "", ""), "Volume 3");
/// assert_eq!(chapter_name("", "", "Oneshot"), "Oneshot");
/// ```
pub fn chapter_name(volume: &str, chapter: &str, title: &str) -> String {
    let mut name = String::new();
    if !volume.is_empty() {
        if chapter.is_empty() {
            name.push_str(&format!("Volume {}", volume));
        } else {
            name.push_str(&format!("Vol. {}", volume));
        }
    }
    if !chapter.is_empty() {
        if volume.is_empty() {
            name.push_str(&format!("Chapter {}", chapter));
        } else {
            name.push_str(&format!(", Ch. {}", chapter));
        }
    }
    if !title.is_empty() {
        if chapter.is_empty() && volume.is_empty() {
            name.push_str(title);
        } else {
            name.push_str(&format!(": {}", title));
        }
    }
    name
}

/// Parses Comick's `yyyy-MM-ddTHH:mm:ssZ` timestamps (UTC); fractional seconds
/// and offsets are accepted too.
pub fn parse_upload_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%SZ")
        .map(|naive| naive.and_utc())
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|dt| dt.with_timezone(&Utc))
        })
}

/// Uppercases the first character and lowercases the rest.
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
