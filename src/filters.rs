//! Search filters.
//!
//! A [`FilterSet`] is an ordered list of independent [`Filter`] values. Each variant
//! owns its state and turns it into query parameters through
//! [`Filter::contribute`]; nothing else in the crate inspects filter internals
//! except the query builder's mode selection (text-search mode, the `hot` sort,
//! origin countries and the unimplemented browse modes).
//!
//! # Examples
//!
//! ```rust
//! use hondana::filters::{FilterSet, TriState};
//!
//! let mut filters = FilterSet::default();
//! filters.tri_state_mut("genres").unwrap().set("action", TriState::Included);
//! filters.tri_state_mut("genres").unwrap().set("romance", TriState::Excluded);
//! filters.toggle_mut("completed").unwrap().state = true;
//!
//! let params = filters.contributions();
//! assert!(params.contains(&("completed", "true".to_string())));
//! assert!(params.contains(&("genres", "action".to_string())));
//! assert!(params.contains(&("excludes", "romance".to_string())));
//! ```

use once_cell::sync::Lazy;
use regex::Regex;

static TRAILING_COUNT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m) \(\d+\)$").expect("valid regex"));
static TRAILING_POSSESSIVE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)'s$").expect("valid regex"));
// ` -/` is a range: space through slash
static DISALLOWED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9&'’ -/\n]").expect("valid regex"));

/// Query parameters contributed by filters, in emission order.
pub type QueryParams = Vec<(&'static str, String)>;

/// A selectable value of a group or select filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Choice {
    pub label: &'static str,
    pub value: &'static str,
}

const fn choice(label: &'static str, value: &'static str) -> Choice {
    Choice { label, value }
}

/// State of an include/exclude option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TriState {
    #[default]
    Neutral,
    Included,
    Excluded,
}

/// Boolean filter emitting `{param}=true` when set.
#[derive(Debug, Clone, PartialEq)]
pub struct Toggle {
    pub name: &'static str,
    pub param: &'static str,
    pub state: bool,
}

/// Include/exclude multi-select.
///
/// Included options emit `include_param`, excluded ones `exclude_param` when the
/// group supports exclusion.
#[derive(Debug, Clone, PartialEq)]
pub struct TriStateGroup {
    pub name: &'static str,
    pub include_param: &'static str,
    pub exclude_param: Option<&'static str>,
    pub options: Vec<(Choice, TriState)>,
}

impl TriStateGroup {
    fn new(
        name: &'static str,
        include_param: &'static str,
        exclude_param: Option<&'static str>,
        choices: &[Choice],
    ) -> Self {
        Self {
            name,
            include_param,
            exclude_param,
            options: choices.iter().map(|&c| (c, TriState::Neutral)).collect(),
        }
    }

    /// Sets the state of the option whose value is `value`. Returns `false` if absent.
    pub fn set(&mut self, value: &str, state: TriState) -> bool {
        match self.options.iter_mut().find(|(c, _)| c.value == value) {
            Some((_, s)) => {
                *s = state;
                true
            }
            None => false,
        }
    }

    fn values_in(&self, state: TriState) -> impl Iterator<Item = &'static str> + '_ {
        self.options
            .iter()
            .filter(move |(_, s)| *s == state)
            .map(|(c, _)| c.value)
    }
}

/// Plain checkbox group; each checked option emits `param`.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckGroup {
    pub name: &'static str,
    pub param: &'static str,
    pub options: Vec<(Choice, bool)>,
}

impl CheckGroup {
    fn new(name: &'static str, param: &'static str, choices: &[Choice]) -> Self {
        Self {
            name,
            param,
            options: choices.iter().map(|&c| (c, false)).collect(),
        }
    }

    pub fn set(&mut self, value: &str, checked: bool) -> bool {
        match self.options.iter_mut().find(|(c, _)| c.value == value) {
            Some((_, s)) => {
                *s = checked;
                true
            }
            None => false,
        }
    }

    /// Values of the checked options, in option order.
    pub fn checked(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.options.iter().filter(|(_, s)| *s).map(|(c, _)| c.value)
    }
}

/// Single choice out of a fixed list. Emits only when the selection differs from
/// the default.
#[derive(Debug, Clone, PartialEq)]
pub struct Select {
    pub name: &'static str,
    pub param: &'static str,
    pub options: Vec<Choice>,
    pub default: usize,
    pub selected: usize,
}

impl Select {
    fn new(name: &'static str, param: &'static str, options: &[Choice]) -> Self {
        Self {
            name,
            param,
            options: options.to_vec(),
            default: 0,
            selected: 0,
        }
    }

    /// Value of the current selection.
    pub fn value(&self) -> Option<&'static str> {
        self.options.get(self.selected).map(|c| c.value)
    }

    pub fn is_default(&self) -> bool {
        self.selected == self.default
    }

    /// Selects the option whose value is `value`. Returns `false` if absent.
    pub fn select_value(&mut self, value: &str) -> bool {
        match self.options.iter().position(|c| c.value == value) {
            Some(index) => {
                self.selected = index;
                true
            }
            None => false,
        }
    }
}

/// Free text emitting `{param}={text}` when non-empty.
#[derive(Debug, Clone, PartialEq)]
pub struct TextInput {
    pub name: &'static str,
    pub param: &'static str,
    pub value: String,
}

/// Multi-line tag list, normalized by [`tag_slugs`].
#[derive(Debug, Clone, PartialEq)]
pub struct TagInput {
    pub name: &'static str,
    pub param: &'static str,
    pub text: String,
}

/// Browse modes the API exposes but for which no request shape is defined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowseMode {
    PopularNewComics,
    MostViewed,
}

/// Period selector for a [`BrowseMode`]. Never contributes search parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct BrowsePeriod {
    pub name: &'static str,
    pub mode: BrowseMode,
    pub options: Vec<Choice>,
    pub selected: usize,
}

impl BrowsePeriod {
    fn new(name: &'static str, mode: BrowseMode) -> Self {
        Self {
            name,
            mode,
            options: PERIODS.to_vec(),
            selected: 0,
        }
    }

    pub fn is_active(&self) -> bool {
        self.selected > 0
    }
}

/// One search filter.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// When on, the query builder sends only the text query and pagination
    TextSearchMode(Toggle),
    Toggle(Toggle),
    TriState(TriStateGroup),
    Check(CheckGroup),
    Select(Select),
    Text(TextInput),
    Tags(TagInput),
    Browse(BrowsePeriod),
}

impl Filter {
    pub fn name(&self) -> &'static str {
        match self {
            Filter::TextSearchMode(f) | Filter::Toggle(f) => f.name,
            Filter::TriState(f) => f.name,
            Filter::Check(f) => f.name,
            Filter::Select(f) => f.name,
            Filter::Text(f) => f.name,
            Filter::Tags(f) => f.name,
            Filter::Browse(f) => f.name,
        }
    }

    /// Query parameters this filter adds to a search request.
    pub fn contribute(&self) -> QueryParams {
        let mut params = QueryParams::new();
        match self {
            Filter::TextSearchMode(_) | Filter::Browse(_) => {}
            Filter::Toggle(toggle) => {
                if toggle.state {
                    params.push((toggle.param, "true".to_string()));
                }
            }
            Filter::TriState(group) => {
                params.extend(
                    group
                        .values_in(TriState::Included)
                        .map(|v| (group.include_param, v.to_string())),
                );
                if let Some(exclude) = group.exclude_param {
                    params.extend(
                        group
                            .values_in(TriState::Excluded)
                            .map(|v| (exclude, v.to_string())),
                    );
                }
            }
            Filter::Check(group) => {
                params.extend(group.checked().map(|v| (group.param, v.to_string())));
            }
            Filter::Select(select) => {
                if !select.is_default() {
                    if let Some(value) = select.value() {
                        params.push((select.param, value.to_string()));
                    }
                }
            }
            Filter::Text(input) => {
                let value = input.value.trim();
                if !value.is_empty() {
                    params.push((input.param, value.to_string()));
                }
            }
            Filter::Tags(input) => {
                params.extend(tag_slugs(&input.text).into_iter().map(|s| (input.param, s)));
            }
        }
        params
    }
}

/// Ordered collection of filters for one request.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterSet {
    filters: Vec<Filter>,
}

impl FilterSet {
    pub fn new(filters: Vec<Filter>) -> Self {
        Self { filters }
    }

    /// A set with no filters at all.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Filter> {
        self.filters.iter()
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Contributions of every filter, in filter order.
    pub fn contributions(&self) -> QueryParams {
        self.filters.iter().flat_map(Filter::contribute).collect()
    }

    pub fn text_search_mode(&self) -> bool {
        self.filters
            .iter()
            .any(|f| matches!(f, Filter::TextSearchMode(t) if t.state))
    }

    /// Current value of the `sort` select, if present.
    pub fn sort_value(&self) -> Option<&'static str> {
        self.select(SORT_PARAM).and_then(Select::value)
    }

    /// Checked origin country codes (`jp`, `kr`, `cn`, ...).
    pub fn origin_countries(&self) -> Vec<&'static str> {
        self.filters
            .iter()
            .filter_map(|f| match f {
                Filter::Check(group) if group.param == COUNTRY_PARAM => Some(group),
                _ => None,
            })
            .flat_map(CheckGroup::checked)
            .collect()
    }

    /// First browse mode with a non-default period.
    pub fn active_browse_mode(&self) -> Option<BrowseMode> {
        self.filters.iter().find_map(|f| match f {
            Filter::Browse(period) if period.is_active() => Some(period.mode),
            _ => None,
        })
    }

    pub fn select(&self, param: &str) -> Option<&Select> {
        self.filters.iter().find_map(|f| match f {
            Filter::Select(s) if s.param == param => Some(s),
            _ => None,
        })
    }

    pub fn select_mut(&mut self, param: &str) -> Option<&mut Select> {
        self.filters.iter_mut().find_map(|f| match f {
            Filter::Select(s) if s.param == param => Some(s),
            _ => None,
        })
    }

    pub fn toggle_mut(&mut self, param: &str) -> Option<&mut Toggle> {
        self.filters.iter_mut().find_map(|f| match f {
            Filter::Toggle(t) if t.param == param => Some(t),
            _ => None,
        })
    }

    pub fn text_search_mode_mut(&mut self) -> Option<&mut Toggle> {
        self.filters.iter_mut().find_map(|f| match f {
            Filter::TextSearchMode(t) => Some(t),
            _ => None,
        })
    }

    pub fn tri_state_mut(&mut self, include_param: &str) -> Option<&mut TriStateGroup> {
        self.filters.iter_mut().find_map(|f| match f {
            Filter::TriState(g) if g.include_param == include_param => Some(g),
            _ => None,
        })
    }

    pub fn check_mut(&mut self, param: &str) -> Option<&mut CheckGroup> {
        self.filters.iter_mut().find_map(|f| match f {
            Filter::Check(g) if g.param == param => Some(g),
            _ => None,
        })
    }

    pub fn text_mut(&mut self, param: &str) -> Option<&mut TextInput> {
        self.filters.iter_mut().find_map(|f| match f {
            Filter::Text(t) if t.param == param => Some(t),
            _ => None,
        })
    }

    pub fn tags_mut(&mut self) -> Option<&mut TagInput> {
        self.filters.iter_mut().find_map(|f| match f {
            Filter::Tags(t) => Some(t),
            _ => None,
        })
    }

    pub fn browse_mut(&mut self, mode: BrowseMode) -> Option<&mut BrowsePeriod> {
        self.filters.iter_mut().find_map(|f| match f {
            Filter::Browse(p) if p.mode == mode => Some(p),
            _ => None,
        })
    }
}

impl Default for FilterSet {
    /// The filter list Comick sources expose to the host.
    fn default() -> Self {
        Self::new(vec![
            Filter::TextSearchMode(Toggle {
                name: "Text search only (ignores everything below)",
                param: "",
                state: false,
            }),
            Filter::Toggle(Toggle {
                name: "Completed translation",
                param: "completed",
                state: false,
            }),
            Filter::TriState(TriStateGroup::new(
                "Genre",
                "genres",
                Some("excludes"),
                GENRES,
            )),
            Filter::TriState(TriStateGroup::new(
                "Demographic",
                "demographic",
                None,
                DEMOGRAPHICS,
            )),
            Filter::Check(CheckGroup::new("Type", COUNTRY_PARAM, TYPES)),
            Filter::Select(Select::new("Sort", SORT_PARAM, SORTS)),
            Filter::Select(Select::new("Status", "status", STATUSES)),
            Filter::Select(Select::new("Created at", "time", CREATED_AT)),
            Filter::Text(TextInput {
                name: "Minimum chapters",
                param: "minimum",
                value: String::new(),
            }),
            Filter::Text(TextInput {
                name: "From year, ex: 2010",
                param: "from",
                value: String::new(),
            }),
            Filter::Text(TextInput {
                name: "To year, ex: 2021",
                param: "to",
                value: String::new(),
            }),
            Filter::Tags(TagInput {
                name: "Tags, one per line",
                param: "tags",
                text: String::new(),
            }),
            Filter::Browse(BrowsePeriod::new(
                "Popular new comics",
                BrowseMode::PopularNewComics,
            )),
            Filter::Browse(BrowsePeriod::new("Most viewed", BrowseMode::MostViewed)),
        ])
    }
}

/// Normalizes free-form tag text into URL-safe slugs, one per line.
///
/// Lowercases, strips trailing ` (123)` counts and `'s`, drops characters outside
/// `[a-z0-9&'’ -/\n]`, maps `/` and space to `-`, `&` to `-and-amp-`, apostrophes to
/// `-and-039-`, collapses `--` and strips a leading `-`. Lines and commas separate
/// tags; empty slugs are dropped. Normalizing an output slug again yields it unchanged.
///
/// ```rust
/// use hondana::filters::tag_slugs;
///
/// assert_eq!(
///     tag_slugs("Magic (120)\nSci-Fi/Fantasy\nGirl's Love"),
///     vec!["magic", "sci-fi-fantasy", "girl-and-039-s-love"]
/// );
/// assert_eq!(tag_slugs("Tom & Jerry's"), vec!["tom-and-amp-jerry"]);
/// ```
pub fn tag_slugs(text: &str) -> Vec<String> {
    let lowered = text.trim().to_lowercase();
    let stripped = TRAILING_COUNT.replace_all(&lowered, "");
    let stripped = TRAILING_POSSESSIVE.replace_all(&stripped, "");
    let cleaned = DISALLOWED.replace_all(&stripped, "");

    let mut slug = cleaned
        .replace('/', "-")
        .replace(' ', "-")
        .replace('&', "-and-amp-")
        .replace(['\'', '’'], "-and-039-");
    while slug.contains("--") {
        slug = slug.replace("--", "-");
    }

    slug.split(['\n', ','])
        .map(|s| s.strip_prefix('-').unwrap_or(s))
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

pub(crate) const SORT_PARAM: &str = "sort";
pub(crate) const COUNTRY_PARAM: &str = "country";

/// Sort value that switches search to the hot browse listing.
pub const HOT_SORT: &str = "hot";

const SORTS: &[Choice] = &[
    choice("Most popular", "follow"),
    choice("Most follows", "user_follow_count"),
    choice("Most views", "view"),
    choice("High rating", "rating"),
    choice("Last updated", "uploaded"),
    choice("Newest", "created_at"),
    choice("Hot", HOT_SORT),
];

const STATUSES: &[Choice] = &[
    choice("All", "0"),
    choice("Ongoing", "1"),
    choice("Completed", "2"),
    choice("Cancelled", "3"),
    choice("Hiatus", "4"),
];

const CREATED_AT: &[Choice] = &[
    choice("Any time", ""),
    choice("3 days", "3"),
    choice("7 days", "7"),
    choice("30 days", "30"),
    choice("3 months", "90"),
    choice("6 months", "180"),
    choice("1 year", "365"),
];

const PERIODS: &[Choice] = &[
    choice("None", ""),
    choice("7 days", "7"),
    choice("1 month", "30"),
    choice("3 months", "90"),
    choice("6 months", "180"),
    choice("9 months", "270"),
    choice("1 year", "360"),
    choice("2 years", "720"),
];

const TYPES: &[Choice] = &[
    choice("Manga", "jp"),
    choice("Manhwa", "kr"),
    choice("Manhua", "cn"),
];

const DEMOGRAPHICS: &[Choice] = &[
    choice("Shounen", "1"),
    choice("Shoujo", "2"),
    choice("Seinen", "3"),
    choice("Josei", "4"),
];

const GENRES: &[Choice] = &[
    choice("4-Koma", "4-koma"),
    choice("Action", "action"),
    choice("Adaptation", "adaptation"),
    choice("Adult", "adult"),
    choice("Adventure", "adventure"),
    choice("Aliens", "aliens"),
    choice("Animals", "animals"),
    choice("Anthology", "anthology"),
    choice("Award Winning", "award-winning"),
    choice("Comedy", "comedy"),
    choice("Cooking", "cooking"),
    choice("Crime", "crime"),
    choice("Crossdressing", "crossdressing"),
    choice("Delinquents", "delinquents"),
    choice("Demons", "demons"),
    choice("Doujinshi", "doujinshi"),
    choice("Drama", "drama"),
    choice("Ecchi", "ecchi"),
    choice("Fan Colored", "fan-colored"),
    choice("Fantasy", "fantasy"),
    choice("Full Color", "full-color"),
    choice("Gender Bender", "gender-bender"),
    choice("Genderswap", "genderswap"),
    choice("Ghosts", "ghosts"),
    choice("Gore", "gore"),
    choice("Gyaru", "gyaru"),
    choice("Harem", "harem"),
    choice("Historical", "historical"),
    choice("Horror", "horror"),
    choice("Incest", "incest"),
    choice("Isekai", "isekai"),
    choice("Loli", "loli"),
    choice("Long Strip", "long-strip"),
    choice("Mafia", "mafia"),
    choice("Magic", "magic"),
    choice("Magical Girls", "magical-girls"),
    choice("Martial Arts", "martial-arts"),
    choice("Mature", "mature"),
    choice("Mecha", "mecha"),
    choice("Medical", "medical"),
    choice("Military", "military"),
    choice("Monster Girls", "monster-girls"),
    choice("Monsters", "monsters"),
    choice("Music", "music"),
    choice("Mystery", "mystery"),
    choice("Ninja", "ninja"),
    choice("Office Workers", "office-workers"),
    choice("Official Colored", "official-colored"),
    choice("Oneshot", "oneshot"),
    choice("Philosophical", "philosophical"),
    choice("Police", "police"),
    choice("Post-Apocalyptic", "post-apocalyptic"),
    choice("Psychological", "psychological"),
    choice("Reincarnation", "reincarnation"),
    choice("Reverse Harem", "reverse-harem"),
    choice("Romance", "romance"),
    choice("Samurai", "samurai"),
    choice("School Life", "school-life"),
    choice("Sci-Fi", "sci-fi"),
    choice("Sexual Violence", "sexual-violence"),
    choice("Shota", "shota"),
    choice("Shoujo Ai", "shoujo-ai"),
    choice("Shounen Ai", "shounen-ai"),
    choice("Slice of Life", "slice-of-life"),
    choice("Smut", "smut"),
    choice("Sports", "sports"),
    choice("Superhero", "superhero"),
    choice("Supernatural", "supernatural"),
    choice("Survival", "survival"),
    choice("Thriller", "thriller"),
    choice("Time Travel", "time-travel"),
    choice("Traditional Games", "traditional-games"),
    choice("Tragedy", "tragedy"),
    choice("User Created", "user-created"),
    choice("Vampires", "vampires"),
    choice("Video Games", "video-games"),
    choice("Villainess", "villainess"),
    choice("Virtual Reality", "virtual-reality"),
    choice("Web Comic", "web-comic"),
    choice("Wuxia", "wuxia"),
    choice("Yaoi", "yaoi"),
    choice("Yuri", "yuri"),
    choice("Zombies", "zombies"),
];
