use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;
use crate::highlight::Span;

/// Operating system a script targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OsTag {
    Linux,
    Windows,
    Macos,
    CrossPlatform,
}

impl OsTag {
    pub const ALL: [OsTag; 4] = [
        OsTag::Linux,
        OsTag::Windows,
        OsTag::Macos,
        OsTag::CrossPlatform,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            OsTag::Linux => "linux",
            OsTag::Windows => "windows",
            OsTag::Macos => "macos",
            OsTag::CrossPlatform => "cross-platform",
        }
    }

    /// Human-readable label, also searched by free-text queries.
    pub fn label(self) -> &'static str {
        match self {
            OsTag::Linux => "Linux",
            OsTag::Windows => "Windows",
            OsTag::Macos => "macOS",
            OsTag::CrossPlatform => "Cross-Platform",
        }
    }
}

impl fmt::Display for OsTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for OsTag {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        OsTag::ALL
            .into_iter()
            .find(|os| os.slug() == wanted)
            .ok_or_else(|| ParseError::UnknownOs(s.to_string()))
    }
}

/// Closed set of catalog categories. The slug doubles as the path segment
/// under `/categories`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    SystemAdministration,
    Security,
    Networking,
    Automation,
    Backup,
    Monitoring,
    Development,
    Database,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::SystemAdministration,
        Category::Security,
        Category::Networking,
        Category::Automation,
        Category::Backup,
        Category::Monitoring,
        Category::Development,
        Category::Database,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            Category::SystemAdministration => "system-administration",
            Category::Security => "security",
            Category::Networking => "networking",
            Category::Automation => "automation",
            Category::Backup => "backup",
            Category::Monitoring => "monitoring",
            Category::Development => "development",
            Category::Database => "database",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::SystemAdministration => "System Administration",
            Category::Security => "Security",
            Category::Networking => "Networking",
            Category::Automation => "Automation",
            Category::Backup => "Backup",
            Category::Monitoring => "Monitoring",
            Category::Development => "Development",
            Category::Database => "Database",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for Category {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Category::ALL
            .into_iter()
            .find(|c| c.slug() == wanted)
            .ok_or_else(|| ParseError::UnknownCategory(s.to_string()))
    }
}

/// Emergency-priority tag carried by scripts meant for incident response.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Critical,
    High,
    Medium,
    Low,
}

impl Priority {
    pub const ALL: [Priority; 4] = [
        Priority::Critical,
        Priority::High,
        Priority::Medium,
        Priority::Low,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            Priority::Critical => "critical",
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

impl FromStr for Priority {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Priority::ALL
            .into_iter()
            .find(|p| p.slug() == wanted)
            .ok_or_else(|| ParseError::UnknownPriority(s.to_string()))
    }
}

/// A catalog entry. Owned by whoever supplies the catalog; read-only here.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ScriptRecord {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub os: OsTag,
    pub category: Category,
    /// Absent in the source means empty, never null.
    #[serde(default)]
    pub tags: BTreeSet<String>,
    #[serde(default)]
    pub rating: f32,
    #[serde(default)]
    pub downloads: u64,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub created_at: u64,
    #[serde(default)]
    pub updated_at: u64,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub priority: Option<Priority>,
}

/// How a result list is ordered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    #[default]
    Relevance,
    Downloads,
    Rating,
    Newest,
    Alphabetical,
}

impl SortMode {
    pub const ALL: [SortMode; 5] = [
        SortMode::Relevance,
        SortMode::Downloads,
        SortMode::Rating,
        SortMode::Newest,
        SortMode::Alphabetical,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            SortMode::Relevance => "relevance",
            SortMode::Downloads => "downloads",
            SortMode::Rating => "rating",
            SortMode::Newest => "newest",
            SortMode::Alphabetical => "alphabetical",
        }
    }
}

impl FromStr for SortMode {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        SortMode::ALL
            .into_iter()
            .find(|m| m.slug() == wanted)
            .ok_or_else(|| ParseError::UnknownSortMode(s.to_string()))
    }
}

/// OS restriction on a query. `all` disables the filter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OsFilter {
    #[default]
    All,
    Only(OsTag),
}

impl FromStr for OsFilter {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(OsFilter::All);
        }
        s.parse().map(OsFilter::Only)
    }
}

/// Category restriction on a query. `all` disables the filter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl FromStr for CategoryFilter {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(CategoryFilter::All);
        }
        s.parse().map(CategoryFilter::Only)
    }
}

/// Minimum trimmed query length, in characters, before anything is matched.
pub const MIN_QUERY_CHARS: usize = 2;

/// A single search request. Superseded, never mutated, by the next one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchQuery {
    pub text: String,
    pub os: OsFilter,
    pub category: CategoryFilter,
    pub sort: SortMode,
    pub limit: usize,
}

impl SearchQuery {
    pub const DEFAULT_LIMIT: usize = 10;

    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            os: OsFilter::All,
            category: CategoryFilter::All,
            sort: SortMode::Relevance,
            limit: Self::DEFAULT_LIMIT,
        }
    }

    pub fn with_os(mut self, os: OsFilter) -> Self {
        self.os = os;
        self
    }

    pub fn with_category(mut self, category: CategoryFilter) -> Self {
        self.category = category;
        self
    }

    pub fn with_sort(mut self, sort: SortMode) -> Self {
        self.sort = sort;
        self
    }

    /// Panics on a zero cap: that is a caller bug, not a runtime condition.
    pub fn with_limit(mut self, limit: usize) -> Self {
        assert!(limit > 0, "result cap must be positive");
        self.limit = limit;
        self
    }

    /// Lowercased, trimmed query text, or `None` below the activation threshold.
    pub fn needle(&self) -> Option<String> {
        let trimmed = self.text.trim();
        if trimmed.chars().count() < MIN_QUERY_CHARS {
            return None;
        }
        Some(trimmed.to_lowercase())
    }
}

/// One ranked, highlighted hit.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchResult {
    pub record: ScriptRecord,
    /// 1-based position in the result list.
    pub rank: usize,
    pub title: Vec<Span>,
    pub description: Vec<Span>,
    /// One span list per tag, in the record's tag order.
    pub tags: Vec<Vec<Span>>,
}
