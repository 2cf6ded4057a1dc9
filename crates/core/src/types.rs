use serde::{Deserialize, Serialize};

/// A named remote playlist document to aggregate.
///
/// The ordered sequence of sources is the identity of a configuration:
/// the playlist cache is keyed by it, order included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub url: String,
    pub name: String,
}

/// Stream quality detected from a raw playlist title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quality {
    FourK,
    FullHd,
    Hd,
    Sd,
    Unknown,
}

impl Quality {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FourK => "4K",
            Self::FullHd => "1080p",
            Self::Hd => "720p",
            Self::Sd => "SD",
            Self::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for Quality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One playable stream attached to a movie. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamEntry {
    /// Quality and source name, with the entry's group label on a second line.
    pub label: String,
    pub url: String,
    pub source_name: String,
    /// Whether the URL looks directly playable (points at a file container).
    pub playable: bool,
}

/// Canonical movie aggregate produced by the merge.
///
/// Records are rebuilt wholesale on every cache refresh; `id` stays stable
/// across rebuilds because it derives from the grouping key alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieRecord {
    pub id: String,
    pub display_name: String,
    /// Title with parenthetical segments stripped, used for external lookups.
    pub search_name: String,
    /// 4-digit year, when one was present in the title.
    pub year: Option<String>,
    pub poster: Option<String>,
    pub background: Option<String>,
    pub genres: Vec<String>,
    pub streams: Vec<StreamEntry>,
    pub description: Option<String>,
    /// Set by enrichment only, formatted to one decimal place.
    pub rating: Option<String>,
}

impl MovieRecord {
    pub fn summary(&self) -> MovieSummary {
        MovieSummary {
            id: self.id.clone(),
            display_name: self.display_name.clone(),
            poster: self.poster.clone(),
            year: self.year.clone(),
        }
    }
}

/// Reduced projection for catalog listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieSummary {
    pub id: String,
    pub display_name: String,
    pub poster: Option<String>,
    pub year: Option<String>,
}
