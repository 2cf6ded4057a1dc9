use regex::Regex;
use std::sync::LazyLock;

use vodhub_core::types::Quality;

/// Everything derived from one raw playlist title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTitle {
    /// Grouping key: normalized title, plus `|year` when a year is present.
    pub key: String,
    /// Cleaned title, suffixed with a parenthetical year when one exists.
    pub display_name: String,
    /// Cleaned title with all parenthetical segments stripped, for lookups.
    pub search_name: String,
    pub year: Option<String>,
    pub quality: Quality,
}

// First parenthesized 4-digit run: "Inception (2010) 1080p"
static RE_PAREN_YEAR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\((\d{4})\)").unwrap());

// Title text ahead of the year group; the year anchors the end of the title,
// so release tags trailing it are dropped with it.
static RE_TITLE_BEFORE_YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.*?)\s*\(\d{4}\)").unwrap());

// One parenthesized annotation, e.g. "(Director's Cut)".
static RE_PAREN_GROUP: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s*\([^)]*\)").unwrap());

/// Lowercase and keep only ASCII letters and digits.
///
/// Non-ASCII letters are dropped, not transliterated: two titles differing
/// only in accents collapse, but a fully non-Latin title normalizes to the
/// bare year key.
pub fn normalize(title: &str) -> String {
    title
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect()
}

/// First parenthesized 4-digit run, if any.
pub fn extract_year(title: &str) -> Option<String> {
    RE_PAREN_YEAR
        .captures(title)
        .map(|caps| caps[1].to_string())
}

/// Strip the year annotation (and its tail) plus at most one further
/// parenthesized group. Titles carrying two or more extra annotations keep
/// the later ones; that is accepted source behavior.
pub fn clean_title(title: &str) -> String {
    let base = match RE_TITLE_BEFORE_YEAR.captures(title) {
        Some(caps) => caps[1].to_string(),
        None => title.to_string(),
    };
    RE_PAREN_GROUP.replace(&base, "").trim().to_string()
}

/// Case-insensitive substring match in fixed priority order; first match wins.
pub fn classify_quality(title: &str) -> Quality {
    let lower = title.to_lowercase();
    if lower.contains("4k") || lower.contains("2160p") {
        Quality::FourK
    } else if lower.contains("1080p") {
        Quality::FullHd
    } else if lower.contains("720p") {
        Quality::Hd
    } else if lower.contains("480p") {
        Quality::Sd
    } else {
        Quality::Unknown
    }
}

/// Grouping key for a cleaned title. Two titles differing only in case or
/// punctuation collapse; two titles with different years never do.
pub fn grouping_key(clean: &str, year: Option<&str>) -> String {
    match year {
        Some(y) => format!("{}|{}", normalize(clean), y),
        None => normalize(clean),
    }
}

/// Stable byte-encoding of the grouping key. A pure function of the key:
/// resolving twice with unchanged sources yields identical ids.
pub fn movie_id(key: &str) -> String {
    hex::encode(key)
}

/// Derive key, display name, search name, year and quality from a raw title.
pub fn parse_title(raw: &str) -> ParsedTitle {
    let year = extract_year(raw);
    let clean = clean_title(raw);
    let quality = classify_quality(raw);
    let key = grouping_key(&clean, year.as_deref());
    let display_name = match &year {
        Some(y) => format!("{clean} ({y})"),
        None => clean.clone(),
    };
    let search_name = RE_PAREN_GROUP.replace_all(&clean, "").trim().to_string();

    ParsedTitle {
        key,
        display_name,
        search_name,
        year,
        quality,
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
