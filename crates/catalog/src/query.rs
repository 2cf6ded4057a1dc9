use vodhub_core::types::MovieRecord;

/// Listing cap, applied only when no search term is active.
pub const LIST_CAP: usize = 100;

/// Filters supplied by the routing layer.
#[derive(Debug, Clone, Default)]
pub struct CatalogQuery {
    pub search: Option<String>,
    pub genre: Option<String>,
}

/// Filter, sort and cap a merged collection for listing.
///
/// Applied after merge on every request; never baked into cached data.
/// Search is a case-insensitive substring match on the display name, genre
/// is exact membership, and ordering is by descending year with records
/// lacking a year treated as year 0 (sorted last).
pub fn apply(records: Vec<MovieRecord>, query: &CatalogQuery) -> Vec<MovieRecord> {
    let search = query
        .search
        .as_deref()
        .map(str::to_lowercase)
        .filter(|s| !s.is_empty());
    let genre = query.genre.as_deref().filter(|g| !g.is_empty());

    let mut out: Vec<MovieRecord> = records
        .into_iter()
        .filter(|m| match &search {
            Some(s) => m.display_name.to_lowercase().contains(s.as_str()),
            None => true,
        })
        .filter(|m| match genre {
            Some(g) => m.genres.iter().any(|have| have == g),
            None => true,
        })
        .collect();

    out.sort_by_key(|m| std::cmp::Reverse(sort_year(m)));

    if search.is_none() {
        out.truncate(LIST_CAP);
    }
    out
}

fn sort_year(m: &MovieRecord) -> i32 {
    m.year.as_deref().and_then(|y| y.parse().ok()).unwrap_or(0)
}

// ─── Tests ───────────────────────────────────────────────────────────────────
