//! Movie merge engine.
//!
//! Folding rules:
//! 1. Entries collapse by grouping key; exactly one record per key.
//! 2. The first entry observed for a key, in configured source order, wins
//!    all display metadata (poster, background, genres, base description).
//! 3. Later duplicates only append streams.

use std::collections::HashMap;

use vodhub_core::types::{MovieRecord, Source, StreamEntry};
use vodhub_playlist::m3u::PlaylistEntry;
use vodhub_playlist::title::{self, ParsedTitle};

static DIRECT_FILE_EXTENSIONS: &[&str] = &["mp4", "mkv", "avi", "webm", "mov", "m3u8"];

/// Fold per-source entries into canonical movie records.
///
/// Runs single-threaded over already-collected results, in slice order, so
/// the winner for a key is decided by configured source order and never by
/// fetch completion order. Output order is first-seen order.
pub fn merge_sources(results: &[(Source, Vec<PlaylistEntry>)]) -> Vec<MovieRecord> {
    let mut by_key: HashMap<String, usize> = HashMap::new();
    let mut records: Vec<MovieRecord> = Vec::new();

    for (source, entries) in results {
        for entry in entries {
            let parsed = title::parse_title(&entry.name);
            let stream = stream_entry(&parsed, entry, source);

            match by_key.get(&parsed.key) {
                Some(&idx) => records[idx].streams.push(stream),
                None => {
                    by_key.insert(parsed.key.clone(), records.len());
                    records.push(new_record(parsed, entry, stream));
                }
            }
        }
    }

    records
}

/// Seed a record from the first entry sighted for its key.
fn new_record(parsed: ParsedTitle, entry: &PlaylistEntry, stream: StreamEntry) -> MovieRecord {
    MovieRecord {
        id: title::movie_id(&parsed.key),
        display_name: parsed.display_name,
        search_name: parsed.search_name,
        year: parsed.year,
        poster: entry.logo.clone(),
        background: entry.logo.clone(),
        genres: entry.group.clone().into_iter().collect(),
        streams: vec![stream],
        description: Some(format!("Quality: {}", parsed.quality)),
        rating: None,
    }
}

fn stream_entry(parsed: &ParsedTitle, entry: &PlaylistEntry, source: &Source) -> StreamEntry {
    let mut label = format!("{} • {}", parsed.quality, source.name);
    if let Some(group) = &entry.group {
        label.push('\n');
        label.push_str(group);
    }

    StreamEntry {
        label,
        url: entry.url.clone(),
        source_name: source.name.clone(),
        playable: is_direct_file(&entry.url),
    }
}

fn is_direct_file(url: &str) -> bool {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    match path.rsplit('.').next() {
        Some(ext) => DIRECT_FILE_EXTENSIONS.contains(&ext.to_lowercase().as_str()),
        None => false,
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn source(name: &str) -> Source {
        Source {
            url: format!("http://playlists/{name}.m3u"),
            name: name.to_string(),
        }
    }

    fn entry(name: &str, url: &str, logo: Option<&str>, group: Option<&str>) -> PlaylistEntry {
        PlaylistEntry {
            name: name.to_string(),
            url: url.to_string(),
            logo: logo.map(String::from),
            group: group.map(String::from),
        }
    }

    #[test]
    fn duplicate_titles_across_sources_collapse() {
        let results = vec![
            (
                source("alpha"),
                vec![entry(
                    "Inception (2010) 1080p",
                    "http://a/inception.mp4",
                    Some("http://a/inception.png"),
                    Some("Sci-Fi"),
                )],
            ),
            (
                source("beta"),
                vec![entry(
                    "INCEPTION (2010) [4K]",
                    "http://b/inception.mkv",
                    Some("http://b/other.png"),
                    Some("Movies"),
                )],
            ),
        ];

        let merged = merge_sources(&results);
        assert_eq!(merged.len(), 1);

        let movie = &merged[0];
        assert_eq!(movie.id, title::movie_id("inception|2010"));
        assert_eq!(movie.display_name, "Inception (2010)");
        assert_eq!(movie.year.as_deref(), Some("2010"));
        assert_eq!(movie.streams.len(), 2);
        assert!(movie.streams[0].label.starts_with("1080p"));
        assert!(movie.streams[1].label.starts_with("4K"));
    }

    #[test]
    fn first_source_wins_display_metadata() {
        let results = vec![
            (
                source("alpha"),
                vec![entry(
                    "Heat (1995)",
                    "http://a/heat.mp4",
                    Some("http://a/heat.png"),
                    Some("Crime"),
                )],
            ),
            (
                source("beta"),
                vec![entry(
                    "Heat (1995)",
                    "http://b/heat.mp4",
                    Some("http://b/heat.png"),
                    Some("Thriller"),
                )],
            ),
        ];

        let merged = merge_sources(&results);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].poster.as_deref(), Some("http://a/heat.png"));
        assert_eq!(merged[0].genres, vec!["Crime".to_string()]);
        // Both streams kept, in source order.
        assert_eq!(merged[0].streams[0].source_name, "alpha");
        assert_eq!(merged[0].streams[1].source_name, "beta");
    }

    #[test]
    fn different_years_stay_distinct() {
        let results = vec![(
            source("alpha"),
            vec![
                entry("Dune (1984)", "http://a/dune84.mp4", None, None),
                entry("Dune (2021)", "http://a/dune21.mp4", None, None),
            ],
        )];

        let merged = merge_sources(&results);
        assert_eq!(merged.len(), 2);
        assert_ne!(merged[0].id, merged[1].id);
    }

    #[test]
    fn ids_stable_across_re_merge() {
        let results = vec![(
            source("alpha"),
            vec![entry("Heat (1995) 720p", "http://a/heat.mp4", None, None)],
        )];

        let first = merge_sources(&results);
        let second = merge_sources(&results);
        assert_eq!(first[0].id, second[0].id);
    }

    #[test]
    fn duplicate_lines_from_one_source_append_duplicate_streams() {
        let e = entry("Heat (1995)", "http://a/heat.mp4", None, None);
        let results = vec![(source("alpha"), vec![e.clone(), e])];

        let merged = merge_sources(&results);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].streams.len(), 2);
        assert_eq!(merged[0].streams[0].url, merged[0].streams[1].url);
    }

    #[test]
    fn stream_label_carries_group_on_second_line() {
        let results = vec![(
            source("alpha"),
            vec![entry(
                "Heat (1995) 720p",
                "http://a/heat.mp4",
                None,
                Some("Crime"),
            )],
        )];

        let merged = merge_sources(&results);
        assert_eq!(merged[0].streams[0].label, "720p • alpha\nCrime");
    }

    #[test]
    fn base_description_reflects_quality() {
        let results = vec![(
            source("alpha"),
            vec![entry("Heat (1995) 4K", "http://a/heat.ts", None, None)],
        )];

        let merged = merge_sources(&results);
        assert_eq!(merged[0].description.as_deref(), Some("Quality: 4K"));
    }

    #[test]
    fn playable_hint_from_url_extension() {
        assert!(is_direct_file("http://a/movie.mp4"));
        assert!(is_direct_file("http://a/movie.MKV?token=abc"));
        assert!(!is_direct_file("http://a/live/stream/12345"));
        assert!(!is_direct_file("http://a/movie.ts"));
    }
}
