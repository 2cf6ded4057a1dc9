//! M3U playlist parsing.
//!
//! Walks `#EXTINF:` lines: quoted attributes carry the logo and group label,
//! the text after the final comma is the display name, and the following
//! non-comment line is the stream URL.

use regex::Regex;
use std::sync::LazyLock;

use crate::PlaylistError;

/// One structured playlist entry. Ephemeral: consumed once by the merge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistEntry {
    pub name: String,
    pub url: String,
    pub logo: Option<String>,
    pub group: Option<String>,
}

// Quoted EXTINF attributes: tvg-logo="..." group-title="..."
static RE_ATTR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"([A-Za-z0-9-]+)="([^"]*)""#).unwrap());

/// Parse a raw playlist document into entries.
///
/// Entries without a URL line are skipped. Duplicate playlist lines yield
/// duplicate entries; there is no dedup by URL. A document with neither an
/// `#EXTM3U` header nor a single `#EXTINF` line is malformed.
pub fn parse(text: &str) -> Result<Vec<PlaylistEntry>, PlaylistError> {
    let lines: Vec<&str> = text.lines().collect();
    let mut entries = Vec::new();

    let mut i = 0;
    while i < lines.len() {
        let line = lines[i].trim();
        if let Some(info) = line.strip_prefix("#EXTINF:") {
            if let Some(entry) = parse_extinf(info, lines.get(i + 1).copied()) {
                entries.push(entry);
            }
            i += 2; // Skip the URL line
        } else {
            i += 1;
        }
    }

    if entries.is_empty() && !text.trim_start().starts_with("#EXTM3U") {
        return Err(PlaylistError::Parse("not an M3U playlist".into()));
    }

    Ok(entries)
}

fn parse_extinf(info: &str, url_line: Option<&str>) -> Option<PlaylistEntry> {
    let url = match url_line {
        Some(u) if !u.trim().is_empty() && !u.trim().starts_with('#') => u.trim().to_string(),
        _ => return None,
    };

    // #EXTINF:-1 tvg-logo="..." group-title="...",Display Name
    let (attrs, name) = match info.rfind(',') {
        Some(pos) => (&info[..pos], info[pos + 1..].trim()),
        None => return None,
    };
    if name.is_empty() {
        return None;
    }

    let mut logo = None;
    let mut group = None;
    for caps in RE_ATTR.captures_iter(attrs) {
        match &caps[1] {
            "tvg-logo" => logo = non_empty(&caps[2]),
            "group-title" => group = non_empty(&caps[2]),
            _ => {}
        }
    }

    Some(PlaylistEntry {
        name: name.to_string(),
        url,
        logo,
        group,
    })
}

fn non_empty(s: &str) -> Option<String> {
    let s = s.trim();
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
