pub mod fetch;
pub mod m3u;
pub mod title;

use thiserror::Error;

/// Per-source failure. Never aborts a resolve cycle; the failing source
/// contributes zero entries to that pass.
#[derive(Debug, Error)]
pub enum PlaylistError {
    #[error("network error: {0}")]
    Network(String),
    #[error("source returned HTTP {0}")]
    Status(u16),
    #[error("malformed playlist: {0}")]
    Parse(String),
}
