use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
use base64::Engine;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use vodhub_core::types::Source;

/// Decoded per-request configuration: which sources to aggregate and an
/// optional metadata API key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestConfig {
    pub sources: Vec<Source>,
    #[serde(default)]
    pub api_key: Option<String>,
}

/// Malformed configuration input. Surfaced to the caller as a client error
/// and short-circuits before any fetch.
#[derive(Debug, Error)]
pub enum ConfigDecodeError {
    #[error("invalid base64 config: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("config is not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("config contains no sources")]
    NoSources,
}

/// Decode a base64(JSON) configuration blob from the URL path.
///
/// URL-safe base64 is accepted with or without padding; the standard
/// alphabet is accepted as a fallback.
pub fn decode_config(raw: &str) -> Result<RequestConfig, ConfigDecodeError> {
    let bytes = URL_SAFE_NO_PAD
        .decode(raw.trim_end_matches('='))
        .or_else(|_| STANDARD.decode(raw))?;
    let json = String::from_utf8(bytes)?;
    let config: RequestConfig = serde_json::from_str(&json)?;

    if config.sources.is_empty() {
        return Err(ConfigDecodeError::NoSources);
    }
    Ok(config)
}

// ─── Tests ───────────────────────────────────────────────────────────────────
