use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::error::{Error, Result};

use super::AvailabilityState;

/// URL fragment prefix of a share link.
pub const SHARE_PREFIX: &str = "#share=";

/// Encodes the state as base64 JSON.
pub fn encode_share(state: &AvailabilityState) -> Result<String> {
    let json = serde_json::to_string(state)?;
    Ok(STANDARD.encode(json))
}

/// The fragment to append to the page URL, `#share=<base64>`.
pub fn share_fragment(state: &AvailabilityState) -> Result<String> {
    Ok(format!("{SHARE_PREFIX}{}", encode_share(state)?))
}

/// Decodes a share string; accepts the bare payload, the fragment or a full link.
pub fn decode_share(input: &str) -> Result<AvailabilityState> {
    let input = input.trim();
    let encoded = match input.find(SHARE_PREFIX) {
        Some(pos) => &input[pos + SHARE_PREFIX.len()..],
        None => input.strip_prefix("share=").unwrap_or(input),
    };

    let bytes = STANDARD
        .decode(encoded)
        .map_err(|e| Error::ShareLink(e.to_string()))?;
    let json = String::from_utf8(bytes).map_err(|e| Error::ShareLink(e.to_string()))?;
    AvailabilityState::from_json(&json)
}
