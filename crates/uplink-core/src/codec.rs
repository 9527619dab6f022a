//! Payload codec: raw uplink bytes to a JSON value tree.
//!
//! Each byte is taken as one character code (Latin-1 style), never as part of
//! a multi-byte UTF-8 sequence. The resulting text is then parsed as JSON.
//!
//! The grammar is serde_json's, which is stricter than a JavaScript
//! `JSON.parse` in two places: a `\uD800`-style escape for an unpaired
//! surrogate is rejected (Rust strings cannot hold one), and nesting deeper
//! than 128 levels is rejected. Both surface as [`DecodeError::Parse`].

use serde_json::Value;

use crate::error::{DecodeError, Result};

/// Turn payload bytes into text, one byte per character.
pub fn bytes_to_text(payload: &[u8]) -> String {
    payload.iter().map(|&b| char::from(b)).collect()
}

/// Parse already-decoded payload text as JSON.
pub fn parse_text(text: &str) -> Result<Value> {
    serde_json::from_str(text).map_err(|e| DecodeError::Parse(format!("Invalid JSON: {}", e)))
}

/// Decode a raw payload into a JSON value tree.
pub fn decode(payload: &[u8]) -> Result<Value> {
    parse_text(&bytes_to_text(payload))
}
