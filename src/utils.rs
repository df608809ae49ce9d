use anyhow::{anyhow, bail, Context, Result};
use move_core_types::identifier::Identifier;
use serde_json::Value;
use std::io::{self, Read};
use std::path::Path;
use std::str::FromStr;
use sui_types::base_types::{ObjectID, SuiAddress};

// =============================================================================
// Address Utilities
// =============================================================================

/// Normalize an address or object id to the full `0x` + 64 hex form.
///
/// Accepts short forms ("0x2", "2"). Empty input is rejected: an unset
/// identifier must not silently become `0x0`.
pub fn normalize_hex_id(s: &str) -> Result<String> {
    let s = s.trim().to_lowercase();
    let h = s.strip_prefix("0x").unwrap_or(&s);
    if h.is_empty() {
        bail!("empty object id or address");
    }
    if h.len() > 64 {
        bail!("address too long: {s}");
    }
    if !h.chars().all(|c| c.is_ascii_hexdigit()) {
        bail!("address is not hex: {s}");
    }
    Ok(format!("0x{:0>64}", h))
}

pub fn parse_object_id(s: &str) -> Result<ObjectID> {
    let normalized = normalize_hex_id(s).with_context(|| format!("parse object id {s:?}"))?;
    ObjectID::from_str(&normalized).with_context(|| format!("parse object id {s:?}"))
}

pub fn parse_sui_address(s: &str) -> Result<SuiAddress> {
    let normalized = normalize_hex_id(s).with_context(|| format!("parse address {s:?}"))?;
    SuiAddress::from_str(&normalized).with_context(|| format!("parse address {s:?}"))
}

pub fn parse_identifier(s: &str) -> Result<Identifier> {
    Identifier::new(s).map_err(|e| anyhow!("invalid identifier {s:?}: {e}"))
}

// =============================================================================
// Input Utilities
// =============================================================================

/// Read a JSON document from a file, or from stdin when the path is `-`.
///
/// Blank input is an error naming its source, so an empty pipe is not
/// reported as a JSON syntax error.
pub fn read_json(path: &Path) -> Result<Value> {
    let from_stdin = path.as_os_str() == "-";
    let source = if from_stdin {
        "stdin".to_string()
    } else {
        path.display().to_string()
    };
    let text = if from_stdin {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf).context("read stdin")?;
        buf
    } else {
        std::fs::read_to_string(path).with_context(|| format!("read {source}"))?
    };
    if text.trim().is_empty() {
        bail!("{source} is empty; expected a JSON document");
    }
    serde_json::from_str(&text).with_context(|| format!("parse JSON from {source}"))
}
