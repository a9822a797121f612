//! Magnet link parsing.
//!
//! Extracts the btih info-hash and display name locally so duplicates can
//! be rejected before the engine is involved. Hex hashes are normalized to
//! lowercase, base32 hashes to uppercase.

use anyhow::{bail, Context, Result};
use url::Url;

/// Parsed magnet link. `uri` keeps the original string so the engine can
/// be handed the full link (trackers included) later.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Magnet {
    pub info_hash: String,
    pub display_name: Option<String>,
    pub uri: String,
}

/// Parse a magnet URI, validating the btih exact-topic hash.
pub fn parse(uri: &str) -> Result<Magnet> {
    let url = Url::parse(uri).context("not a valid URI")?;
    if url.scheme() != "magnet" {
        bail!("expected magnet scheme, got {:?}", url.scheme());
    }

    let mut info_hash = None;
    let mut display_name = None;
    for (key, value) in url.query_pairs() {
        match key.as_ref() {
            "xt" => {
                if let Some(hash) = value.strip_prefix("urn:btih:") {
                    info_hash = Some(normalize_btih(hash)?);
                }
            }
            "dn" => {
                if !value.is_empty() {
                    display_name = Some(value.into_owned());
                }
            }
            _ => {}
        }
    }

    let info_hash = info_hash.context("magnet link has no btih exact topic")?;
    Ok(Magnet {
        info_hash,
        display_name,
        uri: uri.to_string(),
    })
}

/// Validate a btih hash: 40 hex chars (normalized lowercase) or 32 base32
/// chars (normalized uppercase).
fn normalize_btih(hash: &str) -> Result<String> {
    match hash.len() {
        40 => {
            let lower = hash.to_ascii_lowercase();
            hex::decode(&lower).context("info hash is not valid hex")?;
            Ok(lower)
        }
        32 => {
            let upper = hash.to_ascii_uppercase();
            if !upper
                .chars()
                .all(|c| matches!(c, 'A'..='Z' | '2'..='7'))
            {
                bail!("info hash is not valid base32");
            }
            Ok(upper)
        }
        n => bail!("info hash has unexpected length {n}"),
    }
}
