//! Watch-target registry.
//!
//! Built once at startup from a flat key/value listing (the process
//! environment in production) and never mutated afterwards. Every key whose
//! prefix matches `ethaddr_` (case-insensitive) contributes one target; the
//! key remainder becomes the target name and the trimmed value must be a
//! syntactically valid chain address. Malformed values are skipped with a
//! diagnostic, not an error; an empty registry is fatal.

use alloy_primitives::Address;

use crate::error::{EthGazeError, Result};

/// Default key prefix for address entries.
pub const DEFAULT_ENV_PREFIX: &str = "ethaddr_";

/// One named chain address configured for periodic observation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchTarget {
    /// Label name, taken from the listing key after the prefix.
    pub name: String,
    /// Parsed address, used for chain reads.
    pub address: Address,
    /// Address exactly as configured (post-trim), used for metric labels.
    pub address_text: String,
}

/// Parse a chain address: optional `0x`/`0X`, then exactly 40 hex digits.
pub fn parse_address(s: &str) -> Option<Address> {
    let digits = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    if digits.len() != 40 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let raw = hex::decode(digits).ok()?;
    Some(Address::from_slice(&raw))
}

/// Build the registry from a key/value listing, in listing order.
///
/// `prefix` is matched case-insensitively; pass [`DEFAULT_ENV_PREFIX`]
/// unless a test injects its own. Fails with a config error when zero valid
/// targets were found.
pub fn load_from_vars<I, K, V>(vars: I, prefix: &str) -> Result<Vec<WatchTarget>>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let prefix_lower = prefix.to_lowercase();
    let mut targets = Vec::new();

    for (key, value) in vars {
        let key = key.as_ref();
        if !key.to_lowercase().starts_with(&prefix_lower) {
            continue;
        }
        // Prefix is ASCII, so slicing the original key by its length is safe.
        let Some(name) = key.get(prefix.len()..) else {
            continue;
        };
        let value = value.as_ref().trim();
        match parse_address(value) {
            Some(address) => targets.push(WatchTarget {
                name: name.to_string(),
                address,
                address_text: value.to_string(),
            }),
            None => {
                tracing::debug!(key, value, "skipping entry with invalid address");
            }
        }
    }

    if targets.is_empty() {
        return Err(EthGazeError::Config(format!(
            "no addresses found in listing with prefix {prefix:?}"
        )));
    }
    Ok(targets)
}
