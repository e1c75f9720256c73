//! Change detection for resolved configs.
//!
//! The build pipeline can skip work when the config hasn't changed since its
//! last run. The fingerprint is a SHA-256 over the compact JSON form of the
//! resolved config, so it changes only when the resolved value does:
//! reformatting the TOML, reordering keys, or writing `docs` instead of
//! `/docs/` leaves it unchanged, while reordering plugins does not.

use crate::config::SiteConfig;
use sha2::{Digest, Sha256};

/// Bump to invalidate every stored fingerprint when the output shape changes.
const FINGERPRINT_VERSION: u32 = 1;

/// SHA-256 of the resolved config, returned as a hex string.
pub fn fingerprint(config: &SiteConfig) -> Result<String, serde_json::Error> {
    let json = serde_json::to_vec(config)?;
    let mut hasher = Sha256::new();
    hasher.update(b"docsite\0");
    hasher.update(FINGERPRINT_VERSION.to_le_bytes());
    hasher.update(&json);
    Ok(format!("{:x}", hasher.finalize()))
}
