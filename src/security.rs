//! Password hashing. Only the bcrypt digest ever touches the database.

use anyhow::{bail, Context, Result};

/// bcrypt ignores everything past 72 bytes; cut explicitly so two secrets
/// sharing a 72-byte prefix behave identically under hash and verify.
const BCRYPT_MAX_BYTES: usize = 72;

fn truncate(secret: &str) -> &[u8] {
    let bytes = secret.as_bytes();
    &bytes[..bytes.len().min(BCRYPT_MAX_BYTES)]
}

/// Hash a raw secret into its salted stored form.
pub fn hash_password(secret: &str) -> Result<String> {
    if secret.is_empty() {
        bail!("password must not be empty");
    }
    bcrypt::hash(truncate(secret), bcrypt::DEFAULT_COST).context("hashing password")
}

/// Re-hash and compare. An undecodable stored form counts as a mismatch.
pub fn verify_password(secret: &str, stored: &str) -> bool {
    bcrypt::verify(truncate(secret), stored).unwrap_or(false)
}
