use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Converts a display name into a stable identifier.
///
/// Lowercases the input, collapses every run of characters outside
/// `[a-z0-9]` into a single `_`, and trims leading/trailing underscores.
/// Idempotent: `slugify(slugify(x)) == slugify(x)`. Not globally unique on
/// its own; callers minting ids combine the slug with a nonce.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_separator = false;
    for c in text.chars() {
        let c = c.to_ascii_lowercase();
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_separator && !slug.is_empty() {
                slug.push('_');
            }
            slug.push(c);
            pending_separator = false;
        } else {
            pending_separator = true;
        }
    }
    slug
}

/// Mints a new definition id from a display name.
///
/// The UUIDv7 suffix keeps ids time-ordered while staying unique under
/// rapid batch building, where raw creation-millis suffixes collide.
pub fn definition_id(name: &str) -> String {
    format!("compound_{}_{}", slugify(name), Uuid::now_v7().simple())
}

/// Unix-epoch milliseconds, used for `createdAt`/`updatedAt` stamps.
pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
