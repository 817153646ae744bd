//! Entity identity: URL slugs and unique ids.
//!
//! Slugs are display-derived and regenerate whenever an item is renamed; ids
//! are assigned once at creation and never change. Image ids are the one
//! exception — they come out of the upload pipeline (content hash or
//! server-assigned filename), not from [`new_id`].

use unicode_normalization::UnicodeNormalization;
use uuid::Uuid;

/// Derive a URL-safe slug from a display name.
///
/// Deterministic and pure: decompose to NFD, drop combining marks, lowercase,
/// collapse every maximal run of characters outside `[a-z0-9]` to a single
/// hyphen, trim leading/trailing hyphens.
///
/// - `"Pikachu Premium"` → `"pikachu-premium"`
/// - `"Café à la crème"` → `"cafe-a-la-creme"`
/// - `"  -- "` → `""` (callers must treat an empty slug as an invalid name)
pub fn generate_slug(name: &str) -> String {
    let folded: String = name
        .nfd()
        .filter(|c| !unicode_normalization::char::is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase();

    folded
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|run| !run.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// Fresh unique identifier for items, detail blocks and detail entries.
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}
