//! CLI output formatting for the admin commands.
//!
//! # Information-First Display
//!
//! Output is information-centric: the primary display for every entity
//! (item, image, detail block) is its semantic identity — positional index
//! plus name — with storage identifiers shown as secondary context in
//! parentheses or indented lines. The list reads as a collection inventory
//! while still letting users copy the ids that commands take.
//!
//! # Output Format
//!
//! ## List
//!
//! ```text
//! Ma Collection (2 items)
//!     Collection personnelle de kigurumi
//!
//! 001 Pikachu Premium [pikachu-premium]
//!     Brand: SAZAC
//!     Tags: Pokémon, Hiver
//!     3 images, 2 detail blocks
//! ```
//!
//! ## Show
//!
//! ```text
//! Pikachu Premium [pikachu-premium]
//!     Id: 1c3d…
//!     Subtitle: Édition collector
//!     Tags: Pokémon, Hiver
//!     Images
//!     001 Vue de face (a41bc2…, inline, 45 KB)
//!     Details
//!     Caractéristiques
//!         Matière: Polaire
//! ```
//!
//! # Architecture
//!
//! Each view has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure — no I/O, no side effects.

use crate::model::{ItemImage, ShowcaseData, ShowcaseItem};

// ============================================================================
// Shared entity display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Entity header: positional index + name + slug.
///
/// ```text
/// 001 Pikachu Premium [pikachu-premium]
/// ```
fn entity_header(index: usize, name: &str, slug: &str) -> String {
    format!("{} {} [{}]", format_index(index), name, slug)
}

/// One image line: alt text is the identity, id and storage form are
/// secondary context.
///
/// ```text
/// 001 Vue de face (a41bc2…, inline, 45 KB)
/// 002 (img-2.png, http://host/img/img-2.png)
/// ```
fn image_line(index: usize, image: &ItemImage) -> String {
    let id_short: String = image.id.chars().take(8).collect();
    let source = describe_src(&image.src);
    match image.alt.as_deref() {
        Some(alt) if !alt.is_empty() => {
            format!("{} {} ({id_short}…, {source})", format_index(index), alt)
        }
        _ => format!("{} ({id_short}…, {source})", format_index(index)),
    }
}

/// Compact description of an image reference: inline payloads show their
/// approximate decoded size, URLs pass through.
fn describe_src(src: &str) -> String {
    match src.strip_prefix("data:") {
        Some(rest) => {
            let payload = rest.split_once("base64,").map(|(_, p)| p).unwrap_or("");
            // 4 base64 chars ≈ 3 bytes
            let kb = payload.len() * 3 / 4 / 1024;
            format!("inline, {kb} KB")
        }
        None => src.to_string(),
    }
}

// ============================================================================
// Collection list
// ============================================================================

pub fn format_collection(data: &ShowcaseData) -> Vec<String> {
    let mut lines = Vec::new();

    let count = data.items.len();
    let noun = if count == 1 { "item" } else { "items" };
    lines.push(format!("{} ({count} {noun})", data.title));
    if let Some(description) = &data.description {
        lines.push(format!("{}{}", indent(1), description));
    }

    for (pos, item) in data.items.iter().enumerate() {
        lines.push(String::new());
        lines.push(entity_header(pos + 1, &item.name, &item.slug));
        if let Some(brand) = &item.brand {
            lines.push(format!("{}Brand: {brand}", indent(1)));
        }
        if !item.tags.is_empty() {
            lines.push(format!("{}Tags: {}", indent(1), item.tags.join(", ")));
        }
        lines.push(format!(
            "{}{} images, {} detail blocks",
            indent(1),
            item.images.len(),
            item.details.len()
        ));
    }

    lines
}

pub fn print_collection(data: &ShowcaseData) {
    for line in format_collection(data) {
        println!("{}", line);
    }
}

// ============================================================================
// Single item
// ============================================================================

pub fn format_item(item: &ShowcaseItem) -> Vec<String> {
    let mut lines = vec![
        format!("{} [{}]", item.name, item.slug),
        format!("{}Id: {}", indent(1), item.id),
    ];

    if let Some(subtitle) = &item.subtitle {
        lines.push(format!("{}Subtitle: {subtitle}", indent(1)));
    }
    if let Some(brand) = &item.brand {
        lines.push(format!("{}Brand: {brand}", indent(1)));
    }
    if let Some(description) = &item.description {
        lines.push(format!("{}Description: {description}", indent(1)));
    }
    if !item.tags.is_empty() {
        lines.push(format!("{}Tags: {}", indent(1), item.tags.join(", ")));
    }
    lines.push(format!(
        "{}Created: {} · Updated: {}",
        indent(1),
        item.created_at.format("%Y-%m-%d %H:%M"),
        item.updated_at.format("%Y-%m-%d %H:%M")
    ));

    if !item.images.is_empty() {
        lines.push(format!("{}Images", indent(1)));
        for (pos, image) in item.sorted_images().iter().enumerate() {
            lines.push(format!("{}{}", indent(1), image_line(pos + 1, image)));
        }
    }

    if !item.details.is_empty() {
        lines.push(format!("{}Details", indent(1)));
        for block in &item.details {
            lines.push(format!("{}{} ({})", indent(1), block.title, block.id));
            for entry in &block.items {
                lines.push(format!(
                    "{}{}: {} ({})",
                    indent(2),
                    entry.label,
                    entry.value,
                    entry.id
                ));
            }
        }
    }

    lines
}

pub fn print_item(item: &ShowcaseItem) {
    for line in format_item(item) {
        println!("{}", line);
    }
}

// ============================================================================
// Batch upload report
// ============================================================================

/// One line per processed file; failures are reported in place without
/// interrupting the sequence.
///
/// ```text
/// 001 front.jpg: added at position 3
/// 002 front-copy.jpg: duplicate image: already attached to this item
/// ```
pub fn format_upload_report(results: &[(String, Result<u32, String>)]) -> Vec<String> {
    results
        .iter()
        .enumerate()
        .map(|(pos, (file, outcome))| match outcome {
            Ok(position) => format!(
                "{} {file}: added at position {position}",
                format_index(pos + 1)
            ),
            Err(reason) => format!("{} {file}: {reason}", format_index(pos + 1)),
        })
        .collect()
}

pub fn print_upload_report(results: &[(String, Result<u32, String>)]) {
    for line in format_upload_report(results) {
        println!("{}", line);
    }
}
