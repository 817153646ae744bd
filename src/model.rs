//! Core data model for a showcase collection.
//!
//! These types are the single serialized representation: the local storage
//! blob, the remote API bodies, and the import/export format are all the same
//! camelCase JSON, so a collection can move between backends byte-for-byte.
//!
//! Ownership is strictly hierarchical: a [`ShowcaseData`] owns its items, an
//! item owns its images and detail blocks, a block owns its entries. Deleting
//! a parent drops everything it contains — there is no orphan cleanup pass.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Root aggregate; exactly one instance per collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowcaseData {
    /// Collection title shown on the gallery page.
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub items: Vec<ShowcaseItem>,
    /// Refreshed whenever the collection-level state changes
    /// (metadata update, import).
    pub generated_at: DateTime<Utc>,
}

impl Default for ShowcaseData {
    fn default() -> Self {
        Self {
            title: "My Collection".to_string(),
            description: None,
            items: Vec::new(),
            generated_at: Utc::now(),
        }
    }
}

impl ShowcaseData {
    /// Look up an item by id.
    pub fn find_item(&self, id: &str) -> Option<&ShowcaseItem> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Look up an item by id, mutably.
    pub fn find_item_mut(&mut self, id: &str) -> Option<&mut ShowcaseItem> {
        self.items.iter_mut().find(|i| i.id == id)
    }
}

/// A single entry in the collection.
///
/// `slug` is derived from `name` ([`crate::ident::generate_slug`]) and
/// regenerated whenever the name changes. Slug uniqueness across items is
/// not enforced — two identically named items will share a slug.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowcaseItem {
    pub id: String,
    pub slug: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Unique values, insertion order preserved. Case-sensitive.
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub images: Vec<ItemImage>,
    #[serde(default)]
    pub details: Vec<DetailBlock>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ShowcaseItem {
    /// Images sorted by position ascending. The stored order is already
    /// position-sorted after any reorder, but uploads and imports may
    /// interleave, so display paths sort defensively.
    pub fn sorted_images(&self) -> Vec<&ItemImage> {
        let mut sorted: Vec<&ItemImage> = self.images.iter().collect();
        sorted.sort_by_key(|img| img.position);
        sorted
    }
}

/// An image owned by exactly one item.
///
/// `id` is either a content hash of the uploaded bytes (inline mode) or the
/// server-assigned filename (remote mode). `src` is correspondingly a data
/// URI or a URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemImage {
    pub id: String,
    pub src: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    /// Display order among siblings. Contiguous ascending from the
    /// configured base after any reorder.
    pub position: u32,
}

/// A titled group of label/value pairs describing item attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailBlock {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub items: Vec<DetailItem>,
}

/// One label/value pair inside a detail block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailItem {
    pub id: String,
    pub label: String,
    pub value: String,
}

/// Caller-provided fields for a new item. Identity, slug and timestamps are
/// synthesized by the store.
#[derive(Debug, Clone, Default)]
pub struct ItemDraft {
    pub name: String,
    pub subtitle: Option<String>,
    pub brand: Option<String>,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub images: Vec<ItemImage>,
    pub details: Vec<DetailBlock>,
}

/// Partial update with merge semantics: `Some` fields overwrite, `None`
/// fields persist. A name change triggers slug regeneration in the store.
#[derive(Debug, Clone, Default)]
pub struct ItemPatch {
    pub name: Option<String>,
    pub subtitle: Option<String>,
    pub brand: Option<String>,
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,
    pub images: Option<Vec<ItemImage>>,
    pub details: Option<Vec<DetailBlock>>,
}

impl ItemPatch {
    /// True when no field is set — applying would be a pure
    /// `updatedAt` refresh.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.subtitle.is_none()
            && self.brand.is_none()
            && self.description.is_none()
            && self.tags.is_none()
            && self.images.is_none()
            && self.details.is_none()
    }
}
