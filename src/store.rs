//! The showcase store: one mutable view of the collection plus its backend.
//!
//! [`ShowcaseStore`] is an explicit context object — callers construct it
//! from a [`StorageBackend`] and pass it around; there is no global state.
//! Every mutating operation follows the same discipline:
//!
//! 1. build the post-mutation state on a scratch copy,
//! 2. persist it (one backend call, no batching),
//! 3. commit the scratch copy to memory only if the persist succeeded.
//!
//! A failed persist therefore never corrupts the in-memory state: the store
//! still holds exactly what it held before the operation, and the caller
//! gets the failure as an explicit error. No operation retries; a retry is
//! the user re-running the command.
//!
//! Coarse CRUD (`create_item`, `update_item`, `delete_item`, metadata,
//! import/export) is complemented by fine-grained operations on tags,
//! images and detail blocks; every fine-grained mutation refreshes the
//! owning item's `updatedAt` and persists as an item update.

use crate::ident::{generate_slug, new_id};
use crate::model::{
    DetailBlock, DetailItem, ItemDraft, ItemImage, ItemPatch, ShowcaseData, ShowcaseItem,
};
use crate::reorder::reorder;
use crate::storage::{Change, StorageBackend, StorageError};
use chrono::Utc;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("invalid showcase JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

pub struct ShowcaseStore {
    data: ShowcaseData,
    backend: Box<dyn StorageBackend>,
}

impl ShowcaseStore {
    /// A store starts on the default empty collection; call [`load`] to
    /// hydrate it from the backend.
    ///
    /// [`load`]: ShowcaseStore::load
    pub fn new(backend: Box<dyn StorageBackend>) -> Self {
        Self {
            data: ShowcaseData::default(),
            backend,
        }
    }

    /// Refresh state from the backend. On failure the current state is
    /// kept untouched and the error is returned for the caller to report.
    pub fn load(&mut self) -> Result<(), StoreError> {
        match self.backend.load() {
            Ok(data) => {
                info!(items = data.items.len(), "showcase loaded");
                self.data = data;
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "load failed, keeping current state");
                Err(err.into())
            }
        }
    }

    pub fn data(&self) -> &ShowcaseData {
        &self.data
    }

    pub fn get_item(&self, id: &str) -> Option<&ShowcaseItem> {
        self.data.find_item(id)
    }

    /// Resolve a CLI-friendly key: exact id first, then first slug match.
    pub fn resolve(&self, key: &str) -> Option<&ShowcaseItem> {
        self.data
            .find_item(key)
            .or_else(|| self.data.items.iter().find(|i| i.slug == key))
    }

    pub fn backend_description(&self) -> String {
        self.backend.describe()
    }

    // =========================================================================
    // Coarse CRUD
    // =========================================================================

    /// Create an item from a draft: id, slug and timestamps are synthesized
    /// here. Name validity (non-empty) is the caller's responsibility.
    pub fn create_item(&mut self, draft: ItemDraft) -> Result<ShowcaseItem, StoreError> {
        let now = Utc::now();
        let item = ShowcaseItem {
            id: new_id(),
            slug: generate_slug(&draft.name),
            name: draft.name,
            subtitle: draft.subtitle,
            brand: draft.brand,
            description: draft.description,
            tags: dedupe_tags(draft.tags),
            images: draft.images,
            details: draft.details,
            created_at: now,
            updated_at: now,
        };

        let mut next = self.data.clone();
        next.items.push(item.clone());
        self.backend.persist(&next, &Change::ItemCreated(&item))?;
        self.data = next;
        debug!(id = %item.id, slug = %item.slug, "item created");
        Ok(item)
    }

    /// Merge a partial update into the item: `Some` fields overwrite,
    /// `None` fields persist. An empty string clears an optional field.
    /// A name change regenerates the slug; `updatedAt` always refreshes.
    pub fn update_item(&mut self, id: &str, patch: ItemPatch) -> Result<ShowcaseItem, StoreError> {
        let mut next = self.data.clone();
        let Some(item) = next.find_item_mut(id) else {
            return Err(StoreError::NotFound(format!("item {id}")));
        };

        if let Some(name) = patch.name {
            item.slug = generate_slug(&name);
            item.name = name;
        }
        if let Some(subtitle) = patch.subtitle {
            item.subtitle = non_empty(subtitle);
        }
        if let Some(brand) = patch.brand {
            item.brand = non_empty(brand);
        }
        if let Some(description) = patch.description {
            item.description = non_empty(description);
        }
        if let Some(tags) = patch.tags {
            item.tags = dedupe_tags(tags);
        }
        if let Some(images) = patch.images {
            item.images = images;
        }
        if let Some(details) = patch.details {
            item.details = details;
        }
        item.updated_at = Utc::now();

        let updated = item.clone();
        self.backend.persist(&next, &Change::ItemUpdated(&updated))?;
        self.data = next;
        debug!(id = %updated.id, "item updated");
        Ok(updated)
    }

    /// Idempotent delete: removing an absent id is `Ok(false)`, not an
    /// error, and skips the persist. Contained images and detail blocks
    /// go with the item — they are exclusively owned.
    pub fn delete_item(&mut self, id: &str) -> Result<bool, StoreError> {
        if self.data.find_item(id).is_none() {
            debug!(id, "delete of absent item is a no-op");
            return Ok(false);
        }

        let mut next = self.data.clone();
        next.items.retain(|item| item.id != id);
        self.backend.persist(&next, &Change::ItemDeleted(id))?;
        self.data = next;
        debug!(id, "item deleted");
        Ok(true)
    }

    /// Replace the collection title/description and refresh `generatedAt`.
    pub fn update_metadata(
        &mut self,
        title: String,
        description: Option<String>,
    ) -> Result<(), StoreError> {
        let mut next = self.data.clone();
        next.title = title;
        next.description = description;
        next.generated_at = Utc::now();
        self.backend.persist(&next, &Change::MetadataUpdated)?;
        self.data = next;
        Ok(())
    }

    /// Serialize the full collection as pretty JSON. Pure.
    pub fn export_data(&self) -> Result<String, StoreError> {
        Ok(serde_json::to_string_pretty(&self.data)?)
    }

    /// Wholesale-replace the collection from exported JSON.
    ///
    /// A parse failure (or a failed persist) leaves the current state
    /// exactly as it was. On success `generatedAt` advances.
    pub fn import_data(&mut self, text: &str) -> Result<(), StoreError> {
        let mut imported: ShowcaseData = serde_json::from_str(text)?;
        imported.generated_at = Utc::now();
        self.backend.persist(&imported, &Change::Imported)?;
        info!(items = imported.items.len(), "showcase imported");
        self.data = imported;
        Ok(())
    }

    // =========================================================================
    // Tags
    // =========================================================================

    /// Append a tag. Returns `false` (without persisting) when the trimmed
    /// tag is empty or already present — tags are unique per item,
    /// case-sensitive, insertion-ordered.
    pub fn add_tag(&mut self, id: &str, tag: &str) -> Result<bool, StoreError> {
        let tag = tag.trim().to_string();
        let item = self.required(id)?;
        if tag.is_empty() || item.tags.contains(&tag) {
            return Ok(false);
        }
        self.mutate_item(id, |item| {
            item.tags.push(tag);
            Ok(())
        })?;
        Ok(true)
    }

    /// Remove a tag by exact value. Absent tag is `Ok(false)`, no persist.
    pub fn remove_tag(&mut self, id: &str, tag: &str) -> Result<bool, StoreError> {
        let item = self.required(id)?;
        if !item.tags.iter().any(|t| t == tag) {
            return Ok(false);
        }
        self.mutate_item(id, |item| {
            item.tags.retain(|t| t != tag);
            Ok(())
        })?;
        Ok(true)
    }

    // =========================================================================
    // Images
    // =========================================================================

    /// Attach an image produced by the upload pipeline
    /// ([`crate::images::process_upload`] has already deduplicated it and
    /// assigned its position).
    pub fn add_image(&mut self, id: &str, image: ItemImage) -> Result<(), StoreError> {
        self.mutate_item(id, |item| {
            item.images.push(image);
            Ok(())
        })
    }

    pub fn get_image(&self, id: &str, image_id: &str) -> Option<&ItemImage> {
        self.data
            .find_item(id)?
            .images
            .iter()
            .find(|img| img.id == image_id)
    }

    /// Detach an image. Absent image id is `Ok(false)`, no persist.
    /// Backend-side cleanup (remote file deletion) is the caller's step,
    /// taken *before* this one so a failed cleanup aborts the mutation.
    pub fn remove_image(&mut self, id: &str, image_id: &str) -> Result<bool, StoreError> {
        let item = self.required(id)?;
        if !item.images.iter().any(|img| img.id == image_id) {
            return Ok(false);
        }
        self.mutate_item(id, |item| {
            item.images.retain(|img| img.id != image_id);
            Ok(())
        })?;
        Ok(true)
    }

    /// Replace an image's alt text; empty clears it.
    pub fn set_image_alt(&mut self, id: &str, image_id: &str, alt: &str) -> Result<(), StoreError> {
        let alt = non_empty(alt.to_string());
        self.mutate_item(id, |item| {
            let Some(image) = item.images.iter_mut().find(|img| img.id == image_id) else {
                return Err(StoreError::NotFound(format!("image {image_id}")));
            };
            image.alt = alt;
            Ok(())
        })
    }

    /// Move the image at display index `from` to `to` (indices into the
    /// position-sorted order) and renumber contiguously from `base`.
    /// Out-of-range indices are clamped into range.
    pub fn move_image(
        &mut self,
        id: &str,
        from: usize,
        to: usize,
        base: u32,
    ) -> Result<(), StoreError> {
        self.mutate_item(id, |item| {
            if item.images.is_empty() {
                return Err(StoreError::NotFound(format!("images of item {id}")));
            }
            let mut sorted = item.images.clone();
            sorted.sort_by_key(|img| img.position);
            let last = sorted.len() - 1;
            item.images = reorder(&sorted, from.min(last), to.min(last), base);
            Ok(())
        })
    }

    // =========================================================================
    // Detail blocks
    // =========================================================================

    /// Append an empty titled block and return it.
    pub fn add_detail_block(&mut self, id: &str, title: &str) -> Result<DetailBlock, StoreError> {
        let block = DetailBlock {
            id: new_id(),
            title: title.to_string(),
            items: Vec::new(),
        };
        let created = block.clone();
        self.mutate_item(id, |item| {
            item.details.push(block);
            Ok(())
        })?;
        Ok(created)
    }

    pub fn rename_detail_block(
        &mut self,
        id: &str,
        block_id: &str,
        title: &str,
    ) -> Result<(), StoreError> {
        self.mutate_item(id, |item| {
            find_block(item, block_id)?.title = title.to_string();
            Ok(())
        })
    }

    /// Remove a block and everything it contains. Absent block is
    /// `Ok(false)`, no persist.
    pub fn remove_detail_block(&mut self, id: &str, block_id: &str) -> Result<bool, StoreError> {
        let item = self.required(id)?;
        if !item.details.iter().any(|b| b.id == block_id) {
            return Ok(false);
        }
        self.mutate_item(id, |item| {
            item.details.retain(|b| b.id != block_id);
            Ok(())
        })?;
        Ok(true)
    }

    /// Append a label/value entry to a block and return it.
    pub fn add_detail_entry(
        &mut self,
        id: &str,
        block_id: &str,
        label: &str,
        value: &str,
    ) -> Result<DetailItem, StoreError> {
        let entry = DetailItem {
            id: new_id(),
            label: label.to_string(),
            value: value.to_string(),
        };
        let created = entry.clone();
        self.mutate_item(id, |item| {
            find_block(item, block_id)?.items.push(entry);
            Ok(())
        })?;
        Ok(created)
    }

    /// Update an entry's label and/or value (merge semantics).
    pub fn update_detail_entry(
        &mut self,
        id: &str,
        block_id: &str,
        entry_id: &str,
        label: Option<&str>,
        value: Option<&str>,
    ) -> Result<(), StoreError> {
        self.mutate_item(id, |item| {
            let block = find_block(item, block_id)?;
            let Some(entry) = block.items.iter_mut().find(|e| e.id == entry_id) else {
                return Err(StoreError::NotFound(format!("detail entry {entry_id}")));
            };
            if let Some(label) = label {
                entry.label = label.to_string();
            }
            if let Some(value) = value {
                entry.value = value.to_string();
            }
            Ok(())
        })
    }

    /// Remove an entry from a block. Absent entry is `Ok(false)`, no
    /// persist; an absent block is still a not-found error.
    pub fn remove_detail_entry(
        &mut self,
        id: &str,
        block_id: &str,
        entry_id: &str,
    ) -> Result<bool, StoreError> {
        let item = self.required(id)?;
        let Some(block) = item.details.iter().find(|b| b.id == block_id) else {
            return Err(StoreError::NotFound(format!("detail block {block_id}")));
        };
        if !block.items.iter().any(|e| e.id == entry_id) {
            return Ok(false);
        }
        self.mutate_item(id, |item| {
            find_block(item, block_id)?.items.retain(|e| e.id != entry_id);
            Ok(())
        })?;
        Ok(true)
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn required(&self, id: &str) -> Result<&ShowcaseItem, StoreError> {
        self.data
            .find_item(id)
            .ok_or_else(|| StoreError::NotFound(format!("item {id}")))
    }

    /// Shared path for fine-grained item mutations: apply the closure on a
    /// scratch copy, refresh `updatedAt`, persist as an item update,
    /// commit on success.
    fn mutate_item(
        &mut self,
        id: &str,
        apply: impl FnOnce(&mut ShowcaseItem) -> Result<(), StoreError>,
    ) -> Result<(), StoreError> {
        let mut next = self.data.clone();
        let Some(item) = next.find_item_mut(id) else {
            return Err(StoreError::NotFound(format!("item {id}")));
        };
        apply(item)?;
        item.updated_at = Utc::now();

        let updated = item.clone();
        self.backend.persist(&next, &Change::ItemUpdated(&updated))?;
        self.data = next;
        Ok(())
    }
}

/// Trim, drop empties, keep first occurrence of each value.
fn dedupe_tags(tags: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let tag = tag.trim().to_string();
        if !tag.is_empty() && !out.contains(&tag) {
            out.push(tag);
        }
    }
    out
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}

fn find_block<'a>(
    item: &'a mut ShowcaseItem,
    block_id: &str,
) -> Result<&'a mut DetailBlock, StoreError> {
    item.details
        .iter_mut()
        .find(|b| b.id == block_id)
        .ok_or_else(|| StoreError::NotFound(format!("detail block {block_id}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{recording_store, sample_draft, sample_image};

    // =========================================================================
    // Create / update / delete
    // =========================================================================

    #[test]
    fn create_synthesizes_identity_and_persists_once() {
        let (mut store, state) = recording_store();
        let item = store.create_item(sample_draft("Café à la crème")).unwrap();

        assert_eq!(item.slug, "cafe-a-la-creme");
        assert!(!item.id.is_empty());
        assert_eq!(item.created_at, item.updated_at);
        assert_eq!(state.changes.borrow().as_slice(), ["item-created"]);
        assert_eq!(store.data().items.len(), 1);
        // The backend saw the full post-mutation state.
        let stored = state.stored.borrow();
        assert_eq!(stored.as_ref().unwrap().items.len(), 1);
    }

    #[test]
    fn create_rolls_back_when_persist_fails() {
        let (mut store, state) = recording_store();
        state.fail_next_persist.set(true);

        let err = store.create_item(sample_draft("Pikachu")).unwrap_err();
        assert!(matches!(err, StoreError::Storage(_)));
        assert!(store.data().items.is_empty());
    }

    #[test]
    fn update_merges_and_regenerates_slug_on_rename() {
        let (mut store, _state) = recording_store();
        let item = store.create_item(sample_draft("Pikachu Premium")).unwrap();
        assert_eq!(item.slug, "pikachu-premium");

        let updated = store
            .update_item(
                &item.id,
                ItemPatch {
                    name: Some("Raichu Deluxe".into()),
                    brand: Some("SAZAC".into()),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(updated.name, "Raichu Deluxe");
        assert_eq!(updated.slug, "raichu-deluxe");
        assert_eq!(updated.brand.as_deref(), Some("SAZAC"));
        // Omitted fields persist.
        assert_eq!(updated.subtitle, item.subtitle);
        assert!(updated.updated_at >= item.updated_at);
    }

    #[test]
    fn update_without_name_keeps_slug() {
        let (mut store, _state) = recording_store();
        let item = store.create_item(sample_draft("Pikachu")).unwrap();

        let updated = store
            .update_item(
                &item.id,
                ItemPatch {
                    description: Some("A classic.".into()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.slug, "pikachu");
    }

    #[test]
    fn update_with_empty_string_clears_optional_field() {
        let (mut store, _state) = recording_store();
        let mut draft = sample_draft("Pikachu");
        draft.brand = Some("SAZAC".into());
        let item = store.create_item(draft).unwrap();

        let updated = store
            .update_item(
                &item.id,
                ItemPatch {
                    brand: Some(String::new()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.brand, None);
    }

    #[test]
    fn update_missing_id_is_not_found_and_leaves_items_unchanged() {
        let (mut store, state) = recording_store();
        store.create_item(sample_draft("Pikachu")).unwrap();
        let ids_before: Vec<String> =
            store.data().items.iter().map(|i| i.id.clone()).collect();
        let persists_before = state.changes.borrow().len();

        let err = store
            .update_item("missing", ItemPatch::default())
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));

        let ids_after: Vec<String> = store.data().items.iter().map(|i| i.id.clone()).collect();
        assert_eq!(ids_before, ids_after);
        assert_eq!(state.changes.borrow().len(), persists_before);
    }

    #[test]
    fn delete_is_idempotent_and_cascades() {
        let (mut store, state) = recording_store();
        let mut draft = sample_draft("Totoro");
        draft.images.push(sample_image("img-1", 1));
        let item = store.create_item(draft).unwrap();

        assert!(store.delete_item(&item.id).unwrap());
        assert!(store.get_item(&item.id).is_none());
        assert_eq!(store.data().items.len(), 0);

        let persists = state.changes.borrow().len();
        // Second delete: no-op, no persist.
        assert!(!store.delete_item(&item.id).unwrap());
        assert_eq!(state.changes.borrow().len(), persists);
    }

    #[test]
    fn failed_persist_never_corrupts_state() {
        let (mut store, state) = recording_store();
        let item = store.create_item(sample_draft("Pikachu")).unwrap();

        state.fail_next_persist.set(true);
        let err = store.delete_item(&item.id).unwrap_err();
        assert!(matches!(err, StoreError::Storage(_)));
        // The item is still there.
        assert!(store.get_item(&item.id).is_some());
    }

    // =========================================================================
    // Metadata, export, import
    // =========================================================================

    #[test]
    fn metadata_update_refreshes_generated_at() {
        let (mut store, _state) = recording_store();
        let before = store.data().generated_at;

        store
            .update_metadata("Ma Collection".into(), Some("Kigurumi".into()))
            .unwrap();

        assert_eq!(store.data().title, "Ma Collection");
        assert_eq!(store.data().description.as_deref(), Some("Kigurumi"));
        assert!(store.data().generated_at >= before);
    }

    #[test]
    fn export_import_round_trips_except_generated_at() {
        let (mut store, _state) = recording_store();
        store.create_item(sample_draft("Pikachu")).unwrap();
        store.create_item(sample_draft("Totoro")).unwrap();
        let before = store.data().clone();

        let json = store.export_data().unwrap();
        store.import_data(&json).unwrap();

        let after = store.data();
        assert_eq!(after.title, before.title);
        assert_eq!(after.items, before.items);
        assert!(after.generated_at >= before.generated_at);
    }

    #[test]
    fn import_parse_failure_leaves_state_untouched() {
        let (mut store, state) = recording_store();
        store.create_item(sample_draft("Pikachu")).unwrap();
        let before = store.data().clone();
        let persists = state.changes.borrow().len();

        let err = store.import_data("{ not json").unwrap_err();
        assert!(matches!(err, StoreError::Parse(_)));
        assert_eq!(store.data(), &before);
        assert_eq!(state.changes.borrow().len(), persists);
    }

    #[test]
    fn import_persist_failure_leaves_state_untouched() {
        let (mut store, state) = recording_store();
        store.create_item(sample_draft("Pikachu")).unwrap();
        let before = store.data().clone();

        let replacement = serde_json::to_string(&ShowcaseData::default()).unwrap();
        state.fail_next_persist.set(true);
        store.import_data(&replacement).unwrap_err();
        assert_eq!(store.data(), &before);
    }

    // =========================================================================
    // Tags
    // =========================================================================

    #[test]
    fn tags_stay_unique_and_ordered() {
        let (mut store, state) = recording_store();
        let item = store.create_item(sample_draft("Pikachu")).unwrap();

        assert!(store.add_tag(&item.id, "Pokémon").unwrap());
        assert!(store.add_tag(&item.id, "Hiver").unwrap());
        let persists = state.changes.borrow().len();

        // Duplicate: no mutation, no persist.
        assert!(!store.add_tag(&item.id, "Pokémon").unwrap());
        assert_eq!(state.changes.borrow().len(), persists);

        // Case-sensitive: different value.
        assert!(store.add_tag(&item.id, "pokémon").unwrap());

        let tags = &store.get_item(&item.id).unwrap().tags;
        assert_eq!(tags, &["Pokémon", "Hiver", "pokémon"]);
    }

    #[test]
    fn blank_tag_is_rejected() {
        let (mut store, _state) = recording_store();
        let item = store.create_item(sample_draft("Pikachu")).unwrap();
        assert!(!store.add_tag(&item.id, "   ").unwrap());
        assert!(store.get_item(&item.id).unwrap().tags.is_empty());
    }

    #[test]
    fn remove_tag_by_exact_value() {
        let (mut store, _state) = recording_store();
        let item = store.create_item(sample_draft("Pikachu")).unwrap();
        store.add_tag(&item.id, "Pokémon").unwrap();

        assert!(store.remove_tag(&item.id, "Pokémon").unwrap());
        assert!(!store.remove_tag(&item.id, "Pokémon").unwrap());
        assert!(store.get_item(&item.id).unwrap().tags.is_empty());
    }

    // =========================================================================
    // Images
    // =========================================================================

    #[test]
    fn image_lifecycle_touches_updated_at() {
        let (mut store, _state) = recording_store();
        let item = store.create_item(sample_draft("Pikachu")).unwrap();

        store.add_image(&item.id, sample_image("h1", 1)).unwrap();
        let touched = store.get_item(&item.id).unwrap().updated_at;
        assert!(touched >= item.updated_at);

        store.set_image_alt(&item.id, "h1", "Vue de face").unwrap();
        assert_eq!(
            store.get_image(&item.id, "h1").unwrap().alt.as_deref(),
            Some("Vue de face")
        );

        assert!(store.remove_image(&item.id, "h1").unwrap());
        assert!(!store.remove_image(&item.id, "h1").unwrap());
        assert!(store.get_image(&item.id, "h1").is_none());
    }

    #[test]
    fn move_image_renumbers_contiguously() {
        let (mut store, _state) = recording_store();
        let item = store.create_item(sample_draft("Pikachu")).unwrap();
        store.add_image(&item.id, sample_image("a", 1)).unwrap();
        store.add_image(&item.id, sample_image("b", 2)).unwrap();
        store.add_image(&item.id, sample_image("c", 3)).unwrap();

        store.move_image(&item.id, 0, 2, 1).unwrap();

        let images = &store.get_item(&item.id).unwrap().images;
        let order: Vec<(&str, u32)> = images
            .iter()
            .map(|i| (i.id.as_str(), i.position))
            .collect();
        assert_eq!(order, vec![("b", 1), ("c", 2), ("a", 3)]);
    }

    #[test]
    fn move_image_clamps_out_of_range_indices() {
        let (mut store, _state) = recording_store();
        let item = store.create_item(sample_draft("Pikachu")).unwrap();
        store.add_image(&item.id, sample_image("a", 1)).unwrap();
        store.add_image(&item.id, sample_image("b", 2)).unwrap();

        store.move_image(&item.id, 99, 0, 1).unwrap();
        let ids: Vec<&str> = store.get_item(&item.id).unwrap().images
            .iter()
            .map(|i| i.id.as_str())
            .collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    // =========================================================================
    // Detail blocks
    // =========================================================================

    #[test]
    fn detail_block_lifecycle() {
        let (mut store, _state) = recording_store();
        let item = store.create_item(sample_draft("Pikachu")).unwrap();

        let block = store.add_detail_block(&item.id, "Caractéristiques").unwrap();
        let entry = store
            .add_detail_entry(&item.id, &block.id, "Matière", "Polaire")
            .unwrap();
        store
            .add_detail_entry(&item.id, &block.id, "Taille", "M")
            .unwrap();

        store
            .update_detail_entry(&item.id, &block.id, &entry.id, None, Some("Flanelle"))
            .unwrap();
        let stored = &store.get_item(&item.id).unwrap().details[0];
        assert_eq!(stored.items[0].label, "Matière");
        assert_eq!(stored.items[0].value, "Flanelle");

        assert!(store.remove_detail_entry(&item.id, &block.id, &entry.id).unwrap());
        assert!(!store.remove_detail_entry(&item.id, &block.id, &entry.id).unwrap());

        store.rename_detail_block(&item.id, &block.id, "Entretien").unwrap();
        assert_eq!(store.get_item(&item.id).unwrap().details[0].title, "Entretien");

        assert!(store.remove_detail_block(&item.id, &block.id).unwrap());
        assert!(store.get_item(&item.id).unwrap().details.is_empty());
    }

    #[test]
    fn detail_entry_in_missing_block_is_not_found() {
        let (mut store, _state) = recording_store();
        let item = store.create_item(sample_draft("Pikachu")).unwrap();
        let err = store
            .add_detail_entry(&item.id, "missing", "Matière", "Polaire")
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    // =========================================================================
    // Resolution and load
    // =========================================================================

    #[test]
    fn resolve_accepts_id_or_slug() {
        let (mut store, _state) = recording_store();
        let item = store.create_item(sample_draft("Pikachu Premium")).unwrap();

        assert_eq!(store.resolve(&item.id).map(|i| &i.id), Some(&item.id));
        assert_eq!(
            store.resolve("pikachu-premium").map(|i| &i.id),
            Some(&item.id)
        );
        assert!(store.resolve("nope").is_none());
    }

    #[test]
    fn failed_load_keeps_current_state() {
        let (mut store, state) = recording_store();
        store.create_item(sample_draft("Pikachu")).unwrap();

        state.fail_load.set(true);
        assert!(store.load().is_err());
        assert_eq!(store.data().items.len(), 1);
    }

    #[test]
    fn load_replaces_state_from_backend() {
        let (mut store, state) = recording_store();
        let mut canned = ShowcaseData::default();
        canned.title = "From backend".into();
        *state.load_data.borrow_mut() = Some(canned);

        store.load().unwrap();
        assert_eq!(store.data().title, "From backend");
    }
}
