//! Shared test utilities for the vitrine test suite.
//!
//! Provides sample-data builders and a recording in-memory backend that
//! captures every persist call, so store tests can assert on persistence
//! discipline (exactly one persist per mutation, none on no-ops) and
//! simulate backend failures without touching the filesystem or network.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use chrono::{TimeZone, Utc};

use crate::model::{ItemDraft, ItemImage, ShowcaseData, ShowcaseItem};
use crate::storage::{Change, StorageBackend, StorageError};
use crate::store::ShowcaseStore;

// =========================================================================
// Sample data builders
// =========================================================================

/// An item with fixed timestamps and no images/tags/details.
pub fn sample_item(id: &str, name: &str) -> ShowcaseItem {
    let stamp = Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap();
    ShowcaseItem {
        id: id.to_string(),
        slug: crate::ident::generate_slug(name),
        name: name.to_string(),
        subtitle: None,
        brand: None,
        description: None,
        tags: Vec::new(),
        images: Vec::new(),
        details: Vec::new(),
        created_at: stamp,
        updated_at: stamp,
    }
}

/// A two-item collection.
pub fn sample_data() -> ShowcaseData {
    let mut data = ShowcaseData::default();
    data.title = "Ma Collection".to_string();
    data.description = Some("Collection personnelle".to_string());
    data.items.push(sample_item("item-1", "Pikachu Premium"));
    data.items.push(sample_item("item-2", "Totoro"));
    data
}

/// A minimal creation draft.
pub fn sample_draft(name: &str) -> ItemDraft {
    ItemDraft {
        name: name.to_string(),
        ..Default::default()
    }
}

/// An image stub with the given id and position.
pub fn sample_image(id: &str, position: u32) -> ItemImage {
    ItemImage {
        id: id.to_string(),
        src: format!("data:image/png;base64,{id}"),
        alt: None,
        position,
    }
}

// =========================================================================
// Recording backend
// =========================================================================

/// Observable state shared between a test and its [`RecordingBackend`].
#[derive(Default)]
pub struct BackendState {
    /// Change labels, one per successful persist, in order.
    pub changes: RefCell<Vec<String>>,
    /// Full state as of the last successful persist.
    pub stored: RefCell<Option<ShowcaseData>>,
    /// Canned data returned by the next `load` (default empty collection).
    pub load_data: RefCell<Option<ShowcaseData>>,
    /// Make the next persist fail with a transport-style error.
    pub fail_next_persist: Cell<bool>,
    /// Make every load fail.
    pub fail_load: Cell<bool>,
}

pub struct RecordingBackend {
    state: Rc<BackendState>,
}

impl StorageBackend for RecordingBackend {
    fn load(&self) -> Result<ShowcaseData, StorageError> {
        if self.state.fail_load.get() {
            return Err(StorageError::Api {
                status: 500,
                body: "load failed".to_string(),
            });
        }
        Ok(self.state.load_data.borrow().clone().unwrap_or_default())
    }

    fn persist(&self, data: &ShowcaseData, change: &Change<'_>) -> Result<(), StorageError> {
        if self.state.fail_next_persist.take() {
            return Err(StorageError::Api {
                status: 500,
                body: "persist failed".to_string(),
            });
        }
        self.state
            .changes
            .borrow_mut()
            .push(change.label().to_string());
        *self.state.stored.borrow_mut() = Some(data.clone());
        Ok(())
    }

    fn describe(&self) -> String {
        "recording test backend".to_string()
    }
}

/// A store wired to a fresh recording backend, plus the shared handle for
/// assertions.
pub fn recording_store() -> (ShowcaseStore, Rc<BackendState>) {
    let state = Rc::new(BackendState::default());
    let backend = RecordingBackend {
        state: Rc::clone(&state),
    };
    (ShowcaseStore::new(Box::new(backend)), state)
}
