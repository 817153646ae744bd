//! Persistence backends behind a single storage interface.
//!
//! The showcase persists either to a local JSON blob or through a small REST
//! API. Both live behind [`StorageBackend`], selected by `[storage] backend`
//! in `vitrine.toml` — the store never knows which one it is talking to.
//!
//! ## Persistence discipline
//!
//! Every mutation is followed by exactly one [`StorageBackend::persist`]
//! call, carrying the full post-mutation state plus a [`Change`] describing
//! what happened:
//!
//! - the **local** backend ignores the change and overwrites the whole blob
//!   (the blob is the unit of storage);
//! - the **remote** backend dispatches one HTTP call to the endpoint that
//!   corresponds to the change.
//!
//! There is no batching, debouncing, or versioning — last writer wins.

mod local;
mod remote;

pub use local::LocalBlob;
pub use remote::RemoteApi;

use crate::config::{BackendKind, StorageConfig};
use crate::images::{ImageStore, InlineImageStore};
use crate::model::{ShowcaseData, ShowcaseItem};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),
    /// Non-2xx response; `body` is the raw response text.
    #[error("API error (HTTP {status}): {body}")]
    Api { status: u16, body: String },
}

/// What a mutation did, for backends that persist per-operation.
#[derive(Debug)]
pub enum Change<'a> {
    ItemCreated(&'a ShowcaseItem),
    ItemUpdated(&'a ShowcaseItem),
    ItemDeleted(&'a str),
    MetadataUpdated,
    Imported,
}

impl Change<'_> {
    /// Short name for logs (the full Debug form can embed whole items).
    pub fn label(&self) -> &'static str {
        match self {
            Change::ItemCreated(_) => "item-created",
            Change::ItemUpdated(_) => "item-updated",
            Change::ItemDeleted(_) => "item-deleted",
            Change::MetadataUpdated => "metadata-updated",
            Change::Imported => "imported",
        }
    }
}

/// Abstract persistence capability: load the full state, persist after a
/// mutation. Implementations must not partially apply a failed persist.
pub trait StorageBackend {
    /// Retrieve the current showcase state from the backing store.
    fn load(&self) -> Result<ShowcaseData, StorageError>;

    /// Persist `data` (the full post-mutation state). `change` tells
    /// per-operation backends which endpoint to hit.
    fn persist(&self, data: &ShowcaseData, change: &Change<'_>) -> Result<(), StorageError>;

    /// Human-readable backend description for logs and CLI output.
    fn describe(&self) -> String;
}

/// Construct the configured storage backend and its paired image store.
///
/// The pairing is fixed: the local blob embeds images inline (content-hash
/// identity), the remote API delegates uploads to the server (filename
/// identity).
pub fn open(
    config: &StorageConfig,
) -> Result<(Box<dyn StorageBackend>, Box<dyn ImageStore>), StorageError> {
    match config.backend {
        BackendKind::Local => Ok((
            Box::new(LocalBlob::new(&config.path)),
            Box::new(InlineImageStore),
        )),
        BackendKind::Remote => {
            let api = RemoteApi::new(&config.api_base_url)?;
            Ok((Box::new(api.clone()), Box::new(api)))
        }
    }
}
