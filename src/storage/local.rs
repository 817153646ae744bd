//! Local persistence: one JSON blob at a fixed path.
//!
//! The whole collection lives in a single pretty-printed JSON file
//! (default `showcase.json`) and is overwritten wholesale on every
//! mutation. Images are embedded as data URIs, so the blob is fully
//! self-contained — copying the file copies the collection.

use super::{Change, StorageBackend, StorageError};
use crate::model::ShowcaseData;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

pub struct LocalBlob {
    path: PathBuf,
}

impl LocalBlob {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }
}

impl StorageBackend for LocalBlob {
    /// A missing blob is a fresh collection, not an error; a present but
    /// unparsable blob IS an error — silently replacing user data with an
    /// empty collection would destroy it on the next persist.
    fn load(&self) -> Result<ShowcaseData, StorageError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no blob yet, starting empty");
                return Ok(ShowcaseData::default());
            }
            Err(err) => return Err(err.into()),
        };
        Ok(serde_json::from_str(&text)?)
    }

    fn persist(&self, data: &ShowcaseData, change: &Change<'_>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, json)?;
        debug!(path = %self.path.display(), change = change.label(), "blob written");
        Ok(())
    }

    fn describe(&self) -> String {
        format!("local blob at {}", self.path.display())
    }
}
