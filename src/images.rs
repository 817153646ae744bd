//! Image upload pipeline and image identity.
//!
//! Two identity strategies exist behind one [`ImageStore`] capability:
//!
//! - **Inline** ([`InlineImageStore`], local mode): the image id is a content
//!   hash of the uploaded bytes, and the bytes themselves travel inside the
//!   collection as a base64 data URI. No external storage exists, so two
//!   uploads of the same file are detected purely by hash equality.
//! - **Server** ([`RemoteApi`](crate::storage::RemoteApi), remote mode): the
//!   file is posted to the API's upload endpoint; the server-assigned
//!   filename becomes the id and the returned URL the `src`. Duplicates are
//!   detected by URL equality, since the hash never leaves the server.
//!
//! [`process_upload`] is the shared pipeline: upload through the store, check
//! for duplicates against the target item, then assign display position and
//! default alt text. A duplicate or transport failure leaves the item
//! untouched — the caller only attaches the returned [`ItemImage`] on `Ok`.

use crate::model::ItemImage;
use crate::storage::StorageError;
use base64::{Engine, engine::general_purpose::STANDARD};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImageError {
    /// The exact content (or server URL) is already attached to the item.
    #[error("duplicate image: already attached to this item")]
    Duplicate,
    #[error("unrecognized image data: {0}")]
    Unrecognized(String),
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Identity and reference for a freshly uploaded image, before it is
/// attached to an item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedImage {
    /// Content hash (inline) or server-assigned filename (remote).
    pub id: String,
    /// Data URI (inline) or URL (remote).
    pub src: String,
}

/// Where uploaded bytes go and how duplicates are recognized.
pub trait ImageStore {
    /// Turn raw file bytes into an identified, referencable image.
    fn upload(&self, bytes: &[u8], filename: &str) -> Result<UploadedImage, ImageError>;

    /// Whether `candidate` duplicates an image already attached to the item.
    fn is_duplicate(&self, existing: &[ItemImage], candidate: &UploadedImage) -> bool;

    /// Release backend-side resources for a removed image. Inline images
    /// have none; the remote store deletes the server file.
    fn delete(&self, image: &ItemImage) -> Result<(), ImageError>;
}

/// Inline strategy: content-hash identity, data-URI storage.
pub struct InlineImageStore;

impl ImageStore for InlineImageStore {
    fn upload(&self, bytes: &[u8], filename: &str) -> Result<UploadedImage, ImageError> {
        let format = image::guess_format(bytes)
            .map_err(|_| ImageError::Unrecognized(filename.to_string()))?;
        Ok(UploadedImage {
            id: content_hash(bytes),
            src: data_uri(format.to_mime_type(), bytes),
        })
    }

    fn is_duplicate(&self, existing: &[ItemImage], candidate: &UploadedImage) -> bool {
        existing.iter().any(|img| img.id == candidate.id)
    }

    fn delete(&self, _image: &ItemImage) -> Result<(), ImageError> {
        // Inline data lives in the collection and is dropped with the image.
        Ok(())
    }
}

/// Run one file through the upload pipeline for a target item.
///
/// `existing` is the item's current image list; `base` is the configured
/// first display position. On success the returned image carries
/// `position = max(existing) + 1` (or `base` for the first image) and a
/// default alt equal to the filename without its extension.
pub fn process_upload(
    store: &dyn ImageStore,
    existing: &[ItemImage],
    bytes: &[u8],
    filename: &str,
    base: u32,
) -> Result<ItemImage, ImageError> {
    let candidate = store.upload(bytes, filename)?;
    if store.is_duplicate(existing, &candidate) {
        return Err(ImageError::Duplicate);
    }

    Ok(ItemImage {
        id: candidate.id,
        src: candidate.src,
        alt: Some(default_alt(filename)),
        position: next_position(existing, base),
    })
}

/// 128-bit content identifier: truncated hex SHA-256 of the file bytes.
///
/// The id is dedup identity, not an integrity check, so the truncated
/// digest keeps ids compact while staying deterministic over content.
pub fn content_hash(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    let hex = format!("{digest:x}");
    hex[..32].to_string()
}

/// Self-describing inline reference: `data:<mime>;base64,<payload>`.
pub fn data_uri(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}

/// Default alt text: the original filename with its extension stripped.
pub fn default_alt(filename: &str) -> String {
    match filename.rsplit_once('.') {
        Some((stem, _ext)) if !stem.is_empty() => stem.to_string(),
        _ => filename.to_string(),
    }
}

/// Next display position: one past the highest existing position, or the
/// configured base for an empty item.
pub fn next_position(existing: &[ItemImage], base: u32) -> u32 {
    existing
        .iter()
        .map(|img| img.position)
        .max()
        .map_or(base, |max| max + 1)
}

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "gif"];

/// Expand CLI upload arguments into concrete image files.
///
/// Files pass through untouched (their extension is not second-guessed —
/// the pipeline sniffs actual bytes); directories are walked recursively
/// and filtered by extension, in sorted order for stable batch numbering.
pub fn collect_image_paths(inputs: &[PathBuf]) -> Vec<PathBuf> {
    let mut paths = Vec::new();
    for input in inputs {
        if input.is_dir() {
            let mut found: Vec<PathBuf> = walkdir::WalkDir::new(input)
                .sort_by_file_name()
                .into_iter()
                .filter_map(|entry| entry.ok())
                .filter(|entry| entry.file_type().is_file())
                .map(|entry| entry.into_path())
                .filter(|path| has_image_extension(path))
                .collect();
            paths.append(&mut found);
        } else {
            paths.push(input.clone());
        }
    }
    paths
}

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            let lower = ext.to_ascii_lowercase();
            IMAGE_EXTENSIONS.contains(&lower.as_str())
        })
}
