//! Remote persistence: REST-over-HTTP client.
//!
//! One blocking HTTP call per mutation, mapped from the [`Change`] the store
//! reports. The client is deliberately dumb: it never reads the server's
//! echo of a mutated resource back into the store — ids, slugs and
//! timestamps are synthesized client-side, and last writer wins.
//!
//! Endpoint map:
//!
//! ```text
//! load                 GET    /showcase
//! metadata updated     PUT    /showcase/metadata   {title, description}
//! imported             POST   /showcase/import     (full ShowcaseData)
//! item created         POST   /items               (full item)
//! item updated         PUT    /items/{id}          (full item)
//! item deleted         DELETE /items/{id}
//! image upload         POST   /images/upload       (multipart "image")
//! image delete         DELETE /images/{filename}
//! ```
//!
//! Non-2xx responses surface as [`StorageError::Api`] carrying the raw
//! response body as the error message.

use super::{Change, StorageBackend, StorageError};
use crate::images::{ImageError, ImageStore, UploadedImage};
use crate::model::{ItemImage, ShowcaseData};
use reqwest::blocking::{Client, Response, multipart};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Clone)]
pub struct RemoteApi {
    client: Client,
    base_url: String,
}

#[derive(Debug, Serialize)]
struct MetadataBody<'a> {
    title: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
}

/// Body of a successful `POST /images/upload`.
#[derive(Debug, Deserialize)]
struct UploadBody {
    url: String,
    filename: String,
}

impl RemoteApi {
    pub fn new(base_url: &str) -> Result<Self, StorageError> {
        Ok(Self {
            client: Client::builder().build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Pass 2xx through; turn anything else into an `Api` error carrying
    /// the raw body.
    fn check(response: Response) -> Result<Response, StorageError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().unwrap_or_default();
        Err(StorageError::Api {
            status: status.as_u16(),
            body,
        })
    }
}

impl StorageBackend for RemoteApi {
    fn load(&self) -> Result<ShowcaseData, StorageError> {
        let response = Self::check(self.client.get(self.url("/showcase")).send()?)?;
        Ok(response.json()?)
    }

    fn persist(&self, data: &ShowcaseData, change: &Change<'_>) -> Result<(), StorageError> {
        debug!(change = change.label(), "dispatching to remote API");
        let response = match change {
            Change::ItemCreated(item) => {
                self.client.post(self.url("/items")).json(item).send()?
            }
            Change::ItemUpdated(item) => self
                .client
                .put(self.url(&format!("/items/{}", item.id)))
                .json(item)
                .send()?,
            Change::ItemDeleted(id) => self
                .client
                .delete(self.url(&format!("/items/{id}")))
                .send()?,
            Change::MetadataUpdated => self
                .client
                .put(self.url("/showcase/metadata"))
                .json(&MetadataBody {
                    title: &data.title,
                    description: data.description.as_deref(),
                })
                .send()?,
            Change::Imported => self
                .client
                .post(self.url("/showcase/import"))
                .json(data)
                .send()?,
        };
        Self::check(response)?;
        Ok(())
    }

    fn describe(&self) -> String {
        format!("remote API at {}", self.base_url)
    }
}

impl ImageStore for RemoteApi {
    fn upload(&self, bytes: &[u8], filename: &str) -> Result<UploadedImage, ImageError> {
        let part = multipart::Part::bytes(bytes.to_vec()).file_name(filename.to_string());
        let form = multipart::Form::new().part("image", part);

        let response = self
            .client
            .post(self.url("/images/upload"))
            .multipart(form)
            .send()
            .map_err(StorageError::from)?;
        let body: UploadBody = Self::check(response)?.json().map_err(StorageError::from)?;

        Ok(UploadedImage {
            id: body.filename,
            src: body.url,
        })
    }

    /// The content hash never leaves the server, so duplicates are
    /// recognized by the returned URL instead.
    fn is_duplicate(&self, existing: &[ItemImage], candidate: &UploadedImage) -> bool {
        existing.iter().any(|img| img.src == candidate.src)
    }

    fn delete(&self, image: &ItemImage) -> Result<(), ImageError> {
        let response = self
            .client
            .delete(self.url(&format!("/images/{}", image.id)))
            .send()
            .map_err(StorageError::from)?;
        Self::check(response).map_err(ImageError::from)?;
        Ok(())
    }
}
