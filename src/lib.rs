//! # Vitrine
//!
//! A collection showcase manager: administer a personal collection of items
//! (names, images, tags, detail blocks) from the command line and render it
//! as a static gallery page. One JSON shape is the whole truth — the local
//! blob, the remote API bodies, and the import/export format are identical.
//!
//! # Architecture: Store Over Interchangeable Backends
//!
//! Every command goes through the same path:
//!
//! ```text
//! CLI action → ShowcaseStore operation → persist (blob write | HTTP call)
//! ```
//!
//! The store is an explicit context object holding the in-memory collection
//! and a boxed [`storage::StorageBackend`]. Each mutation builds the next
//! state on a scratch copy, persists it, and commits only on success — a
//! failed write or HTTP call leaves memory exactly as it was. There is no
//! global state, no batching, and no versioning: last writer wins.
//!
//! Image identity follows the backend through the [`images::ImageStore`]
//! capability:
//!
//! - **local** — images embed as base64 data URIs, identified by a content
//!   hash; uploading the same bytes twice to an item is rejected.
//! - **remote** — images upload to the API, identified by the
//!   server-assigned filename; duplicates are recognized by URL.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`model`] | Serialized collection types (`ShowcaseData` and friends), drafts and patches |
//! | [`store`] | `ShowcaseStore` — CRUD, tags, images, detail blocks, import/export |
//! | [`storage`] | `StorageBackend` trait, local JSON blob, remote REST client |
//! | [`images`] | Upload pipeline: hashing, data URIs, dedup, positions, batch collection |
//! | [`ident`] | Slug generation and UUID identifiers |
//! | [`reorder`] | Contiguous position renumbering for image moves |
//! | [`config`] | `vitrine.toml` loading, validation, stock config |
//! | [`render`] | Static gallery page via Maud |
//! | [`output`] | CLI output formatting — pure `format_*` functions, `print_*` wrappers |
//!
//! # Design Decisions
//!
//! ## One Storage Interface, Two Backends
//!
//! Local-blob and remote-API persistence are deliberately *not* parallel
//! code paths. The store reports each mutation as a [`storage::Change`];
//! the local backend ignores it and rewrites the whole blob, the remote
//! backend maps it to one endpoint call. Switching backends is a config
//! edit, not a migration.
//!
//! ## Client-Side Identity
//!
//! Ids (UUID v4), slugs and timestamps are synthesized in the store for
//! both backends. The remote server's echo of a mutated resource is never
//! read back; the client's state is authoritative until the next `load`.
//!
//! ## Maud Over Template Engines
//!
//! The gallery page is generated with [Maud](https://maud.lambda.xyz/):
//! compile-time checked HTML, type-safe interpolation, auto-escaping for
//! every collection-supplied string, and no template files to ship.
//!
//! ## Slugs Are Not Unique
//!
//! A slug is a pure function of the item name and nothing enforces
//! cross-item uniqueness — renaming two items identically gives them the
//! same anchor on the gallery page. Ids, not slugs, are the real identity;
//! slugs exist for URLs and human-friendly CLI addressing.

pub mod config;
pub mod ident;
pub mod images;
pub mod model;
pub mod output;
pub mod render;
pub mod reorder;
pub mod storage;
pub mod store;

#[cfg(test)]
pub(crate) mod test_helpers;
