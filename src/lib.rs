//! # pousada-cms
//!
//! Content store and admin CLI for a small seaside guesthouse website.
//! The data directory is the backend: content collections are JSON
//! documents, uploaded photos live in a media directory, and the public
//! site consumes one exported snapshot with every image resolved to a URL.
//!
//! # Architecture
//!
//! ```text
//! CLI (admin edits) ──> ContentService ──> ContentStore (JSON collections)
//!                            │        └──> MediaStorage (uploaded files)
//!                            │
//!                            └──> content.json snapshot ──> public site
//! ```
//!
//! The service owns the in-memory content model. On load it issues the
//! entity reads concurrently and accepts partial success — a broken
//! collection is a warning, not a failed site. Mutations write through the
//! store first and only then touch the model, so there is never an
//! optimistic patch to roll back.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`types`] | Entity records serialized to the store (`Room`, `Amenity`, `GalleryImage`, `RoomImage`) |
//! | [`store`] | `ContentStore` adapter trait + the JSON-collection production store |
//! | [`storage`] | Media uploads: validation, content-addressed names, single-slot replacement |
//! | [`resolver`] | Pure image reference → URL mapping with placeholder fallback |
//! | [`overrides`] | Bounded local override cache consulted by the resolver |
//! | [`service`] | The orchestrator: content model, concurrent loads, mutation entry points, snapshot export |
//! | [`seed`] | Compiled-in default content for `init` |
//! | [`config`] | `config.toml` loading, merging, and validation |
//! | [`output`] | CLI output formatting — information-first inventory display |
//!
//! # Design Decisions
//!
//! ## JSON Collections Over a Database
//!
//! Each collection (`room_types`, `amenities`, `gallery_images`,
//! `room_images`) is one JSON document read whole and written whole. A
//! guesthouse has a dozen rooms; the entire content model fits in a few
//! kilobytes, and plain files mean the owner can back up, diff, and
//! hand-edit content with nothing but a text editor. The [`store`] trait
//! keeps the door open for a remote row store without touching the service.
//!
//! ## Content-Addressed Uploads
//!
//! Stored media names are a truncated SHA-256 of the file contents plus the
//! original extension. Two distinct photos sharing a folder cannot collide,
//! and re-uploading the same photo lands on the same path instead of
//! accumulating duplicates.
//!
//! ## Availability Over Completeness
//!
//! The initial load accepts partial success: if the amenities collection is
//! corrupt, the rooms and galleries still render and the failure surfaces
//! as a warning. The model reports `Failed` only when nothing loaded. Write
//! failures are the opposite — surfaced verbatim, never retried, model
//! untouched.
//!
//! ## Weak References By Label
//!
//! Rooms reference amenities by display label, not id. Renaming an amenity
//! does not cascade to the rooms that mention it — the stale label simply
//! keeps rendering. That mirrors how the content was always edited; the
//! inventory display makes the drift visible rather than pretending the
//! relation is enforced.

pub mod config;
pub mod output;
pub mod overrides;
pub mod resolver;
pub mod seed;
pub mod service;
pub mod storage;
pub mod store;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
