//! The content service: owns the in-memory content model.
//!
//! [`ContentService`] sits between the editing surface (the CLI) and the
//! persistence seams ([`ContentStore`] for records, [`MediaStorage`] for
//! files). It loads the entity collections into a [`ContentModel`], exposes
//! one mutation entry point per store operation, and keeps the model in sync
//! with what the backend confirmed.
//!
//! ## Loading
//!
//! `refresh` issues the three entity reads concurrently and accepts partial
//! success: a failed read is recorded as a [`LoadWarning`] and leaves that
//! entity's previous list untouched, so one broken collection never blanks
//! the rest of the site. The model is `Ready` when at least one read
//! succeeded and `Failed` only when every read failed. Secondary room
//! images ride the rooms read unit — they live in the same backend and fail
//! with it.
//!
//! ## Mutations
//!
//! Every mutation writes through the store first; the model changes only
//! after the backend confirmed the write, so there is never an optimistic
//! patch to roll back. On success, room and amenity mutations re-fetch the
//! affected list (picking up backend-confirmed ordering), while gallery and
//! room-image mutations patch the model in place — a re-fetch per appended
//! photo would be wasteful, and the next `refresh` reconciles any drift. On
//! failure the model is untouched and the store's error is returned
//! verbatim; nothing retries.
//!
//! Mutation entry points take `&mut self`, so two edits cannot interleave
//! within one process. Across processes the store is last-write-wins with
//! no version check — acceptable for a single owner editing her own site.
//!
//! No operation carries a timeout: the production store is a local
//! filesystem and every call is a bounded small-file read or write. A
//! remote store implementing [`ContentStore`] must bring its own deadline.

use crate::config::SiteConfig;
use crate::overrides::OverrideCache;
use crate::resolver;
use crate::seed;
use crate::storage::{MediaStorage, StorageError};
use crate::store::{ContentStore, JsonStore, StoreError};
use crate::types::{Amenity, GalleryImage, Room, RoomImage};
use serde::Serialize;
use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

/// Where the model is in its load lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentStatus {
    Uninitialized,
    Loading,
    Ready,
    Failed,
}

/// A read failure recorded during `refresh` instead of surfaced as an error.
#[derive(Debug, Clone)]
pub struct LoadWarning {
    pub entity: &'static str,
    pub message: String,
}

impl std::fmt::Display for LoadWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "could not load {}: {}", self.entity, self.message)
    }
}

/// The in-memory aggregate the presentation layer consumes.
///
/// Owned exclusively by [`ContentService`]; consumers borrow it read-only
/// via [`ContentService::model`] and never retain it across refreshes.
#[derive(Debug)]
pub struct ContentModel {
    pub rooms: Vec<Room>,
    /// Secondary images grouped by room id, each group ordered.
    pub room_images: BTreeMap<u64, Vec<RoomImage>>,
    pub amenities: Vec<Amenity>,
    pub gallery: Vec<GalleryImage>,
    pub status: ContentStatus,
    pub warnings: Vec<LoadWarning>,
}

impl ContentModel {
    fn empty() -> Self {
        Self {
            rooms: Vec::new(),
            room_images: BTreeMap::new(),
            amenities: Vec::new(),
            gallery: Vec::new(),
            status: ContentStatus::Uninitialized,
            warnings: Vec::new(),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(
            self.status,
            ContentStatus::Uninitialized | ContentStatus::Loading
        )
    }
}

/// Storage folder holding the single hero image.
const HERO_FOLDER: &str = "hero";

pub struct ContentService<S: ContentStore> {
    store: S,
    media: MediaStorage,
    overrides: OverrideCache,
    overrides_dir: PathBuf,
    config: SiteConfig,
    model: ContentModel,
}

impl ContentService<JsonStore> {
    /// Open the production service from config: JSON store in the data dir,
    /// media alongside, override cache loaded from disk. Does not load
    /// content — call [`ContentService::refresh`] for that.
    pub fn open(config: SiteConfig) -> Self {
        let data_dir = PathBuf::from(&config.data_dir);
        let store = JsonStore::new(&data_dir);
        let media = MediaStorage::new(&config.media_dir);
        let overrides = OverrideCache::load(&data_dir, config.overrides.max_entries);
        Self::new(store, media, overrides, data_dir, config)
    }
}

impl<S: ContentStore> ContentService<S> {
    pub fn new(
        store: S,
        media: MediaStorage,
        overrides: OverrideCache,
        overrides_dir: impl Into<PathBuf>,
        config: SiteConfig,
    ) -> Self {
        Self {
            store,
            media,
            overrides,
            overrides_dir: overrides_dir.into(),
            config,
            model: ContentModel::empty(),
        }
    }

    /// Read-only view of the current model.
    pub fn model(&self) -> &ContentModel {
        &self.model
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    // =========================================================================
    // Loading
    // =========================================================================

    /// Load all collections concurrently, accepting partial success.
    pub fn refresh(&mut self) {
        self.model.status = ContentStatus::Loading;
        self.model.warnings.clear();

        let store = &self.store;
        let (rooms_res, (amenities_res, gallery_res)) = rayon::join(
            || Self::load_rooms_unit(store),
            || {
                rayon::join(
                    || store.list_amenities(),
                    || store.list_gallery_images(),
                )
            },
        );

        let mut loaded_any = false;
        match rooms_res {
            Ok((rooms, images)) => {
                self.model.rooms = rooms;
                self.model.room_images = images;
                loaded_any = true;
            }
            Err(e) => self.warn("rooms", &e),
        }
        match amenities_res {
            Ok(amenities) => {
                self.model.amenities = amenities;
                loaded_any = true;
            }
            Err(e) => self.warn("amenities", &e),
        }
        match gallery_res {
            Ok(gallery) => {
                self.model.gallery = gallery;
                loaded_any = true;
            }
            Err(e) => self.warn("gallery images", &e),
        }

        self.model.status = if loaded_any {
            ContentStatus::Ready
        } else {
            ContentStatus::Failed
        };
    }

    /// Rooms plus their secondary images, as one read unit.
    fn load_rooms_unit(
        store: &S,
    ) -> Result<(Vec<Room>, BTreeMap<u64, Vec<RoomImage>>), StoreError> {
        let rooms = store.list_rooms()?;
        let mut images = BTreeMap::new();
        for room in &rooms {
            images.insert(room.id, store.list_room_images(room.id)?);
        }
        Ok((rooms, images))
    }

    fn warn(&mut self, entity: &'static str, error: &StoreError) {
        self.model.warnings.push(LoadWarning {
            entity,
            message: error.to_string(),
        });
    }

    /// Seed the store with the compiled-in default content.
    pub fn seed_defaults(&mut self) -> Result<(), StoreError> {
        for room in seed::default_rooms() {
            self.store.insert_room(room)?;
        }
        for amenity in seed::default_amenities() {
            self.store.insert_amenity(amenity)?;
        }
        for image in seed::default_gallery() {
            self.store.insert_gallery_image(image)?;
        }
        self.refresh();
        Ok(())
    }

    // =========================================================================
    // Room mutations — write through, then re-fetch the list
    // =========================================================================

    pub fn create_room(&mut self, room: Room) -> Result<Room, StoreError> {
        let stored = self.store.insert_room(room)?;
        self.refetch_rooms();
        Ok(stored)
    }

    pub fn update_room(&mut self, id: u64, room: Room) -> Result<Room, StoreError> {
        let stored = self.store.update_room(id, room)?;
        self.refetch_rooms();
        Ok(stored)
    }

    pub fn delete_room(&mut self, id: u64) -> Result<(), StoreError> {
        self.store.delete_room(id)?;
        self.refetch_rooms();
        Ok(())
    }

    /// Replace the model's room list with backend-confirmed state. A failed
    /// re-fetch leaves the previous (now stale) list and records a warning —
    /// the write itself already succeeded and is reported as such.
    fn refetch_rooms(&mut self) {
        match Self::load_rooms_unit(&self.store) {
            Ok((rooms, images)) => {
                self.model.rooms = rooms;
                self.model.room_images = images;
            }
            Err(e) => self.warn("rooms", &e),
        }
    }

    // =========================================================================
    // Amenity mutations — write through, then re-fetch the list
    // =========================================================================

    pub fn create_amenity(&mut self, amenity: Amenity) -> Result<Amenity, StoreError> {
        let stored = self.store.insert_amenity(amenity)?;
        self.refetch_amenities();
        Ok(stored)
    }

    pub fn update_amenity(&mut self, id: u64, amenity: Amenity) -> Result<Amenity, StoreError> {
        let stored = self.store.update_amenity(id, amenity)?;
        self.refetch_amenities();
        Ok(stored)
    }

    pub fn delete_amenity(&mut self, id: u64) -> Result<(), StoreError> {
        self.store.delete_amenity(id)?;
        self.refetch_amenities();
        Ok(())
    }

    fn refetch_amenities(&mut self) {
        match self.store.list_amenities() {
            Ok(amenities) => self.model.amenities = amenities,
            Err(e) => self.warn("amenities", &e),
        }
    }

    // =========================================================================
    // Gallery and room-image mutations — write through, then patch in place
    // =========================================================================

    pub fn add_gallery_image(&mut self, image: GalleryImage) -> Result<GalleryImage, StoreError> {
        let stored = self.store.insert_gallery_image(image)?;
        self.model.gallery.push(stored.clone());
        self.model
            .gallery
            .sort_by_key(|img| (img.display_order, img.id));
        Ok(stored)
    }

    pub fn update_gallery_image(
        &mut self,
        id: u64,
        image: GalleryImage,
    ) -> Result<GalleryImage, StoreError> {
        let stored = self.store.update_gallery_image(id, image)?;
        if let Some(slot) = self.model.gallery.iter_mut().find(|img| img.id == id) {
            *slot = stored.clone();
        }
        self.model
            .gallery
            .sort_by_key(|img| (img.display_order, img.id));
        Ok(stored)
    }

    pub fn remove_gallery_image(&mut self, id: u64) -> Result<(), StoreError> {
        self.store.delete_gallery_image(id)?;
        self.model.gallery.retain(|img| img.id != id);
        Ok(())
    }

    pub fn add_room_image(&mut self, image: RoomImage) -> Result<RoomImage, StoreError> {
        let stored = self.store.insert_room_image(image)?;
        let group = self.model.room_images.entry(stored.room_id).or_default();
        group.push(stored.clone());
        group.sort_by_key(|img| (img.display_order, img.id));
        Ok(stored)
    }

    pub fn remove_room_image(&mut self, id: u64) -> Result<(), StoreError> {
        self.store.delete_room_image(id)?;
        for group in self.model.room_images.values_mut() {
            group.retain(|img| img.id != id);
        }
        Ok(())
    }

    // =========================================================================
    // Media and resolution
    // =========================================================================

    /// Validate and store an uploaded image; the model is untouched until
    /// some record starts referencing the returned path.
    pub fn upload_image(
        &self,
        original_name: &str,
        declared_content_type: &str,
        bytes: &[u8],
        folder: &str,
    ) -> Result<String, StorageError> {
        self.media.upload(original_name, declared_content_type, bytes, folder)
    }

    /// Stored path of the current hero image, if one is set.
    pub fn hero_image(&self) -> Result<Option<String>, StorageError> {
        Ok(self.media.list(HERO_FOLDER)?.into_iter().next())
    }

    /// Replace the hero image slot with a new upload.
    pub fn set_hero_image(
        &self,
        original_name: &str,
        declared_content_type: &str,
        bytes: &[u8],
    ) -> Result<String, StorageError> {
        self.media
            .replace_in_folder(HERO_FOLDER, original_name, declared_content_type, bytes)
    }

    /// Resolve an image reference against the override cache and config.
    pub fn resolve_image(&self, reference: Option<&str>) -> String {
        resolver::resolve_image_url(&self.config, &self.overrides, reference)
    }

    /// Record a local override payload for an image reference, persisted
    /// synchronously.
    pub fn override_image(
        &mut self,
        reference: impl Into<String>,
        payload: impl Into<String>,
    ) -> io::Result<()> {
        self.overrides.put(reference, payload);
        self.save_overrides()
    }

    /// Drop a local override. Returns whether one existed.
    pub fn clear_override(&mut self, reference: &str) -> io::Result<bool> {
        let removed = self.overrides.remove(reference);
        self.save_overrides()?;
        Ok(removed)
    }

    pub fn overrides(&self) -> &OverrideCache {
        &self.overrides
    }

    fn save_overrides(&self) -> io::Result<()> {
        std::fs::create_dir_all(&self.overrides_dir)?;
        self.overrides.save(&self.overrides_dir)
    }

    // =========================================================================
    // Snapshot export
    // =========================================================================

    /// Build the snapshot the public site consumes: the whole model with
    /// every image reference resolved to a URL.
    pub fn export(&self) -> Result<SiteContent, StorageError> {
        let hero_image = self
            .hero_image()?
            .map(|path| self.resolve_image(Some(&path)));

        let rooms = self
            .model
            .rooms
            .iter()
            .map(|room| RoomContent {
                name: room.name.clone(),
                capacity: room.capacity.clone(),
                rate: room.rate.clone(),
                description: room.description.clone(),
                amenities: room.amenities.clone(),
                unique_amenities: room.unique_amenities.clone(),
                featured: room.featured,
                image_url: self.resolve_image(room.image.as_deref()),
                images: self
                    .model
                    .room_images
                    .get(&room.id)
                    .map(|images| {
                        images
                            .iter()
                            .map(|img| RoomImageContent {
                                url: self.resolve_image(Some(&img.image)),
                                caption: img.caption.clone(),
                            })
                            .collect()
                    })
                    .unwrap_or_default(),
            })
            .collect();

        let amenities = self
            .model
            .amenities
            .iter()
            .map(|a| AmenityContent {
                name: a.name.clone(),
                icon: a.icon.name().to_string(),
                glyph: a.icon.glyph().to_string(),
                category: a.category,
            })
            .collect();

        let gallery = self
            .model
            .gallery
            .iter()
            .map(|img| GalleryContent {
                url: self.resolve_image(Some(&img.image)),
                category: img.category.clone(),
                caption: img.caption.clone(),
            })
            .collect();

        Ok(SiteContent {
            site_name: self.config.site_name.clone(),
            hero_image,
            rooms,
            amenities,
            gallery,
        })
    }

    /// Write the exported snapshot as pretty JSON, returning what was
    /// written so callers can summarize it without a second export.
    pub fn write_snapshot(&self, path: &Path) -> Result<SiteContent, SnapshotError> {
        let content = self.export()?;
        let json = serde_json::to_string_pretty(&content)?;
        std::fs::write(path, json)?;
        Ok(content)
    }
}

/// Failure writing the content snapshot.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("could not encode snapshot: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

// =============================================================================
// Exported snapshot shapes
// =============================================================================

/// Root of the `content.json` snapshot the public site fetches.
#[derive(Debug, Serialize)]
pub struct SiteContent {
    pub site_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hero_image: Option<String>,
    pub rooms: Vec<RoomContent>,
    pub amenities: Vec<AmenityContent>,
    pub gallery: Vec<GalleryContent>,
}

#[derive(Debug, Serialize)]
pub struct RoomContent {
    pub name: String,
    pub capacity: String,
    pub rate: crate::types::Rate,
    pub description: String,
    pub amenities: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unique_amenities: Vec<String>,
    pub featured: bool,
    pub image_url: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<RoomImageContent>,
}

#[derive(Debug, Serialize)]
pub struct RoomImageContent {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AmenityContent {
    pub name: String,
    pub icon: String,
    pub glyph: String,
    pub category: crate::types::AmenityCategory,
}

#[derive(Debug, Serialize)]
pub struct GalleryContent {
    pub url: String,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::tests::MockStore;
    use crate::test_helpers::{amenity, gallery_image, room, room_image};
    use tempfile::TempDir;

    fn service_with(store: MockStore) -> (TempDir, ContentService<MockStore>) {
        let tmp = TempDir::new().unwrap();
        let config = SiteConfig::default();
        let media = MediaStorage::new(tmp.path().join("media"));
        let overrides = OverrideCache::empty(config.overrides.max_entries);
        let service = ContentService::new(store, media, overrides, tmp.path().join("data"), config);
        (tmp, service)
    }

    fn seeded_mock() -> MockStore {
        let mock = MockStore::new();
        mock.insert_room(room("Suíte Premium", 0)).unwrap();
        mock.insert_room(room("Suíte Standard", 1)).unwrap();
        mock.insert_amenity(amenity("Internet", 0)).unwrap();
        mock.insert_gallery_image(gallery_image("hero-beach.jpg", "praia", 0))
            .unwrap();
        mock
    }

    // =========================================================================
    // Loading
    // =========================================================================

    #[test]
    fn refresh_populates_all_collections() {
        let (_tmp, mut service) = service_with(seeded_mock());
        assert_eq!(service.model().status, ContentStatus::Uninitialized);
        assert!(service.model().is_loading());

        service.refresh();

        let model = service.model();
        assert_eq!(model.status, ContentStatus::Ready);
        assert!(!model.is_loading());
        assert_eq!(model.rooms.len(), 2);
        assert_eq!(model.amenities.len(), 1);
        assert_eq!(model.gallery.len(), 1);
        assert!(model.warnings.is_empty());
    }

    #[test]
    fn failed_amenities_read_leaves_other_entities_loaded() {
        let mut mock = seeded_mock();
        mock.fail_amenities = true;
        let (_tmp, mut service) = service_with(mock);

        service.refresh();

        let model = service.model();
        assert_eq!(model.status, ContentStatus::Ready);
        assert_eq!(model.rooms.len(), 2);
        assert!(model.amenities.is_empty());
        assert_eq!(model.gallery.len(), 1);
        assert_eq!(model.warnings.len(), 1);
        assert_eq!(model.warnings[0].entity, "amenities");
    }

    #[test]
    fn refresh_fails_only_when_every_read_fails() {
        let mut mock = seeded_mock();
        mock.fail_rooms = true;
        mock.fail_amenities = true;
        mock.fail_gallery = true;
        let (_tmp, mut service) = service_with(mock);

        service.refresh();
        assert_eq!(service.model().status, ContentStatus::Failed);
        assert_eq!(service.model().warnings.len(), 3);
    }

    #[test]
    fn refresh_attaches_room_images_to_their_rooms() {
        let mock = seeded_mock();
        let room_id = mock.list_rooms().unwrap()[0].id;
        mock.insert_room_image(room_image(room_id, "rooms/a.jpg", 0))
            .unwrap();
        let (_tmp, mut service) = service_with(mock);

        service.refresh();
        assert_eq!(service.model().room_images[&room_id].len(), 1);
    }

    #[test]
    fn seed_defaults_loads_the_model() {
        let (_tmp, mut service) = service_with(MockStore::new());
        service.seed_defaults().unwrap();

        let model = service.model();
        assert_eq!(model.status, ContentStatus::Ready);
        assert!(!model.rooms.is_empty());
        assert!(!model.amenities.is_empty());
        assert!(!model.gallery.is_empty());
    }

    // =========================================================================
    // Mutations — re-fetch entities
    // =========================================================================

    #[test]
    fn create_room_refetches_confirmed_ordering() {
        let (_tmp, mut service) = service_with(seeded_mock());
        service.refresh();

        let created = service.create_room(room("Suíte Família", -1)).unwrap();
        assert!(created.id > 0);
        // Negative display_order sorts first in the re-fetched list
        assert_eq!(service.model().rooms[0].name, "Suíte Família");
    }

    #[test]
    fn delete_room_removes_it_from_the_model() {
        let (_tmp, mut service) = service_with(seeded_mock());
        service.refresh();
        let id = service.model().rooms[0].id;

        service.delete_room(id).unwrap();
        assert!(service.model().rooms.iter().all(|r| r.id != id));
    }

    #[test]
    fn failed_mutation_leaves_model_unchanged() {
        let (_tmp, mut service) = service_with(seeded_mock());
        service.refresh();
        let rooms_before: Vec<u64> = service.model().rooms.iter().map(|r| r.id).collect();

        // Updating a missing id fails at the store; the model must not move
        let result = service.update_room(999, room("Fantasma", 0));
        assert!(matches!(result, Err(StoreError::NotFound { .. })));
        let rooms_after: Vec<u64> = service.model().rooms.iter().map(|r| r.id).collect();
        assert_eq!(rooms_before, rooms_after);

        let result = service.create_room(room("", 0));
        assert!(matches!(result, Err(StoreError::Validation(_))));
        assert_eq!(
            service.model().rooms.len(),
            rooms_before.len()
        );
    }

    #[test]
    fn amenity_update_refetches_list() {
        let (_tmp, mut service) = service_with(seeded_mock());
        service.refresh();
        let existing = service.model().amenities[0].clone();

        let mut renamed = existing.clone();
        renamed.name = "Wi-Fi".to_string();
        service.update_amenity(existing.id, renamed).unwrap();

        assert_eq!(service.model().amenities[0].name, "Wi-Fi");
    }

    // =========================================================================
    // Mutations — gallery patches in place
    // =========================================================================

    #[test]
    fn add_gallery_image_patches_without_refetch() {
        let (_tmp, mut service) = service_with(seeded_mock());
        service.refresh();
        let lists_before = service.store().list_calls("gallery");

        let stored = service
            .add_gallery_image(gallery_image("praia/new.jpg", "praia", 5))
            .unwrap();

        assert!(service.model().gallery.iter().any(|img| img.id == stored.id));
        // Patch-based: no additional gallery list read was issued
        assert_eq!(service.store().list_calls("gallery"), lists_before);
    }

    #[test]
    fn gallery_patch_keeps_display_order_sorting() {
        let (_tmp, mut service) = service_with(seeded_mock());
        service.refresh();

        service
            .add_gallery_image(gallery_image("praia/first.jpg", "praia", -10))
            .unwrap();
        let orders: Vec<i64> = service
            .model()
            .gallery
            .iter()
            .map(|img| img.display_order)
            .collect();
        let mut sorted = orders.clone();
        sorted.sort();
        assert_eq!(orders, sorted);
    }

    #[test]
    fn remove_gallery_image_patches_model() {
        let (_tmp, mut service) = service_with(seeded_mock());
        service.refresh();
        let id = service.model().gallery[0].id;

        service.remove_gallery_image(id).unwrap();
        assert!(service.model().gallery.is_empty());

        // Second delete: not-found surfaces, model stays put
        assert!(matches!(
            service.remove_gallery_image(id),
            Err(StoreError::NotFound { .. })
        ));
        assert!(service.model().gallery.is_empty());
    }

    #[test]
    fn room_image_mutations_patch_group() {
        let (_tmp, mut service) = service_with(seeded_mock());
        service.refresh();
        let room_id = service.model().rooms[0].id;

        let stored = service
            .add_room_image(RoomImage {
                id: 0,
                room_id,
                image: "rooms/x.jpg".to_string(),
                caption: Some("Sacada".to_string()),
                display_order: 0,
            })
            .unwrap();
        assert_eq!(service.model().room_images[&room_id].len(), 1);

        service.remove_room_image(stored.id).unwrap();
        assert!(service.model().room_images[&room_id].is_empty());
    }

    // =========================================================================
    // Media, overrides, export
    // =========================================================================

    #[test]
    fn upload_image_stores_and_resolves() {
        let (_tmp, mut service) = service_with(seeded_mock());
        service.refresh();

        let path = service
            .upload_image("quarto.jpg", "image/jpeg", b"jpeg bytes", "rooms")
            .unwrap();
        let url = service.resolve_image(Some(&path));
        assert_eq!(url, format!("/media/{path}"));
    }

    #[test]
    fn override_wins_over_url_construction() {
        let (_tmp, mut service) = service_with(seeded_mock());
        service
            .override_image("rooms/x.jpg", "data:image/png;base64,QQ==")
            .unwrap();
        assert_eq!(
            service.resolve_image(Some("rooms/x.jpg")),
            "data:image/png;base64,QQ=="
        );

        assert!(service.clear_override("rooms/x.jpg").unwrap());
        assert_eq!(
            service.resolve_image(Some("rooms/x.jpg")),
            "/media/rooms/x.jpg"
        );
    }

    #[test]
    fn hero_slot_roundtrip() {
        let (_tmp, mut service) = service_with(seeded_mock());
        service.refresh();
        assert_eq!(service.hero_image().unwrap(), None);

        let stored = service
            .set_hero_image("hero.jpg", "image/jpeg", b"hero bytes")
            .unwrap();
        assert_eq!(service.hero_image().unwrap(), Some(stored.clone()));

        // Replacing leaves exactly one object in the slot
        let replaced = service
            .set_hero_image("hero2.jpg", "image/jpeg", b"new hero")
            .unwrap();
        assert_eq!(service.hero_image().unwrap(), Some(replaced));
    }

    #[test]
    fn export_resolves_every_reference() {
        let (_tmp, mut service) = service_with(seeded_mock());
        service.refresh();

        let content = service.export().unwrap();
        assert_eq!(content.site_name, "Pousada Manicaca");
        assert_eq!(content.rooms.len(), 2);
        // Seeded rooms have no image reference → placeholder
        assert!(
            content
                .rooms
                .iter()
                .all(|r| r.image_url == "/placeholder.svg")
        );
        assert_eq!(content.gallery[0].url, "/assets/hero-beach.jpg");
        assert_eq!(content.amenities[0].icon, "sparkles");
    }

    #[test]
    fn write_snapshot_emits_parseable_json() {
        let (tmp, mut service) = service_with(seeded_mock());
        service.refresh();

        let path = tmp.path().join("content.json");
        service.write_snapshot(&path).unwrap();

        let parsed: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed["rooms"].as_array().unwrap().len(), 2);
        assert!(parsed["hero_image"].is_null() || parsed.get("hero_image").is_none());
    }
}
