//! The content store adapter.
//!
//! [`ContentStore`] is the seam between the content service and whatever
//! persists the data. It exposes one operation per entity action — list,
//! insert, update, delete — for the four collections the site owns:
//! `room_types`, `amenities`, `gallery_images`, and the `room_images` child
//! collection keyed by room id.
//!
//! The production implementation is [`JsonStore`]: each collection is a JSON
//! document in the data directory, read whole and written whole. That is the
//! right shape for a guesthouse with a dozen rooms; a remote row store would
//! implement the same trait.
//!
//! ## Contract
//!
//! - Listings are ordered by `display_order`, ties broken by id, so ordering
//!   is total and stable across backends.
//! - Inserts assign the id (max + 1 per collection); the incoming id is
//!   ignored. The store is the source of truth for identity.
//! - Required fields are validated before the backend is touched; a
//!   [`StoreError::Validation`] never leaves a partial write behind.
//! - Updates and deletes of a missing id fail with [`StoreError::NotFound`].
//!   Delete is unconditional: deleting a room does NOT cascade to its
//!   `room_images` — orphan cleanup is the caller's job, matching the
//!   backend's behavior rather than inventing referential integrity.
//! - No operation is transactional across collections.
//! - A corrupt collection file is an error, not an empty list: silently
//!   treating it as empty would let the next write destroy the data.

use crate::types::{Amenity, GalleryImage, Room, RoomImage};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("corrupt collection '{collection}': {message}")]
    Corrupt {
        collection: &'static str,
        message: String,
    },
    #[error("validation error: {0}")]
    Validation(String),
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: u64 },
}

/// Read/write facade over the persisted content collections.
///
/// `Sync` so the service can issue the initial listings concurrently.
pub trait ContentStore: Sync {
    fn list_rooms(&self) -> Result<Vec<Room>, StoreError>;
    fn insert_room(&self, room: Room) -> Result<Room, StoreError>;
    fn update_room(&self, id: u64, room: Room) -> Result<Room, StoreError>;
    fn delete_room(&self, id: u64) -> Result<(), StoreError>;

    fn list_amenities(&self) -> Result<Vec<Amenity>, StoreError>;
    fn insert_amenity(&self, amenity: Amenity) -> Result<Amenity, StoreError>;
    fn update_amenity(&self, id: u64, amenity: Amenity) -> Result<Amenity, StoreError>;
    fn delete_amenity(&self, id: u64) -> Result<(), StoreError>;

    fn list_gallery_images(&self) -> Result<Vec<GalleryImage>, StoreError>;
    fn insert_gallery_image(&self, image: GalleryImage) -> Result<GalleryImage, StoreError>;
    fn update_gallery_image(&self, id: u64, image: GalleryImage)
    -> Result<GalleryImage, StoreError>;
    fn delete_gallery_image(&self, id: u64) -> Result<(), StoreError>;

    /// Ordered secondary images for one room.
    fn list_room_images(&self, room_id: u64) -> Result<Vec<RoomImage>, StoreError>;
    fn insert_room_image(&self, image: RoomImage) -> Result<RoomImage, StoreError>;
    fn delete_room_image(&self, id: u64) -> Result<(), StoreError>;
}

// =============================================================================
// Record plumbing shared by every collection
// =============================================================================

/// Per-entity knowledge the generic collection operations need.
trait Record: Clone {
    const COLLECTION: &'static str;
    const ENTITY: &'static str;

    fn id(&self) -> u64;
    fn set_id(&mut self, id: u64);
    fn display_order(&self) -> i64;

    /// Required-field check, run before any write reaches the backend.
    fn validate(&self) -> Result<(), StoreError>;
}

impl Record for Room {
    const COLLECTION: &'static str = "room_types";
    const ENTITY: &'static str = "room";

    fn id(&self) -> u64 {
        self.id
    }
    fn set_id(&mut self, id: u64) {
        self.id = id;
    }
    fn display_order(&self) -> i64 {
        self.display_order
    }

    fn validate(&self) -> Result<(), StoreError> {
        if self.name.trim().is_empty() {
            return Err(StoreError::Validation("room name is required".into()));
        }
        if self.capacity.trim().is_empty() {
            return Err(StoreError::Validation("room capacity is required".into()));
        }
        Ok(())
    }
}

impl Record for Amenity {
    const COLLECTION: &'static str = "amenities";
    const ENTITY: &'static str = "amenity";

    fn id(&self) -> u64 {
        self.id
    }
    fn set_id(&mut self, id: u64) {
        self.id = id;
    }
    fn display_order(&self) -> i64 {
        self.display_order
    }

    fn validate(&self) -> Result<(), StoreError> {
        if self.name.trim().is_empty() {
            return Err(StoreError::Validation("amenity name is required".into()));
        }
        Ok(())
    }
}

impl Record for GalleryImage {
    const COLLECTION: &'static str = "gallery_images";
    const ENTITY: &'static str = "gallery image";

    fn id(&self) -> u64 {
        self.id
    }
    fn set_id(&mut self, id: u64) {
        self.id = id;
    }
    fn display_order(&self) -> i64 {
        self.display_order
    }

    fn validate(&self) -> Result<(), StoreError> {
        if self.image.trim().is_empty() {
            return Err(StoreError::Validation(
                "gallery image reference is required".into(),
            ));
        }
        if self.category.trim().is_empty() {
            return Err(StoreError::Validation(
                "gallery image category is required".into(),
            ));
        }
        Ok(())
    }
}

impl Record for RoomImage {
    const COLLECTION: &'static str = "room_images";
    const ENTITY: &'static str = "room image";

    fn id(&self) -> u64 {
        self.id
    }
    fn set_id(&mut self, id: u64) {
        self.id = id;
    }
    fn display_order(&self) -> i64 {
        self.display_order
    }

    fn validate(&self) -> Result<(), StoreError> {
        if self.image.trim().is_empty() {
            return Err(StoreError::Validation(
                "room image reference is required".into(),
            ));
        }
        Ok(())
    }
}

/// Stable presentation order: `display_order`, then id.
fn sort_records<T: Record>(records: &mut [T]) {
    records.sort_by_key(|r| (r.display_order(), r.id()));
}

/// Assign the next id and append. The incoming id is ignored.
fn insert_record<T: Record>(records: &mut Vec<T>, mut record: T) -> Result<T, StoreError> {
    record.validate()?;
    let next_id = records.iter().map(Record::id).max().unwrap_or(0) + 1;
    record.set_id(next_id);
    records.push(record.clone());
    Ok(record)
}

/// Replace the record with the given id, keeping that id.
fn update_record<T: Record>(records: &mut [T], id: u64, mut record: T) -> Result<T, StoreError> {
    record.validate()?;
    record.set_id(id);
    match records.iter_mut().find(|r| r.id() == id) {
        Some(slot) => {
            *slot = record.clone();
            Ok(record)
        }
        None => Err(StoreError::NotFound {
            entity: T::ENTITY,
            id,
        }),
    }
}

fn delete_record<T: Record>(records: &mut Vec<T>, id: u64) -> Result<(), StoreError> {
    let before = records.len();
    records.retain(|r| r.id() != id);
    if records.len() == before {
        return Err(StoreError::NotFound {
            entity: T::ENTITY,
            id,
        });
    }
    Ok(())
}

// =============================================================================
// JsonStore — per-collection JSON documents in the data directory
// =============================================================================

/// Production store: one JSON array per collection under `data_dir`.
#[derive(Debug, Clone)]
pub struct JsonStore {
    data_dir: PathBuf,
}

impl JsonStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Whether any collection file exists yet. `init` uses this to avoid
    /// re-seeding a data dir that already has content.
    pub fn has_collections(&self) -> bool {
        [
            Room::COLLECTION,
            Amenity::COLLECTION,
            GalleryImage::COLLECTION,
            RoomImage::COLLECTION,
        ]
        .iter()
        .any(|name| self.collection_path(name).exists())
    }

    fn collection_path(&self, name: &str) -> PathBuf {
        self.data_dir.join(format!("{name}.json"))
    }

    /// Read a whole collection. Missing file = empty collection; unreadable
    /// or unparsable file = error, so a later write can't clobber data.
    fn read<T: Record + DeserializeOwned>(&self) -> Result<Vec<T>, StoreError> {
        let path = self.collection_path(T::COLLECTION);
        match fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).map_err(|e| StoreError::Corrupt {
                collection: T::COLLECTION,
                message: e.to_string(),
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn write<T: Record + Serialize>(&self, records: &[T]) -> Result<(), StoreError> {
        fs::create_dir_all(&self.data_dir)?;
        let json = serde_json::to_string_pretty(records).map_err(|e| StoreError::Corrupt {
            collection: T::COLLECTION,
            message: e.to_string(),
        })?;
        fs::write(self.collection_path(T::COLLECTION), json)?;
        Ok(())
    }

    fn list<T: Record + DeserializeOwned>(&self) -> Result<Vec<T>, StoreError> {
        let mut records = self.read::<T>()?;
        sort_records(&mut records);
        Ok(records)
    }

    fn insert<T: Record + Serialize + DeserializeOwned>(&self, record: T) -> Result<T, StoreError> {
        record.validate()?;
        let mut records = self.read::<T>()?;
        let stored = insert_record(&mut records, record)?;
        self.write(&records)?;
        Ok(stored)
    }

    fn update<T: Record + Serialize + DeserializeOwned>(
        &self,
        id: u64,
        record: T,
    ) -> Result<T, StoreError> {
        record.validate()?;
        let mut records = self.read::<T>()?;
        let stored = update_record(&mut records, id, record)?;
        self.write(&records)?;
        Ok(stored)
    }

    fn delete<T: Record + Serialize + DeserializeOwned>(&self, id: u64) -> Result<(), StoreError> {
        let mut records = self.read::<T>()?;
        delete_record(&mut records, id)?;
        self.write(&records)
    }
}

impl ContentStore for JsonStore {
    fn list_rooms(&self) -> Result<Vec<Room>, StoreError> {
        self.list()
    }
    fn insert_room(&self, room: Room) -> Result<Room, StoreError> {
        self.insert(room)
    }
    fn update_room(&self, id: u64, room: Room) -> Result<Room, StoreError> {
        self.update(id, room)
    }
    fn delete_room(&self, id: u64) -> Result<(), StoreError> {
        self.delete::<Room>(id)
    }

    fn list_amenities(&self) -> Result<Vec<Amenity>, StoreError> {
        self.list()
    }
    fn insert_amenity(&self, amenity: Amenity) -> Result<Amenity, StoreError> {
        self.insert(amenity)
    }
    fn update_amenity(&self, id: u64, amenity: Amenity) -> Result<Amenity, StoreError> {
        self.update(id, amenity)
    }
    fn delete_amenity(&self, id: u64) -> Result<(), StoreError> {
        self.delete::<Amenity>(id)
    }

    fn list_gallery_images(&self) -> Result<Vec<GalleryImage>, StoreError> {
        self.list()
    }
    fn insert_gallery_image(&self, image: GalleryImage) -> Result<GalleryImage, StoreError> {
        self.insert(image)
    }
    fn update_gallery_image(
        &self,
        id: u64,
        image: GalleryImage,
    ) -> Result<GalleryImage, StoreError> {
        self.update(id, image)
    }
    fn delete_gallery_image(&self, id: u64) -> Result<(), StoreError> {
        self.delete::<GalleryImage>(id)
    }

    fn list_room_images(&self, room_id: u64) -> Result<Vec<RoomImage>, StoreError> {
        let mut images: Vec<RoomImage> = self
            .read::<RoomImage>()?
            .into_iter()
            .filter(|img| img.room_id == room_id)
            .collect();
        sort_records(&mut images);
        Ok(images)
    }
    fn insert_room_image(&self, image: RoomImage) -> Result<RoomImage, StoreError> {
        self.insert(image)
    }
    fn delete_room_image(&self, id: u64) -> Result<(), StoreError> {
        self.delete::<RoomImage>(id)
    }
}

// =============================================================================
// Tests
// =============================================================================
