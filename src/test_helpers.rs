//! Shared test utilities for the pousada-cms test suite.
//!
//! Record builders with sensible defaults so tests only spell out the
//! fields they are exercising. Ids are 0 — the store assigns real ones on
//! insert.

use crate::types::{Amenity, AmenityCategory, AmenityIcon, GalleryImage, Rate, Room, RoomImage};

pub fn room(name: &str, display_order: i64) -> Room {
    Room {
        id: 0,
        name: name.to_string(),
        capacity: "2 adultos".to_string(),
        rate: Rate::Seasonal {
            low_season: "240".to_string(),
            high_season: "275".to_string(),
        },
        description: "Suíte com sacada".to_string(),
        amenities: vec!["Ar Condicionado".to_string()],
        unique_amenities: vec![],
        featured: false,
        image: None,
        display_order,
    }
}

pub fn amenity(name: &str, display_order: i64) -> Amenity {
    Amenity {
        id: 0,
        name: name.to_string(),
        icon: AmenityIcon::Sparkles,
        category: AmenityCategory::Common,
        display_order,
    }
}

pub fn gallery_image(reference: &str, category: &str, display_order: i64) -> GalleryImage {
    GalleryImage {
        id: 0,
        image: reference.to_string(),
        category: category.to_string(),
        caption: None,
        display_order,
    }
}

pub fn room_image(room_id: u64, reference: &str, display_order: i64) -> RoomImage {
    RoomImage {
        id: 0,
        room_id,
        image: reference.to_string(),
        caption: None,
        display_order,
    }
}
