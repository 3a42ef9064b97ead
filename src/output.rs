//! CLI output formatting.
//!
//! # Information-First Display
//!
//! Output is **information-centric, not file-centric**. The primary display
//! for every entity (room, amenity, gallery image) is its semantic identity:
//! positional index plus name. Storage references and secondary details are
//! indented context lines, so the output reads as a content inventory while
//! still letting the owner trace a record back to a stored file.
//!
//! # Output Format
//!
//! ```text
//! Rooms
//! 001 Suíte Premium (R$ 250 / 290) [featured]
//!     Capacity: 2 adultos
//!     Amenities: Ar Condicionado, TV a Cabo, Frigobar
//!     Image: room-interior.jpg
//!     Photos: 2
//!
//! Amenities
//! 001 ☀️ Piscina com Quiosque
//! 006 ✨ Ar Condicionado (suite)
//!
//! Gallery
//! praia (2 images)
//!     001 Vista da praia
//!         Source: hero-beach.jpg
//!
//! 3 rooms, 9 amenities, 5 gallery images
//! ```
//!
//! # Architecture
//!
//! Each view has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure — no I/O, no side effects. Load warnings are printed
//! to stderr by their own wrapper so piping stdout stays clean.

use crate::service::{ContentModel, LoadWarning, SiteContent};
use crate::types::{AmenityCategory, GalleryImage};
use std::collections::BTreeMap;

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Group gallery images by category, preserving display order inside each
/// group and first-appearance order across groups.
fn group_by_category(gallery: &[GalleryImage]) -> Vec<(&str, Vec<&GalleryImage>)> {
    let mut order: Vec<&str> = Vec::new();
    let mut groups: BTreeMap<&str, Vec<&GalleryImage>> = BTreeMap::new();
    for image in gallery {
        let category = image.category.as_str();
        if !groups.contains_key(category) {
            order.push(category);
        }
        groups.entry(category).or_default().push(image);
    }
    order
        .into_iter()
        .map(|category| (category, groups.remove(category).unwrap_or_default()))
        .collect()
}

// ============================================================================
// Content inventory
// ============================================================================

/// Format the full content inventory (used by `check` and after `init`).
pub fn format_content_output(model: &ContentModel) -> Vec<String> {
    let mut lines = format_rooms_output(model);
    lines.push(String::new());
    lines.extend(format_amenities_output(model));
    lines.push(String::new());
    lines.extend(format_gallery_output(model));
    lines.push(String::new());
    lines.push(format!(
        "{} rooms, {} amenities, {} gallery images",
        model.rooms.len(),
        model.amenities.len(),
        model.gallery.len()
    ));
    lines
}

/// Format the rooms section.
pub fn format_rooms_output(model: &ContentModel) -> Vec<String> {
    let mut lines = Vec::new();
    lines.push("Rooms".to_string());
    for (i, room) in model.rooms.iter().enumerate() {
        let marker = if room.featured { " [featured]" } else { "" };
        lines.push(format!(
            "{} {} (R$ {}){}",
            format_index(i + 1),
            room.name,
            room.rate.summary(),
            marker
        ));
        lines.push(format!("{}Capacity: {}", indent(1), room.capacity));
        if !room.amenities.is_empty() {
            lines.push(format!("{}Amenities: {}", indent(1), room.amenities.join(", ")));
        }
        if !room.unique_amenities.is_empty() {
            lines.push(format!(
                "{}Unique: {}",
                indent(1),
                room.unique_amenities.join(", ")
            ));
        }
        if let Some(ref image) = room.image {
            lines.push(format!("{}Image: {}", indent(1), image));
        }
        let photo_count = model
            .room_images
            .get(&room.id)
            .map(Vec::len)
            .unwrap_or_default();
        if photo_count > 0 {
            lines.push(format!("{}Photos: {}", indent(1), photo_count));
        }
    }
    lines
}

/// Format the amenities section.
pub fn format_amenities_output(model: &ContentModel) -> Vec<String> {
    let mut lines = Vec::new();
    lines.push("Amenities".to_string());
    for (i, amenity) in model.amenities.iter().enumerate() {
        let scope = match amenity.category {
            AmenityCategory::Suite => " (suite)",
            AmenityCategory::Common => "",
        };
        lines.push(format!(
            "{} {} {}{}",
            format_index(i + 1),
            amenity.icon.glyph(),
            amenity.name,
            scope
        ));
    }
    lines
}

/// Format the gallery section, grouped by category.
pub fn format_gallery_output(model: &ContentModel) -> Vec<String> {
    let mut lines = Vec::new();
    lines.push("Gallery".to_string());
    for (category, images) in group_by_category(&model.gallery) {
        lines.push(format!("{} ({} images)", category, images.len()));
        for (i, image) in images.iter().enumerate() {
            let label = image.caption.as_deref().unwrap_or(&image.image);
            lines.push(format!("{}{} {}", indent(1), format_index(i + 1), label));
            if image.caption.is_some() {
                lines.push(format!("{}Source: {}", indent(2), image.image));
            }
        }
    }
    lines
}

/// Print the content inventory to stdout.
pub fn print_content_output(model: &ContentModel) {
    for line in format_content_output(model) {
        println!("{}", line);
    }
}

/// Print the rooms section to stdout.
pub fn print_rooms_output(model: &ContentModel) {
    for line in format_rooms_output(model) {
        println!("{}", line);
    }
}

/// Print the amenities section to stdout.
pub fn print_amenities_output(model: &ContentModel) {
    for line in format_amenities_output(model) {
        println!("{}", line);
    }
}

/// Print the gallery section to stdout.
pub fn print_gallery_output(model: &ContentModel) {
    for line in format_gallery_output(model) {
        println!("{}", line);
    }
}

// ============================================================================
// Load warnings
// ============================================================================

/// Format load warnings, one line each.
pub fn format_warnings(warnings: &[LoadWarning]) -> Vec<String> {
    warnings
        .iter()
        .map(|w| format!("warning: {}", w))
        .collect()
}

/// Print load warnings to stderr.
pub fn print_warnings(warnings: &[LoadWarning]) {
    for line in format_warnings(warnings) {
        eprintln!("{}", line);
    }
}

// ============================================================================
// Snapshot summary
// ============================================================================

/// Format the `snapshot` command summary.
pub fn format_snapshot_output(content: &SiteContent, destination: &str) -> Vec<String> {
    let mut lines = Vec::new();
    lines.push(format!(
        "Exported {} rooms, {} amenities, {} gallery images \u{2192} {}",
        content.rooms.len(),
        content.amenities.len(),
        content.gallery.len(),
        destination
    ));
    if let Some(ref hero) = content.hero_image {
        lines.push(format!("{}Hero: {}", indent(1), hero));
    }
    lines
}

/// Print the snapshot summary to stdout.
pub fn print_snapshot_output(content: &SiteContent, destination: &str) {
    for line in format_snapshot_output(content, destination) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================
