//! Entity records persisted in the content store.
//!
//! These types are serialized to JSON in the per-collection store files and
//! in the exported site snapshot, so field names here are the wire format.
//! Every entity carries a `display_order` integer that defines presentation
//! sequence; it is not identity-bearing, and listings break ties by id so
//! ordering stays deterministic.

use serde::{Deserialize, Serialize};

/// A bookable room type (the site calls them suites).
///
/// `amenities` holds ordered labels referencing [`Amenity::name`] by value.
/// This is a weak reference: renaming an amenity does not cascade to rooms
/// that mention the old label, and duplicate labels are legal.
/// `unique_amenities` lists extras only this suite has, rendered separately
/// from the shared list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    /// Assigned by the store on insert; the value on the way in is ignored.
    pub id: u64,
    pub name: String,
    /// Free-text occupancy, e.g. "2 adultos" or "2 adultos + 1 criança".
    pub capacity: String,
    pub rate: Rate,
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub amenities: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unique_amenities: Vec<String>,
    /// Drives the "Mais Procurado" badge on the public site.
    #[serde(default)]
    pub featured: bool,
    /// Primary image reference: a bundled asset name or a stored media path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub display_order: i64,
}

/// Nightly rate, either flat or split by season.
///
/// Rates are display strings ("250", not cents) — the site shows them as
/// "R$ 250" and the owner types them the same way. The seasonal pair maps
/// to the pricing table's Abr–Nov / Dez–Mar split.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Rate {
    Nightly(String),
    Seasonal {
        low_season: String,
        high_season: String,
    },
}

impl Rate {
    /// One-line rendering for listings: "250" or "250 / 290".
    pub fn summary(&self) -> String {
        match self {
            Rate::Nightly(v) => v.clone(),
            Rate::Seasonal {
                low_season,
                high_season,
            } => format!("{low_season} / {high_season}"),
        }
    }
}

/// A secondary photo attached to one room, shown in the room's gallery
/// modal. Child records of [`Room`] keyed by `room_id`; deleting a room
/// does not cascade here (see the store docs).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomImage {
    pub id: u64,
    pub room_id: u64,
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(default)]
    pub display_order: i64,
}

/// A guesthouse amenity ("Piscina com Quiosque", "Ar Condicionado", ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Amenity {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub icon: AmenityIcon,
    #[serde(default)]
    pub category: AmenityCategory,
    #[serde(default)]
    pub display_order: i64,
}

/// Where an amenity is rendered: inside the suites section or in the
/// common-area grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmenityCategory {
    Suite,
    #[default]
    Common,
}

/// Amenity icon as a closed enumeration.
///
/// The stored value is a symbol name ("wifi", "fire", ...) or a raw emoji
/// carried through in [`AmenityIcon::Emoji`]. Unrecognized symbol names
/// fall back to [`AmenityIcon::Sparkles`] rather than erroring — an icon
/// is presentation, never a data error. Legacy records that stored the
/// component-style names ("WifiIcon") parse to the same variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AmenityIcon {
    Wifi,
    Tv,
    Sun,
    Home,
    Sparkles,
    Fire,
    Users,
    Beaker,
    Cube,
    Globe,
    Heart,
    Star,
    /// A raw emoji entered in the admin panel, carried through verbatim.
    Emoji(String),
}

impl Default for AmenityIcon {
    fn default() -> Self {
        AmenityIcon::Sparkles
    }
}

impl AmenityIcon {
    /// Canonical symbol name, or the emoji itself for [`AmenityIcon::Emoji`].
    pub fn name(&self) -> &str {
        match self {
            AmenityIcon::Wifi => "wifi",
            AmenityIcon::Tv => "tv",
            AmenityIcon::Sun => "sun",
            AmenityIcon::Home => "home",
            AmenityIcon::Sparkles => "sparkles",
            AmenityIcon::Fire => "fire",
            AmenityIcon::Users => "users",
            AmenityIcon::Beaker => "beaker",
            AmenityIcon::Cube => "cube",
            AmenityIcon::Globe => "globe",
            AmenityIcon::Heart => "heart",
            AmenityIcon::Star => "star",
            AmenityIcon::Emoji(e) => e,
        }
    }

    /// Terminal-friendly glyph used by the CLI inventory display.
    pub fn glyph(&self) -> &str {
        match self {
            AmenityIcon::Wifi => "\u{1F4F6}",
            AmenityIcon::Tv => "\u{1F4FA}",
            AmenityIcon::Sun => "\u{2600}\u{FE0F}",
            AmenityIcon::Home => "\u{1F3E0}",
            AmenityIcon::Sparkles => "\u{2728}",
            AmenityIcon::Fire => "\u{1F525}",
            AmenityIcon::Users => "\u{1F465}",
            AmenityIcon::Beaker => "\u{2697}\u{FE0F}",
            AmenityIcon::Cube => "\u{1F4E6}",
            AmenityIcon::Globe => "\u{1F310}",
            AmenityIcon::Heart => "\u{2764}\u{FE0F}",
            AmenityIcon::Star => "\u{2B50}",
            AmenityIcon::Emoji(e) => e,
        }
    }
}

impl From<String> for AmenityIcon {
    fn from(value: String) -> Self {
        // Legacy rows stored heroicon component names; strip the suffix so
        // "WifiIcon" and "wifi" land on the same variant.
        let trimmed = value.trim();
        let symbol = trimmed.strip_suffix("Icon").unwrap_or(trimmed);
        match symbol.to_ascii_lowercase().as_str() {
            "wifi" => AmenityIcon::Wifi,
            "tv" => AmenityIcon::Tv,
            "sun" => AmenityIcon::Sun,
            "home" => AmenityIcon::Home,
            "sparkles" => AmenityIcon::Sparkles,
            "fire" => AmenityIcon::Fire,
            "users" | "usergroup" => AmenityIcon::Users,
            "beaker" => AmenityIcon::Beaker,
            "cube" => AmenityIcon::Cube,
            "globe" | "globealt" => AmenityIcon::Globe,
            "heart" => AmenityIcon::Heart,
            "star" => AmenityIcon::Star,
            _ if !trimmed.is_empty() && !trimmed.is_ascii() => {
                AmenityIcon::Emoji(trimmed.to_string())
            }
            _ => AmenityIcon::Sparkles,
        }
    }
}

impl From<AmenityIcon> for String {
    fn from(icon: AmenityIcon) -> Self {
        icon.name().to_string()
    }
}

/// A photo in one of the site-wide galleries.
///
/// `category` is a free grouping key, not a foreign key — the site groups
/// by it ("pousada", "praia") but the model enforces no closed set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalleryImage {
    pub id: u64,
    pub image: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(default)]
    pub display_order: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // Rate serialization
    // =========================================================================

    #[test]
    fn nightly_rate_serializes_as_string() {
        let rate = Rate::Nightly("250".into());
        assert_eq!(serde_json::to_string(&rate).unwrap(), r#""250""#);
    }

    #[test]
    fn seasonal_rate_serializes_as_pair() {
        let rate = Rate::Seasonal {
            low_season: "240".into(),
            high_season: "275".into(),
        };
        let json = serde_json::to_value(&rate).unwrap();
        assert_eq!(json["low_season"], "240");
        assert_eq!(json["high_season"], "275");
    }

    #[test]
    fn rate_roundtrip_both_shapes() {
        for rate in [
            Rate::Nightly("199".into()),
            Rate::Seasonal {
                low_season: "240".into(),
                high_season: "275".into(),
            },
        ] {
            let json = serde_json::to_string(&rate).unwrap();
            let back: Rate = serde_json::from_str(&json).unwrap();
            assert_eq!(back, rate);
        }
    }

    #[test]
    fn rate_summary_formats() {
        assert_eq!(Rate::Nightly("250".into()).summary(), "250");
        assert_eq!(
            Rate::Seasonal {
                low_season: "240".into(),
                high_season: "275".into()
            }
            .summary(),
            "240 / 275"
        );
    }

    // =========================================================================
    // AmenityIcon parsing
    // =========================================================================

    #[test]
    fn icon_parses_symbol_names() {
        assert_eq!(AmenityIcon::from("wifi".to_string()), AmenityIcon::Wifi);
        assert_eq!(AmenityIcon::from("fire".to_string()), AmenityIcon::Fire);
        assert_eq!(AmenityIcon::from("star".to_string()), AmenityIcon::Star);
    }

    #[test]
    fn icon_parses_legacy_component_names() {
        assert_eq!(AmenityIcon::from("WifiIcon".to_string()), AmenityIcon::Wifi);
        assert_eq!(
            AmenityIcon::from("UserGroupIcon".to_string()),
            AmenityIcon::Users
        );
        assert_eq!(
            AmenityIcon::from("GlobeAltIcon".to_string()),
            AmenityIcon::Globe
        );
    }

    #[test]
    fn icon_keeps_raw_emoji() {
        let icon = AmenityIcon::from("\u{1F3D6}\u{FE0F}".to_string());
        assert_eq!(icon, AmenityIcon::Emoji("\u{1F3D6}\u{FE0F}".to_string()));
        assert_eq!(icon.glyph(), "\u{1F3D6}\u{FE0F}");
    }

    #[test]
    fn icon_unrecognized_name_falls_back() {
        assert_eq!(
            AmenityIcon::from("jacuzzi".to_string()),
            AmenityIcon::Sparkles
        );
        assert_eq!(AmenityIcon::from(String::new()), AmenityIcon::Sparkles);
    }

    #[test]
    fn icon_roundtrips_through_serde() {
        let amenity = Amenity {
            id: 1,
            name: "Internet".into(),
            icon: AmenityIcon::Wifi,
            category: AmenityCategory::Common,
            display_order: 0,
        };
        let json = serde_json::to_string(&amenity).unwrap();
        assert!(json.contains(r#""icon":"wifi""#));
        let back: Amenity = serde_json::from_str(&json).unwrap();
        assert_eq!(back.icon, AmenityIcon::Wifi);
    }

    #[test]
    fn emoji_icon_roundtrips_through_serde() {
        let icon = AmenityIcon::Emoji("\u{1F30A}".to_string());
        let json = serde_json::to_string(&icon).unwrap();
        let back: AmenityIcon = serde_json::from_str(&json).unwrap();
        assert_eq!(back, icon);
    }

    // =========================================================================
    // Room serialization
    // =========================================================================

    #[test]
    fn room_optional_fields_omitted_when_empty() {
        let room = Room {
            id: 1,
            name: "Suíte Standard".into(),
            capacity: "2 adultos".into(),
            rate: Rate::Nightly("240".into()),
            description: String::new(),
            amenities: vec![],
            unique_amenities: vec![],
            featured: false,
            image: None,
            display_order: 0,
        };
        let json = serde_json::to_string(&room).unwrap();
        assert!(!json.contains("amenities"));
        assert!(!json.contains("image"));
    }

    #[test]
    fn room_deserializes_with_missing_defaults() {
        let json = r#"{"id":3,"name":"Suíte Premium","capacity":"2 adultos","rate":"250","description":"Vista para o mar"}"#;
        let room: Room = serde_json::from_str(json).unwrap();
        assert_eq!(room.display_order, 0);
        assert!(!room.featured);
        assert!(room.amenities.is_empty());
        assert_eq!(room.rate, Rate::Nightly("250".into()));
    }

    #[test]
    fn amenity_category_defaults_to_common() {
        let json = r#"{"id":1,"name":"Estacionamento","icon":"cube"}"#;
        let amenity: Amenity = serde_json::from_str(json).unwrap();
        assert_eq!(amenity.category, AmenityCategory::Common);
    }
}
