//! Compiled-in default content.
//!
//! A fresh install starts from the same rooms, amenities, and gallery the
//! site launched with, referencing the bundled assets by bare name. `init`
//! writes these into the store once; after that the store is the source of
//! truth and this module is never consulted again.

use crate::types::{Amenity, AmenityCategory, AmenityIcon, GalleryImage, Rate, Room};

pub fn default_rooms() -> Vec<Room> {
    vec![
        Room {
            id: 0,
            name: "Suíte Premium".to_string(),
            capacity: "2 adultos".to_string(),
            rate: Rate::Seasonal {
                low_season: "250".to_string(),
                high_season: "290".to_string(),
            },
            description: "Suíte mais ampla, com vista para o mar e sacada individual."
                .to_string(),
            amenities: vec![
                "Ar Condicionado".to_string(),
                "TV a Cabo".to_string(),
                "Frigobar".to_string(),
                "Internet".to_string(),
            ],
            unique_amenities: vec!["Vista para o mar".to_string()],
            featured: true,
            image: Some("room-interior.jpg".to_string()),
            display_order: 0,
        },
        Room {
            id: 0,
            name: "Suíte Standard".to_string(),
            capacity: "2 adultos".to_string(),
            rate: Rate::Seasonal {
                low_season: "240".to_string(),
                high_season: "275".to_string(),
            },
            description: "Acomodação confortável com sacada individual e frigobar."
                .to_string(),
            amenities: vec![
                "Ar Condicionado".to_string(),
                "TV a Cabo".to_string(),
                "Frigobar".to_string(),
                "Internet".to_string(),
            ],
            unique_amenities: vec![],
            featured: false,
            image: Some("room-interior.jpg".to_string()),
            display_order: 1,
        },
        Room {
            id: 0,
            name: "Suíte Família".to_string(),
            capacity: "2 adultos + 1 criança".to_string(),
            rate: Rate::Seasonal {
                low_season: "240".to_string(),
                high_season: "275".to_string(),
            },
            description: "Espaço extra para famílias, próxima à área da piscina."
                .to_string(),
            amenities: vec![
                "Ar Condicionado".to_string(),
                "TV a Cabo".to_string(),
                "Frigobar".to_string(),
            ],
            unique_amenities: vec!["Cama extra".to_string()],
            featured: false,
            image: Some("terrace-view.jpg".to_string()),
            display_order: 2,
        },
    ]
}

pub fn default_amenities() -> Vec<Amenity> {
    let common = [
        ("Piscina com Quiosque", AmenityIcon::Sun),
        ("Churrasqueira", AmenityIcon::Fire),
        ("Estacionamento", AmenityIcon::Cube),
        ("Área de Café da Manhã", AmenityIcon::Home),
        ("Internet", AmenityIcon::Wifi),
    ];
    let suite = [
        ("Ar Condicionado", AmenityIcon::Sparkles),
        ("TV a Cabo", AmenityIcon::Tv),
        ("Frigobar nas Suítes", AmenityIcon::Beaker),
        ("Sacada Individual", AmenityIcon::Star),
    ];

    common
        .into_iter()
        .map(|(name, icon)| (name, icon, AmenityCategory::Common))
        .chain(
            suite
                .into_iter()
                .map(|(name, icon)| (name, icon, AmenityCategory::Suite)),
        )
        .enumerate()
        .map(|(i, (name, icon, category))| Amenity {
            id: 0,
            name: name.to_string(),
            icon,
            category,
            display_order: i as i64,
        })
        .collect()
}

pub fn default_gallery() -> Vec<GalleryImage> {
    let images = [
        ("hero-beach.jpg", "praia", "Vista da praia da Guarda do Embaú"),
        ("hero-beach.jpg", "praia", "Pôr do sol na praia"),
        ("room-interior.jpg", "pousada", "Quarto aconchegante da pousada"),
        ("terrace-view.jpg", "pousada", "Terraço com vista para o mar"),
        ("terrace-view.jpg", "pousada", "Café da manhã com vista"),
    ];

    images
        .into_iter()
        .enumerate()
        .map(|(i, (image, category, caption))| GalleryImage {
            id: 0,
            image: image.to_string(),
            category: category.to_string(),
            caption: Some(caption.to_string()),
            display_order: i as i64,
        })
        .collect()
}
