use clap::{Args, Parser, Subcommand};
use pousada_cms::config::{self, SiteConfig};
use pousada_cms::output;
use pousada_cms::service::{ContentService, ContentStatus};
use pousada_cms::store::JsonStore;
use pousada_cms::types::{Amenity, AmenityCategory, AmenityIcon, GalleryImage, Rate, Room, RoomImage};
use std::path::{Path, PathBuf};

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup — trivial, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "pousada-cms")]
#[command(about = "Content store and admin CLI for the guesthouse site")]
#[command(long_about = "\
Content store and admin CLI for the guesthouse site

The data directory is the backend: each content collection is a JSON
document, uploaded images live in the media directory, and the public site
consumes a single exported snapshot with every image resolved to a URL.

Layout:

  config.toml                      # Site config (optional)
  data/
  ├── room_types.json              # Rooms/suites, ordered by display_order
  ├── amenities.json               # Amenities with icon + category
  ├── gallery_images.json          # Site-wide galleries, grouped by category
  ├── room_images.json             # Per-room photos, keyed by room id
  └── .content-overrides.json      # Local image overrides (bounded cache)
  media/
  ├── hero/                        # Single-slot hero image
  ├── rooms/                       # Uploaded room photos
  └── praia/                       # Uploaded gallery photos, one dir per category

Uploads are validated (image content type, jpg/jpeg/png/webp) and stored
under a content-addressed name, so re-uploading the same photo never
duplicates it.

Run 'pousada-cms gen-config' to generate a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Path to config.toml
    #[arg(long, default_value = "config.toml", global = true)]
    config: PathBuf,

    /// Override the configured data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Override the configured media directory
    #[arg(long, global = true)]
    media_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create the data directory seeded with the default content
    Init,
    /// Load all collections and print the content inventory
    Check,
    /// Export the resolved content snapshot for the public site
    Snapshot {
        /// Destination file
        #[arg(long, default_value = "content.json")]
        out: PathBuf,
    },
    /// Manage rooms
    Rooms {
        #[command(subcommand)]
        command: RoomsCommand,
    },
    /// Manage amenities
    Amenities {
        #[command(subcommand)]
        command: AmenitiesCommand,
    },
    /// Manage the site-wide photo galleries
    Gallery {
        #[command(subcommand)]
        command: GalleryCommand,
    },
    /// Manage per-room photo galleries
    RoomImages {
        #[command(subcommand)]
        command: RoomImagesCommand,
    },
    /// Manage the single-slot hero image
    Hero {
        #[command(subcommand)]
        command: HeroCommand,
    },
    /// Manage local image overrides
    Overrides {
        #[command(subcommand)]
        command: OverridesCommand,
    },
    /// Upload an image to media storage and print its stored path
    Upload {
        /// Image file (jpg, jpeg, png, webp)
        file: PathBuf,
        /// Destination folder inside the media directory
        #[arg(long, default_value = "rooms")]
        folder: String,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

#[derive(Subcommand)]
enum RoomsCommand {
    /// List rooms in display order
    List,
    /// Add a room
    Add(RoomAddArgs),
    /// Update fields of an existing room (unset flags keep current values)
    Update {
        id: u64,
        #[command(flatten)]
        args: RoomUpdateArgs,
    },
    /// Remove a room (does not remove its photos)
    Rm { id: u64 },
}

#[derive(Args)]
struct RoomAddArgs {
    #[arg(long)]
    name: String,
    /// Occupancy, e.g. "2 adultos + 1 criança"
    #[arg(long)]
    capacity: String,
    /// Flat nightly rate; mutually exclusive with --low/--high
    #[arg(long, conflicts_with_all = ["low", "high"])]
    rate: Option<String>,
    /// Low season nightly rate (requires --high)
    #[arg(long, requires = "high")]
    low: Option<String>,
    /// High season nightly rate (requires --low)
    #[arg(long, requires = "low")]
    high: Option<String>,
    #[arg(long, default_value = "")]
    description: String,
    /// Amenity label; repeat for each
    #[arg(long = "amenity")]
    amenities: Vec<String>,
    /// Suite-only amenity label; repeat for each
    #[arg(long = "unique-amenity")]
    unique_amenities: Vec<String>,
    #[arg(long)]
    featured: bool,
    /// Primary image reference (stored path or bundled asset name)
    #[arg(long)]
    image: Option<String>,
    #[arg(long, default_value_t = 0)]
    order: i64,
}

#[derive(Args)]
struct RoomUpdateArgs {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    capacity: Option<String>,
    #[arg(long, conflicts_with_all = ["low", "high"])]
    rate: Option<String>,
    #[arg(long, requires = "high")]
    low: Option<String>,
    #[arg(long, requires = "low")]
    high: Option<String>,
    #[arg(long)]
    description: Option<String>,
    /// Replace the amenity list; repeat for each label
    #[arg(long = "amenity")]
    amenities: Vec<String>,
    /// Replace the suite-only amenity list; repeat for each label
    #[arg(long = "unique-amenity")]
    unique_amenities: Vec<String>,
    #[arg(long)]
    featured: Option<bool>,
    #[arg(long, conflicts_with = "clear_image")]
    image: Option<String>,
    /// Drop the primary image reference
    #[arg(long)]
    clear_image: bool,
    #[arg(long)]
    order: Option<i64>,
}

#[derive(Subcommand)]
enum AmenitiesCommand {
    /// List amenities in display order
    List,
    /// Add an amenity
    Add {
        #[arg(long)]
        name: String,
        /// Symbol name (wifi, tv, sun, ...) or a raw emoji
        #[arg(long, default_value = "sparkles")]
        icon: String,
        /// "suite" or "common"
        #[arg(long, default_value = "common")]
        category: String,
        #[arg(long, default_value_t = 0)]
        order: i64,
    },
    /// Update an amenity (unset flags keep current values)
    Update {
        id: u64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        icon: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        order: Option<i64>,
    },
    /// Remove an amenity (rooms referencing its label keep the stale label)
    Rm { id: u64 },
}

#[derive(Subcommand)]
enum GalleryCommand {
    /// List gallery images grouped by category
    List,
    /// Add an image to a gallery, uploading it first if --file is given
    Add {
        /// Category ("praia", "pousada", ...); also the upload folder
        #[arg(long)]
        category: String,
        /// Existing reference (stored path or bundled asset name)
        #[arg(long, conflicts_with = "file")]
        image: Option<String>,
        /// Local file to upload
        #[arg(long)]
        file: Option<PathBuf>,
        #[arg(long)]
        caption: Option<String>,
        #[arg(long, default_value_t = 0)]
        order: i64,
    },
    /// Remove an image record (the stored file stays in media)
    Rm { id: u64 },
}

#[derive(Subcommand)]
enum RoomImagesCommand {
    /// List the photos attached to a room
    List { room: u64 },
    /// Attach a photo to a room, uploading it first if --file is given
    Add {
        room: u64,
        #[arg(long, conflicts_with = "file")]
        image: Option<String>,
        #[arg(long)]
        file: Option<PathBuf>,
        #[arg(long)]
        caption: Option<String>,
        #[arg(long, default_value_t = 0)]
        order: i64,
    },
    /// Detach a photo record from its room
    Rm { id: u64 },
}

#[derive(Subcommand)]
enum HeroCommand {
    /// Show the current hero image, if set
    Show,
    /// Replace the hero image
    Set { file: PathBuf },
}

#[derive(Subcommand)]
enum OverridesCommand {
    /// List local overrides
    List,
    /// Map an image reference to an inline payload
    Set { reference: String, payload: String },
    /// Drop an override
    Rm { reference: String },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut site_config = config::load_config(&cli.config)?;
    if let Some(ref dir) = cli.data_dir {
        site_config.data_dir = dir.to_string_lossy().into_owned();
    }
    if let Some(ref dir) = cli.media_dir {
        site_config.media_dir = dir.to_string_lossy().into_owned();
    }

    match cli.command {
        Command::Init => init(site_config)?,
        Command::Check => check(site_config)?,
        Command::Snapshot { out } => snapshot(site_config, &out)?,
        Command::Rooms { command } => rooms(site_config, command)?,
        Command::Amenities { command } => amenities(site_config, command)?,
        Command::Gallery { command } => gallery(site_config, command)?,
        Command::RoomImages { command } => room_images(site_config, command)?,
        Command::Hero { command } => hero(site_config, command)?,
        Command::Overrides { command } => overrides(site_config, command)?,
        Command::Upload { file, folder } => {
            let service = ContentService::open(site_config);
            let (name, content_type, bytes) = read_upload(&file)?;
            let stored = service.upload_image(&name, &content_type, &bytes, &folder)?;
            println!("Uploaded \u{2192} {stored}");
        }
        Command::GenConfig => print!("{}", config::stock_config_toml()),
    }

    Ok(())
}

/// Open the service and load the model, printing any per-entity warnings.
fn load_service(site_config: SiteConfig) -> ContentService<JsonStore> {
    let mut service = ContentService::open(site_config);
    service.refresh();
    output::print_warnings(&service.model().warnings);
    service
}

fn init(site_config: SiteConfig) -> Result<(), Box<dyn std::error::Error>> {
    let store = JsonStore::new(&site_config.data_dir);
    if store.has_collections() {
        println!(
            "Data directory {} already has content; nothing to do",
            site_config.data_dir
        );
        return Ok(());
    }

    let mut service = ContentService::open(site_config);
    service.seed_defaults()?;
    output::print_content_output(service.model());
    println!("==> Seeded default content");
    Ok(())
}

fn check(site_config: SiteConfig) -> Result<(), Box<dyn std::error::Error>> {
    let service = load_service(site_config);
    output::print_content_output(service.model());
    if service.model().status == ContentStatus::Failed {
        return Err("no content could be loaded".into());
    }
    println!("==> Content is valid");
    Ok(())
}

fn snapshot(site_config: SiteConfig, out: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let service = load_service(site_config);
    let content = service.write_snapshot(out)?;
    output::print_snapshot_output(&content, &out.display().to_string());
    Ok(())
}

fn rooms(
    site_config: SiteConfig,
    command: RoomsCommand,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut service = load_service(site_config);
    match command {
        RoomsCommand::List => output::print_rooms_output(service.model()),
        RoomsCommand::Add(args) => {
            let rate = rate_from_flags(args.rate, args.low, args.high)?
                .ok_or("provide --rate, or --low and --high")?;
            let created = service.create_room(Room {
                id: 0,
                name: args.name,
                capacity: args.capacity,
                rate,
                description: args.description,
                amenities: args.amenities,
                unique_amenities: args.unique_amenities,
                featured: args.featured,
                image: args.image,
                display_order: args.order,
            })?;
            println!("Created room {}: {}", created.id, created.name);
        }
        RoomsCommand::Update { id, args } => {
            let mut room = service
                .model()
                .rooms
                .iter()
                .find(|r| r.id == id)
                .cloned()
                .ok_or_else(|| format!("room {id} not found"))?;
            if let Some(name) = args.name {
                room.name = name;
            }
            if let Some(capacity) = args.capacity {
                room.capacity = capacity;
            }
            if let Some(rate) = rate_from_flags(args.rate, args.low, args.high)? {
                room.rate = rate;
            }
            if let Some(description) = args.description {
                room.description = description;
            }
            if !args.amenities.is_empty() {
                room.amenities = args.amenities;
            }
            if !args.unique_amenities.is_empty() {
                room.unique_amenities = args.unique_amenities;
            }
            if let Some(featured) = args.featured {
                room.featured = featured;
            }
            if args.clear_image {
                room.image = None;
            } else if let Some(image) = args.image {
                room.image = Some(image);
            }
            if let Some(order) = args.order {
                room.display_order = order;
            }
            let updated = service.update_room(id, room)?;
            println!("Updated room {}: {}", updated.id, updated.name);
        }
        RoomsCommand::Rm { id } => {
            service.delete_room(id)?;
            println!("Removed room {id}");
        }
    }
    Ok(())
}

fn amenities(
    site_config: SiteConfig,
    command: AmenitiesCommand,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut service = load_service(site_config);
    match command {
        AmenitiesCommand::List => output::print_amenities_output(service.model()),
        AmenitiesCommand::Add {
            name,
            icon,
            category,
            order,
        } => {
            let created = service.create_amenity(Amenity {
                id: 0,
                name,
                icon: AmenityIcon::from(icon),
                category: parse_category(&category)?,
                display_order: order,
            })?;
            println!("Created amenity {}: {}", created.id, created.name);
        }
        AmenitiesCommand::Update {
            id,
            name,
            icon,
            category,
            order,
        } => {
            let mut amenity = service
                .model()
                .amenities
                .iter()
                .find(|a| a.id == id)
                .cloned()
                .ok_or_else(|| format!("amenity {id} not found"))?;
            if let Some(name) = name {
                amenity.name = name;
            }
            if let Some(icon) = icon {
                amenity.icon = AmenityIcon::from(icon);
            }
            if let Some(category) = category {
                amenity.category = parse_category(&category)?;
            }
            if let Some(order) = order {
                amenity.display_order = order;
            }
            let updated = service.update_amenity(id, amenity)?;
            println!("Updated amenity {}: {}", updated.id, updated.name);
        }
        AmenitiesCommand::Rm { id } => {
            service.delete_amenity(id)?;
            println!("Removed amenity {id}");
        }
    }
    Ok(())
}

fn gallery(
    site_config: SiteConfig,
    command: GalleryCommand,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut service = load_service(site_config);
    match command {
        GalleryCommand::List => output::print_gallery_output(service.model()),
        GalleryCommand::Add {
            category,
            image,
            file,
            caption,
            order,
        } => {
            let reference = resolve_reference(&service, image, file, &category)?;
            let created = service.add_gallery_image(GalleryImage {
                id: 0,
                image: reference,
                category,
                caption,
                display_order: order,
            })?;
            println!("Added gallery image {}: {}", created.id, created.image);
        }
        GalleryCommand::Rm { id } => {
            service.remove_gallery_image(id)?;
            println!("Removed gallery image {id}");
        }
    }
    Ok(())
}

fn room_images(
    site_config: SiteConfig,
    command: RoomImagesCommand,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut service = load_service(site_config);
    match command {
        RoomImagesCommand::List { room } => {
            let images = service.model().room_images.get(&room);
            match images {
                Some(images) if !images.is_empty() => {
                    for (i, img) in images.iter().enumerate() {
                        let label = img.caption.as_deref().unwrap_or(&img.image);
                        println!("{:0>3} {label}", i + 1);
                        println!("    Source: {}", img.image);
                    }
                }
                _ => println!("Room {room} has no photos"),
            }
        }
        RoomImagesCommand::Add {
            room,
            image,
            file,
            caption,
            order,
        } => {
            let reference = resolve_reference(&service, image, file, "rooms")?;
            let created = service.add_room_image(RoomImage {
                id: 0,
                room_id: room,
                image: reference,
                caption,
                display_order: order,
            })?;
            println!("Added photo {} to room {}", created.id, room);
        }
        RoomImagesCommand::Rm { id } => {
            service.remove_room_image(id)?;
            println!("Removed photo {id}");
        }
    }
    Ok(())
}

fn hero(site_config: SiteConfig, command: HeroCommand) -> Result<(), Box<dyn std::error::Error>> {
    let service = ContentService::open(site_config);
    match command {
        HeroCommand::Show => match service.hero_image()? {
            Some(path) => {
                println!("{path}");
                println!("    URL: {}", service.resolve_image(Some(&path)));
            }
            None => println!("No hero image set"),
        },
        HeroCommand::Set { file } => {
            let (name, content_type, bytes) = read_upload(&file)?;
            let stored = service.set_hero_image(&name, &content_type, &bytes)?;
            println!("Hero image set \u{2192} {stored}");
        }
    }
    Ok(())
}

fn overrides(
    site_config: SiteConfig,
    command: OverridesCommand,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut service = ContentService::open(site_config);
    match command {
        OverridesCommand::List => {
            if service.overrides().is_empty() {
                println!("No overrides");
            } else {
                println!("{} overrides", service.overrides().len());
            }
        }
        OverridesCommand::Set { reference, payload } => {
            service.override_image(&reference, payload)?;
            println!("Override set for {reference}");
        }
        OverridesCommand::Rm { reference } => {
            if service.clear_override(&reference)? {
                println!("Override removed for {reference}");
            } else {
                println!("No override for {reference}");
            }
        }
    }
    Ok(())
}

/// Turn rate flags into a [`Rate`], if any were given.
fn rate_from_flags(
    rate: Option<String>,
    low: Option<String>,
    high: Option<String>,
) -> Result<Option<Rate>, Box<dyn std::error::Error>> {
    match (rate, low, high) {
        (Some(rate), None, None) => Ok(Some(Rate::Nightly(rate))),
        (None, Some(low), Some(high)) => Ok(Some(Rate::Seasonal {
            low_season: low,
            high_season: high,
        })),
        (None, None, None) => Ok(None),
        // clap's requires/conflicts_with rules out the rest
        _ => Err("provide --rate, or --low and --high".into()),
    }
}

fn parse_category(value: &str) -> Result<AmenityCategory, Box<dyn std::error::Error>> {
    match value {
        "suite" => Ok(AmenityCategory::Suite),
        "common" => Ok(AmenityCategory::Common),
        other => Err(format!("unknown category '{other}' (expected 'suite' or 'common')").into()),
    }
}

/// Use the given reference, or upload the given file into `folder` and use
/// the stored path. Exactly one of the two must be present.
fn resolve_reference(
    service: &ContentService<JsonStore>,
    image: Option<String>,
    file: Option<PathBuf>,
    folder: &str,
) -> Result<String, Box<dyn std::error::Error>> {
    match (image, file) {
        (Some(reference), None) => Ok(reference),
        (None, Some(file)) => {
            let (name, content_type, bytes) = read_upload(&file)?;
            let stored = service.upload_image(&name, &content_type, &bytes, folder)?;
            println!("Uploaded \u{2192} {stored}");
            Ok(stored)
        }
        _ => Err("provide --image or --file".into()),
    }
}

/// Read a local file for upload, deriving the declared content type from
/// its extension the way a browser would.
fn read_upload(file: &Path) -> Result<(String, String, Vec<u8>), Box<dyn std::error::Error>> {
    let name = file
        .file_name()
        .ok_or_else(|| format!("not a file: {}", file.display()))?
        .to_string_lossy()
        .into_owned();
    let content_type = match file
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .as_deref()
    {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    };
    let bytes = std::fs::read(file)?;
    Ok((name, content_type.to_string(), bytes))
}
