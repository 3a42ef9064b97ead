//! Image reference resolution.
//!
//! A stored image reference is either a bare name ("hero-beach.jpg") that
//! points at an asset compiled into the site bundle, or a storage path
//! ("rooms/3fb2a9c4d1e08b77.jpg") produced by an upload. This module maps
//! either form to a displayable URL, purely — no filesystem or network I/O
//! is needed to compute the string, and the media backend guarantees a
//! constructed URL is fetchable whenever the object exists.
//!
//! ## Resolution priority
//!
//! The first matching rule wins:
//!
//! 1. Absent or blank reference → the configured placeholder URL.
//! 2. Override cache hit → the cached inline payload, verbatim.
//! 3. Reference containing `/` → public media URL built from config.
//! 4. Bare name listed in the bundled asset table → asset URL.
//! 5. Anything else → placeholder. Resolution never errors.

use crate::config::SiteConfig;
use crate::overrides::OverrideCache;

/// Image names shipped inside the site bundle. Bare references outside this
/// table have nothing to point at and degrade to the placeholder.
pub const BUNDLED_ASSETS: &[&str] = &["hero-beach.jpg", "room-interior.jpg", "terrace-view.jpg"];

/// URL for absent or unresolvable references.
pub fn placeholder_url(config: &SiteConfig) -> String {
    join_base(config, &config.images.placeholder)
}

/// URL of a bundled asset by bare name.
pub fn asset_url(config: &SiteConfig, name: &str) -> String {
    let base = config.images.asset_base.trim_end_matches('/');
    join_base(config, &format!("{base}/{name}"))
}

/// Public URL of an uploaded media object by its stored path.
pub fn media_url(config: &SiteConfig, path: &str) -> String {
    join_base(config, &format!("/{}/{}", config.images.media_prefix, path))
}

/// Resolve an optional image reference to a displayable URL.
pub fn resolve_image_url(
    config: &SiteConfig,
    overrides: &OverrideCache,
    reference: Option<&str>,
) -> String {
    let reference = match reference.map(str::trim).filter(|r| !r.is_empty()) {
        Some(r) => r,
        None => return placeholder_url(config),
    };

    if let Some(payload) = overrides.get(reference) {
        return payload.to_string();
    }

    if reference.contains('/') {
        if is_well_formed_path(reference) {
            return media_url(config, reference);
        }
        return placeholder_url(config);
    }

    if BUNDLED_ASSETS.contains(&reference) {
        return asset_url(config, reference);
    }

    placeholder_url(config)
}

/// A storage path is segments joined by `/`, none empty, none a traversal.
fn is_well_formed_path(reference: &str) -> bool {
    reference
        .split('/')
        .all(|seg| !seg.is_empty() && seg != "." && seg != "..")
}

fn join_base(config: &SiteConfig, path: &str) -> String {
    format!("{}{}", config.public_base_url, path)
}
