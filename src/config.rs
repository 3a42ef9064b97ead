//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. Configuration is
//! two layers: stock defaults overridden by the user's config file. Config
//! files are sparse — override just the values you want:
//!
//! ```toml
//! # Only override the public base URL
//! public_base_url = "https://pousadamanicaca.com.br"
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! site_name = "Pousada Manicaca"
//! data_dir = "data"            # Content collections (JSON files)
//! media_dir = "media"          # Uploaded images
//! public_base_url = ""         # Prefix for generated URLs ("" = site-relative)
//!
//! [images]
//! media_prefix = "media"       # URL path segment for uploaded images
//! asset_base = "/assets"       # URL base for bundled (compiled-in) assets
//! placeholder = "/placeholder.svg"
//!
//! [overrides]
//! max_entries = 64             # Local override cache bound
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
///
/// All fields have sensible defaults. User config files need only specify
/// the values they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Display name, used in CLI headers and the exported snapshot.
    pub site_name: String,
    /// Directory holding the JSON content collections.
    pub data_dir: String,
    /// Directory holding uploaded media files.
    pub media_dir: String,
    /// URL prefix for generated links. Empty means site-relative URLs.
    pub public_base_url: String,
    /// Image URL construction settings.
    pub images: ImagesConfig,
    /// Local override cache settings.
    pub overrides: OverridesConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site_name: "Pousada Manicaca".to_string(),
            data_dir: "data".to_string(),
            media_dir: "media".to_string(),
            public_base_url: String::new(),
            images: ImagesConfig::default(),
            overrides: OverridesConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.public_base_url.ends_with('/') {
            return Err(ConfigError::Validation(
                "public_base_url must not end with '/'".into(),
            ));
        }
        if self.images.media_prefix.is_empty()
            || self.images.media_prefix.starts_with('/')
            || self.images.media_prefix.ends_with('/')
        {
            return Err(ConfigError::Validation(
                "images.media_prefix must be a bare path segment".into(),
            ));
        }
        if self.images.placeholder.is_empty() {
            return Err(ConfigError::Validation(
                "images.placeholder must not be empty".into(),
            ));
        }
        if self.overrides.max_entries == 0 {
            return Err(ConfigError::Validation(
                "overrides.max_entries must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Image URL construction settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImagesConfig {
    /// URL path segment under which uploaded media is served.
    pub media_prefix: String,
    /// URL base for bundled assets referenced by bare name.
    pub asset_base: String,
    /// URL returned for absent or unresolvable image references.
    pub placeholder: String,
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            media_prefix: "media".to_string(),
            asset_base: "/assets".to_string(),
            placeholder: "/placeholder.svg".to_string(),
        }
    }
}

/// Local override cache settings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OverridesConfig {
    /// Maximum number of entries kept; oldest entries are evicted past this.
    pub max_entries: usize,
}

impl Default for OverridesConfig {
    fn default() -> Self {
        Self { max_entries: 64 }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the canonical representation of all default values, used as the
/// base layer for merging user overrides on top.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `config.toml` from `path`, merged over stock defaults and validated.
///
/// A missing file yields the stock defaults. A present but malformed file is
/// an error — silently ignoring a typo'd config leads to mysterious output.
pub fn load_config(path: &Path) -> Result<SiteConfig, ConfigError> {
    let merged = match fs::read_to_string(path) {
        Ok(content) => {
            let user: toml::Value = toml::from_str(&content)?;
            merge_toml(stock_defaults_value(), user)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => stock_defaults_value(),
        Err(e) => return Err(e.into()),
    };

    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// The stock `config.toml` with every option present and documented,
/// printed by `pousada-cms gen-config`.
pub fn stock_config_toml() -> String {
    let defaults = SiteConfig::default();
    format!(
        r#"# pousada-cms configuration
# All options are optional; the values below are the defaults.

# Display name, used in CLI headers and the exported snapshot.
site_name = "{site_name}"

# Directory holding the JSON content collections.
data_dir = "{data_dir}"

# Directory holding uploaded media files.
media_dir = "{media_dir}"

# URL prefix for generated links. Empty means site-relative URLs.
public_base_url = "{public_base_url}"

[images]
# URL path segment under which uploaded media is served.
media_prefix = "{media_prefix}"
# URL base for bundled assets referenced by bare name.
asset_base = "{asset_base}"
# URL returned for absent or unresolvable image references.
placeholder = "{placeholder}"

[overrides]
# Local override cache bound; oldest entries are evicted past this.
max_entries = {max_entries}
"#,
        site_name = defaults.site_name,
        data_dir = defaults.data_dir,
        media_dir = defaults.media_dir,
        public_base_url = defaults.public_base_url,
        media_prefix = defaults.images.media_prefix,
        asset_base = defaults.images.asset_base,
        placeholder = defaults.images.placeholder,
        max_entries = defaults.overrides.max_entries,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, content: &str) -> std::path::PathBuf {
        let path = dir.path().join("config.toml");
        fs::write(&path, content).unwrap();
        path
    }

    // =========================================================================
    // Loading and merging
    // =========================================================================

    #[test]
    fn missing_file_yields_defaults() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(&tmp.path().join("config.toml")).unwrap();
        assert_eq!(config.site_name, "Pousada Manicaca");
        assert_eq!(config.images.placeholder, "/placeholder.svg");
    }

    #[test]
    fn sparse_override_keeps_other_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = write_config(&tmp, "public_base_url = \"https://example.com\"\n");
        let config = load_config(&path).unwrap();
        assert_eq!(config.public_base_url, "https://example.com");
        assert_eq!(config.data_dir, "data");
        assert_eq!(config.overrides.max_entries, 64);
    }

    #[test]
    fn nested_override_merges() {
        let tmp = TempDir::new().unwrap();
        let path = write_config(&tmp, "[images]\nplaceholder = \"/missing.png\"\n");
        let config = load_config(&path).unwrap();
        assert_eq!(config.images.placeholder, "/missing.png");
        // Sibling keys in the same table survive the merge
        assert_eq!(config.images.asset_base, "/assets");
    }

    #[test]
    fn unknown_key_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let path = write_config(&tmp, "site_nmae = \"typo\"\n");
        assert!(matches!(
            load_config(&path),
            Err(ConfigError::Toml(_)) | Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn malformed_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        let path = write_config(&tmp, "site_name = [unclosed\n");
        assert!(matches!(load_config(&path), Err(ConfigError::Toml(_))));
    }

    // =========================================================================
    // Validation
    // =========================================================================

    #[test]
    fn trailing_slash_base_url_rejected() {
        let tmp = TempDir::new().unwrap();
        let path = write_config(&tmp, "public_base_url = \"https://example.com/\"\n");
        assert!(matches!(
            load_config(&path),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn zero_max_entries_rejected() {
        let tmp = TempDir::new().unwrap();
        let path = write_config(&tmp, "[overrides]\nmax_entries = 0\n");
        assert!(matches!(
            load_config(&path),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn slashed_media_prefix_rejected() {
        let config = SiteConfig {
            images: ImagesConfig {
                media_prefix: "/media".into(),
                ..ImagesConfig::default()
            },
            ..SiteConfig::default()
        };
        assert!(config.validate().is_err());
    }

    // =========================================================================
    // Stock config
    // =========================================================================

    #[test]
    fn stock_config_parses_back_to_defaults() {
        let parsed: toml::Value = toml::from_str(&stock_config_toml()).unwrap();
        let merged = merge_toml(stock_defaults_value(), parsed);
        let config: SiteConfig = merged.try_into().unwrap();
        config.validate().unwrap();
        assert_eq!(config.media_dir, SiteConfig::default().media_dir);
    }

    #[test]
    fn merge_toml_overlay_wins_on_scalars() {
        let base = toml::Value::try_from(SiteConfig::default()).unwrap();
        let overlay: toml::Value = toml::from_str("data_dir = \"elsewhere\"").unwrap();
        let merged = merge_toml(base, overlay);
        let config: SiteConfig = merged.try_into().unwrap();
        assert_eq!(config.data_dir, "elsewhere");
    }
}
