//! Tool configuration module.
//!
//! Handles loading and validating `vitrine.toml`. Configuration selects the
//! persistence backend and tunes the image pipeline and the generated
//! gallery theme; the collection content itself lives in the backend, never
//! in the config file.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [storage]
//! backend = "local"                            # "local" or "remote"
//! path = "showcase.json"                       # local mode: blob location
//! api_base_url = "http://localhost:3001/api"   # remote mode: API root
//!
//! [images]
//! position_base = 1         # first display position after a reorder (0 or 1)
//!
//! [theme]
//! background = "#ffffff"
//! text = "#111111"
//! text_muted = "#666666"    # item count, footer, detail labels
//! accent = "#4f46e5"        # tag badges, anchors
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse — override just the values you want:
//!
//! ```toml
//! # Only switch to the remote backend
//! [storage]
//! backend = "remote"
//! ```
//!
//! Unknown keys are rejected to catch typos early. A missing config file is
//! the stock configuration.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
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

/// Tool configuration loaded from `vitrine.toml`.
///
/// All fields have defaults; user config files need only specify the values
/// they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShowcaseConfig {
    /// Persistence backend selection and addressing.
    pub storage: StorageConfig,
    /// Image pipeline settings.
    pub images: ImagesConfig,
    /// Gallery page theme colors.
    pub theme: ThemeConfig,
}

impl ShowcaseConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.images.position_base > 1 {
            return Err(ConfigError::Validation(
                "images.position_base must be 0 or 1".into(),
            ));
        }
        if self.storage.path.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "storage.path must not be empty".into(),
            ));
        }
        if matches!(self.storage.backend, BackendKind::Remote)
            && !self.storage.api_base_url.starts_with("http")
        {
            return Err(ConfigError::Validation(
                "storage.api_base_url must be an http(s) URL".into(),
            ));
        }
        Ok(())
    }
}

/// Which persistence backend to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Single JSON blob on disk, images embedded as data URIs.
    #[default]
    Local,
    /// REST API client, images uploaded to the server.
    Remote,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StorageConfig {
    pub backend: BackendKind,
    /// Blob location (local mode only).
    pub path: PathBuf,
    /// API root (remote mode only). Endpoint paths are appended verbatim.
    pub api_base_url: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::Local,
            path: PathBuf::from("showcase.json"),
            api_base_url: "http://localhost:3001/api".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImagesConfig {
    /// First display position assigned by a reorder: 0 or 1.
    pub position_base: u32,
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self { position_base: 1 }
    }
}

/// Gallery page colors, injected as CSS custom properties.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThemeConfig {
    pub background: String,
    pub text: String,
    pub text_muted: String,
    pub accent: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            background: "#ffffff".to_string(),
            text: "#111111".to_string(),
            text_muted: "#666666".to_string(),
            accent: "#4f46e5".to_string(),
        }
    }
}

/// Load configuration from `path`. A missing file yields the stock
/// configuration; a present file must parse and validate.
pub fn load_config(path: &Path) -> Result<ShowcaseConfig, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            return Ok(ShowcaseConfig::default());
        }
        Err(err) => return Err(err.into()),
    };
    let config: ShowcaseConfig = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

/// Generate CSS custom properties from theme colors.
pub fn generate_color_css(theme: &ThemeConfig) -> String {
    format!(
        ":root {{\n  --color-background: {};\n  --color-text: {};\n  --color-text-muted: {};\n  --color-accent: {};\n}}",
        theme.background, theme.text, theme.text_muted, theme.accent
    )
}

/// A documented stock `vitrine.toml` with all options at their defaults,
/// printed by the `gen-config` command.
pub fn stock_config_toml() -> String {
    r##"# vitrine configuration
# All options are optional - defaults shown below.

[storage]
# Persistence backend: "local" (JSON blob on disk, images embedded inline)
# or "remote" (REST API, images uploaded to the server).
backend = "local"
# Local mode: where the collection blob lives.
path = "showcase.json"
# Remote mode: API root. Endpoints like /items are appended to this.
api_base_url = "http://localhost:3001/api"

[images]
# First display position assigned when images are reordered: 0 or 1.
position_base = 1

[theme]
# Colors for the generated gallery page.
background = "#ffffff"
text = "#111111"
text_muted = "#666666"
accent = "#4f46e5"
"##
    .to_string()
}
