use anyhow::Result;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

pub mod defaults;

use defaults::*;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub web: WebConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub card: CardConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Scheme used for absolute URLs in page metadata
    #[serde(default = "default_public_scheme")]
    pub public_scheme: String,
}

/// Where cards and the font asset are kept
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Filesystem,
    Memory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_storage_backend")]
    pub backend: StorageBackend,
    #[serde(default = "default_data_path")]
    pub path: PathBuf,
    /// Key of the typeface used for every card
    #[serde(default = "default_font_key")]
    pub font_key: String,
    /// Local font file loaded at startup instead of fetching `font_key`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_path: Option<PathBuf>,
    #[serde(default = "default_image_key_prefix")]
    pub image_key_prefix: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardConfig {
    /// Fixed second row of every card
    #[serde(default = "default_caption")]
    pub caption: String,
    #[serde(default = "default_description")]
    pub description: String,
    #[serde(default = "default_site_name")]
    pub site_name: String,
    #[serde(default = "default_fallback_font_family")]
    pub fallback_font_family: String,
}

// Web defaults
fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_public_scheme() -> String {
    DEFAULT_PUBLIC_SCHEME.to_string()
}

// Storage defaults
fn default_storage_backend() -> StorageBackend {
    StorageBackend::Filesystem
}

fn default_data_path() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_PATH)
}

fn default_font_key() -> String {
    DEFAULT_FONT_KEY.to_string()
}

fn default_image_key_prefix() -> String {
    DEFAULT_IMAGE_KEY_PREFIX.to_string()
}

// Card defaults
fn default_caption() -> String {
    DEFAULT_CAPTION.to_string()
}

fn default_description() -> String {
    DEFAULT_DESCRIPTION.to_string()
}

fn default_site_name() -> String {
    DEFAULT_SITE_NAME.to_string()
}

fn default_fallback_font_family() -> String {
    DEFAULT_FALLBACK_FONT_FAMILY.to_string()
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            public_scheme: default_public_scheme(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: default_storage_backend(),
            path: default_data_path(),
            font_key: default_font_key(),
            font_path: None,
            image_key_prefix: default_image_key_prefix(),
        }
    }
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            caption: default_caption(),
            description: default_description(),
            site_name: default_site_name(),
            fallback_font_family: default_fallback_font_family(),
        }
    }
}

impl Config {
    /// Load configuration from defaults, the TOML file, then `HOSTCARD_*` variables
    ///
    /// A missing file is created with the default configuration.
    pub fn load_from_file(config_file: &str) -> Result<Self> {
        if !Path::new(config_file).exists() {
            let contents = toml::to_string_pretty(&Self::default())?;
            std::fs::write(config_file, contents)?;
            info!("Created default config file: {}", config_file);
        }

        Self::figment(config_file).extract().map_err(Into::into)
    }

    fn figment(config_file: &str) -> Figment {
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(config_file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }
}
