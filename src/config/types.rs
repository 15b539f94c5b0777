use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Smallest accepted copy buffer.
pub const MIN_CHUNK_SIZE: usize = 1024;

/// Largest accepted copy buffer.
pub const MAX_CHUNK_SIZE: usize = 1024 * 1024;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub streaming: StreamingConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Public web UI directory served as an SPA fallback
    #[serde(default)]
    pub static_dir: Option<PathBuf>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    3000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Storage root for `/stream/{filename}`
    #[serde(default = "default_videos_dir")]
    pub videos_dir: PathBuf,

    /// Root of the `/media/*` static tree (thumbnails and the like)
    #[serde(default = "default_media_dir")]
    pub media_dir: PathBuf,

    /// Create missing directories on startup
    #[serde(default = "default_create_dirs")]
    pub create_dirs: bool,
}

fn default_videos_dir() -> PathBuf {
    PathBuf::from("./media/videos")
}
fn default_media_dir() -> PathBuf {
    PathBuf::from("./media")
}
fn default_create_dirs() -> bool {
    true
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            videos_dir: default_videos_dir(),
            media_dir: default_media_dir(),
            create_dirs: default_create_dirs(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StreamingConfig {
    /// Bytes read from storage per chunk (default: 8192)
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Chunks buffered between the copier and the socket (default: 4)
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,

    /// Optional `Cache-Control` value for 200/206 stream responses
    #[serde(default)]
    pub cache_control: Option<String>,
}

fn default_chunk_size() -> usize {
    crate::streaming::DEFAULT_CHUNK_SIZE
}
fn default_channel_capacity() -> usize {
    4
}

impl Default for StreamingConfig {
    fn default() -> Self {
        Self {
            chunk_size: default_chunk_size(),
            channel_capacity: default_channel_capacity(),
            cache_control: None,
        }
    }
}
