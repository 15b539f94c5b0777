mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::path::Path;

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    validate_config(&config)?;

    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    // Try default locations
    let default_paths = [
        "./config.toml",
        "./homestream.toml",
        "~/.config/homestream/config.toml",
        "/etc/homestream/config.toml",
    ];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            return load_config(path);
        }
    }

    Ok(Config::default())
}

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    if config.server.port == 0 {
        anyhow::bail!("Server port cannot be 0");
    }

    let chunk_size = config.streaming.chunk_size;
    if !(MIN_CHUNK_SIZE..=MAX_CHUNK_SIZE).contains(&chunk_size) {
        anyhow::bail!(
            "Streaming chunk_size {} must be between {} and {} bytes",
            chunk_size,
            MIN_CHUNK_SIZE,
            MAX_CHUNK_SIZE
        );
    }

    if config.streaming.channel_capacity == 0 {
        anyhow::bail!("Streaming channel_capacity must be at least 1");
    }

    if !config.storage.create_dirs {
        for dir in [&config.storage.videos_dir, &config.storage.media_dir] {
            if !dir.exists() {
                tracing::warn!("Storage directory does not exist: {:?}", dir);
            }
        }
    }

    Ok(())
}
