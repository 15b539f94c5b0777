//! Shared test harness for integration tests.
//!
//! Provides [`TestHarness`] which creates a temporary storage tree and a full
//! [`AppContext`]. The [`TestHarness::with_server`] constructor starts Axum on
//! a random port for HTTP-level testing.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use homestream::config::Config;
use homestream::server::{create_router, AppContext};
use tempfile::TempDir;

/// Test harness wrapping an [`AppContext`] over a temporary storage root.
pub struct TestHarness {
    pub ctx: AppContext,
    pub dir: TempDir,
}

impl TestHarness {
    /// Create a new harness with default streaming settings.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Create a new harness; storage paths in `config` are replaced with
    /// temporary ones.
    pub fn with_config(mut config: Config) -> Self {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        config.storage.media_dir = dir.path().join("media");
        config.storage.videos_dir = dir.path().join("media").join("videos");
        config.storage.create_dirs = true;

        let ctx = AppContext::new(config).expect("failed to build context");
        Self { ctx, dir }
    }

    /// Start an Axum server on a random port and return the harness together
    /// with the bound socket address.
    pub async fn with_server() -> (Self, SocketAddr) {
        Self::with_server_config(Config::default()).await
    }

    /// Start an Axum server with custom config on a random port.
    pub async fn with_server_config(config: Config) -> (Self, SocketAddr) {
        let harness = Self::with_config(config);
        let app = create_router(harness.ctx.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind random port");
        let addr = listener.local_addr().expect("failed to get local addr");

        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        (harness, addr)
    }

    pub fn videos_dir(&self) -> PathBuf {
        self.dir.path().join("media").join("videos")
    }

    pub fn media_dir(&self) -> PathBuf {
        self.dir.path().join("media")
    }

    /// Write a video into the storage root.
    pub fn add_video(&self, name: &str, data: &[u8]) -> PathBuf {
        let path = self.videos_dir().join(name);
        std::fs::write(&path, data).expect("failed to write video");
        path
    }

    /// Write a file next to (outside of) the storage root.
    pub fn add_outside(&self, relative: &Path, data: &[u8]) -> PathBuf {
        let path = self.dir.path().join(relative);
        std::fs::write(&path, data).expect("failed to write file");
        path
    }
}

/// Deterministic test payload; period 251 so offsets are distinguishable.
pub fn pattern(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i % 251) as u8).collect()
}
