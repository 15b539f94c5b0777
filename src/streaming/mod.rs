//! Media streaming module.
//!
//! Serves stored video files over HTTP with single byte-range support.
//!
//! A request flows through four stages:
//!
//! 1. [`resolver`] maps the filename to an open file under the storage root
//! 2. [`range`] parses the `Range` header
//! 3. [`plan`] picks status, window and headers for the current file size
//! 4. [`copier`] streams the window in fixed-size chunks
//!
//! # Routes
//!
//! - `GET /stream/{filename}` - Direct file streaming with range support

pub mod copier;
mod direct;
pub mod plan;
pub mod range;
pub mod resolver;

pub use copier::{copy_window, ChunkSink, CopyError, DEFAULT_CHUNK_SIZE};
pub use direct::stream_video;
pub use plan::{plan_stream, ByteWindow, StreamPlan};
pub use range::{parse_range_header, range_from_headers, RangeRequest, RangeSpec};
pub use resolver::{MediaResource, StorageRoot};

use axum::{routing::get, Router};

use crate::server::AppContext;

/// Create the stream router, nested under `/stream`.
pub fn stream_router() -> Router<AppContext> {
    Router::new().route("/:filename", get(stream_video))
}
