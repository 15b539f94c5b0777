//! Direct streaming with HTTP range requests.
//!
//! Serves stored media files with `206 Partial Content` support so players
//! can seek without fetching the whole file.

use std::io;

use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::Response,
};
use bytes::Bytes;
use tokio::fs::File;
use tokio::io::{AsyncRead, AsyncSeek};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_stream::wrappers::ReceiverStream;
use tracing::Instrument;

use super::copier::{copy_window, ChunkSink, CopyError};
use super::plan::{plan_stream, ByteWindow, StreamPlan};
use super::range::range_from_headers;
use crate::config::StreamingConfig;
use crate::server::error::AppError;
use crate::server::AppContext;

/// GET /stream/:filename
///
/// Responds 200 with the whole file, 206 with the requested window, 416 when
/// the range starts past the end, 400 for malformed ranges or traversal
/// attempts and 404 when the file is missing.
pub async fn stream_video(
    State(ctx): State<AppContext>,
    Path(filename): Path<String>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let resource = ctx.storage.resolve(&filename).await?;
    let range = range_from_headers(&headers);
    let plan = plan_stream(&range, resource.size(), resource.content_type())?;

    tracing::debug!(
        filename = %filename,
        status = plan.status.as_u16(),
        length = plan.length(),
        size = plan.resource_size,
        "Streaming media file"
    );

    build_response(&ctx.config.streaming, &plan, resource.into_file(), &filename)
}

/// Turn a plan into headers plus a lazily copied body.
fn build_response(
    settings: &StreamingConfig,
    plan: &StreamPlan,
    file: File,
    filename: &str,
) -> Result<Response, AppError> {
    let mut builder = Response::builder()
        .status(plan.status)
        .header(header::CONTENT_TYPE, plan.content_type)
        .header(header::CONTENT_LENGTH, plan.length().to_string())
        .header(header::ACCEPT_RANGES, "bytes");

    if let Some(content_range) = plan.content_range() {
        builder = builder.header(header::CONTENT_RANGE, content_range);
    }
    if let Some(cache_control) = settings.cache_control.as_deref() {
        builder = builder.header(header::CACHE_CONTROL, cache_control);
    }

    let body = match plan.window {
        Some(window) => spawn_copier(settings, file, window, filename).0,
        None => Body::empty(),
    };

    builder.body(body).map_err(|e| {
        AppError::from(homestream_common::Error::internal(format!(
            "Failed to build stream response: {e}"
        )))
    })
}

/// Start a per-request copy task feeding a bounded channel and return the
/// body reading from it.
///
/// The task owns the reader, so it is closed on every exit path.
fn spawn_copier<R>(
    settings: &StreamingConfig,
    mut reader: R,
    window: ByteWindow,
    filename: &str,
) -> (Body, JoinHandle<()>)
where
    R: AsyncRead + AsyncSeek + Unpin + Send + 'static,
{
    let (mut tx, rx) = mpsc::channel::<io::Result<Bytes>>(settings.channel_capacity.max(1));
    let chunk_size = settings.chunk_size;
    let span = tracing::debug_span!(
        "copy",
        filename = %filename,
        start = window.start,
        end = window.end,
        length = window.len()
    );

    let task = tokio::spawn(
        async move {
            let result = copy_window(&mut reader, &mut tx, window, chunk_size).await;
            match result {
                Ok(sent) => tracing::trace!(sent, "Stream complete"),
                Err(CopyError::Disconnected { sent }) => {
                    tracing::trace!(sent, "Client disconnected mid-stream");
                }
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        sent = e.sent(),
                        "Aborting stream after storage failure"
                    );
                    tx.abort(io::Error::other(e.to_string())).await;
                }
            }
        }
        .instrument(span),
    );

    (Body::from_stream(ReceiverStream::new(rx)), task)
}
