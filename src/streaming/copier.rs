//! Chunked copier: moves a byte window from storage to a response sink
//! through one fixed-size buffer.
//!
//! The loop ends after exactly `length` bytes. A short read from storage is
//! reported as truncation rather than silently ending the body early.

use std::io::{self, SeekFrom};

use async_trait::async_trait;
use bytes::Bytes;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncSeek, AsyncSeekExt};
use tokio::sync::mpsc;

use super::plan::ByteWindow;

/// Default copy buffer size in bytes.
pub const DEFAULT_CHUNK_SIZE: usize = 8192;

/// The receiving side of a copy has gone away.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SinkClosed;

/// Destination of copied chunks.
#[async_trait]
pub trait ChunkSink: Send {
    /// Deliver one chunk. Fails once the receiver is gone.
    async fn send_chunk(&mut self, chunk: Bytes) -> Result<(), SinkClosed>;

    /// Signal that the body cannot be completed.
    async fn abort(&mut self, error: io::Error);
}

/// Why a copy stopped before delivering the whole window.
#[derive(Debug, thiserror::Error)]
pub enum CopyError {
    #[error("client disconnected after {sent} bytes")]
    Disconnected { sent: u64 },

    #[error("storage read failed after {sent} bytes: {source}")]
    Storage {
        sent: u64,
        #[source]
        source: io::Error,
    },

    #[error("storage ended after {sent} of {expected} bytes")]
    Truncated { expected: u64, sent: u64 },
}

impl CopyError {
    /// Bytes delivered before the copy stopped.
    pub fn sent(&self) -> u64 {
        match self {
            Self::Disconnected { sent }
            | Self::Storage { sent, .. }
            | Self::Truncated { sent, .. } => *sent,
        }
    }
}

/// Copy `window` from `reader` into `sink`, `chunk_size` bytes at a time.
///
/// Returns the number of bytes delivered, which always equals
/// `window.len()` on success.
pub async fn copy_window<R, S>(
    reader: &mut R,
    sink: &mut S,
    window: ByteWindow,
    chunk_size: usize,
) -> Result<u64, CopyError>
where
    R: AsyncRead + AsyncSeek + Unpin + Send,
    S: ChunkSink + ?Sized,
{
    let expected = window.len();

    reader
        .seek(SeekFrom::Start(window.start))
        .await
        .map_err(|source| CopyError::Storage { sent: 0, source })?;

    let buf_len = (chunk_size.max(1) as u64).min(expected) as usize;
    let mut buf = vec![0u8; buf_len];
    let mut sent = 0u64;

    while sent < expected {
        let want = (buf.len() as u64).min(expected - sent) as usize;
        let n = match reader.read(&mut buf[..want]).await {
            Ok(0) => return Err(CopyError::Truncated { expected, sent }),
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(source) => return Err(CopyError::Storage { sent, source }),
        };

        sink.send_chunk(Bytes::copy_from_slice(&buf[..n]))
            .await
            .map_err(|SinkClosed| CopyError::Disconnected { sent })?;
        sent += n as u64;
    }

    Ok(sent)
}

/// Response body channel: the receiving half is wrapped into the HTTP body.
#[async_trait]
impl ChunkSink for mpsc::Sender<io::Result<Bytes>> {
    async fn send_chunk(&mut self, chunk: Bytes) -> Result<(), SinkClosed> {
        self.send(Ok(chunk)).await.map_err(|_| SinkClosed)
    }

    async fn abort(&mut self, error: io::Error) {
        // An Err item makes the server drop the connection mid-body.
        let _ = self.send(Err(error)).await;
    }
}
