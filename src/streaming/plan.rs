//! Response planning: status, byte window and length for a stream request.

use axum::http::StatusCode;
use homestream_common::{Error, Result};

use super::range::RangeRequest;

/// An inclusive `[start, end]` byte window inside a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteWindow {
    pub start: u64,
    pub end: u64,
}

impl ByteWindow {
    /// Number of bytes in the window (`end - start + 1`).
    pub fn len(&self) -> u64 {
        self.end - self.start + 1
    }
}

/// The decided response for one request. Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamPlan {
    /// 200 or 206. Unsatisfiable ranges never become a plan.
    pub status: StatusCode,
    /// `None` only for a full response over an empty file.
    pub window: Option<ByteWindow>,
    pub content_type: &'static str,
    pub resource_size: u64,
}

impl StreamPlan {
    /// Body length in bytes.
    pub fn length(&self) -> u64 {
        self.window.map_or(0, |w| w.len())
    }

    /// `Content-Range` value for partial responses.
    pub fn content_range(&self) -> Option<String> {
        if self.status != StatusCode::PARTIAL_CONTENT {
            return None;
        }
        self.window
            .map(|w| format!("bytes {}-{}/{}", w.start, w.end, self.resource_size))
    }
}

/// `Content-Range` value sent with a 416 response.
pub fn unsatisfied_content_range(size: u64) -> String {
    format!("bytes */{size}")
}

/// Decide how to answer `request` for a resource of `size` bytes.
///
/// Malformed headers fail with `MalformedRange`; a range starting at or past
/// the end (including any range over an empty file) fails with
/// `UnsatisfiableRange`.
pub fn plan_stream(
    request: &RangeRequest,
    size: u64,
    content_type: &'static str,
) -> Result<StreamPlan> {
    match request {
        RangeRequest::NoRange => Ok(StreamPlan {
            status: StatusCode::OK,
            window: size.checked_sub(1).map(|end| ByteWindow { start: 0, end }),
            content_type,
            resource_size: size,
        }),
        RangeRequest::Malformed(reason) => Err(Error::malformed_range(reason.clone())),
        RangeRequest::Range(spec) => {
            if spec.start >= size {
                return Err(Error::UnsatisfiableRange { size });
            }
            let last = size - 1;
            let end = spec.end.map_or(last, |end| end.min(last));
            Ok(StreamPlan {
                status: StatusCode::PARTIAL_CONTENT,
                window: Some(ByteWindow {
                    start: spec.start,
                    end,
                }),
                content_type,
                resource_size: size,
            })
        }
    }
}
