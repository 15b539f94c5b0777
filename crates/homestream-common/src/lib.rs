//! Homestream-Common: Shared error types and media path utilities.
//!
//! - **Error Handling**: the request-scoped error taxonomy and its HTTP mapping
//! - **Path Utilities**: the fixed extension to MIME table used for streaming
//!
//! # Examples
//!
//! ```
//! use homestream_common::{Error, Result};
//! use homestream_common::paths::content_type_for;
//! use std::path::Path;
//!
//! assert_eq!(content_type_for(Path::new("movie.webm")), "video/webm");
//!
//! fn example() -> Result<()> {
//!     Err(Error::not_found("movie.webm"))
//! }
//! assert_eq!(example().unwrap_err().http_status(), 404);
//! ```

pub mod error;
pub mod paths;

pub use error::{Error, Result};
