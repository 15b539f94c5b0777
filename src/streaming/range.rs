//! `Range` request header parsing.
//!
//! Only a single `bytes=<start>-[end]` range is understood. Suffix ranges
//! (`bytes=-500`) and multi-range requests are rejected as malformed.

use axum::http::{header, HeaderMap};

/// A parsed byte range with an inclusive start and optional inclusive end.
///
/// `end == None` means "to the end of the resource".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeSpec {
    pub start: u64,
    pub end: Option<u64>,
}

/// Outcome of inspecting a request for a range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RangeRequest {
    /// No `Range` header was sent.
    NoRange,
    /// A single, syntactically valid byte range.
    Range(RangeSpec),
    /// A `Range` header was sent but could not be understood.
    Malformed(String),
}

/// Parse the raw `Range` header value, if any.
pub fn parse_range_header(value: Option<&str>) -> RangeRequest {
    let Some(value) = value else {
        return RangeRequest::NoRange;
    };

    match parse_bytes_range(value.trim()) {
        Ok(spec) => RangeRequest::Range(spec),
        Err(reason) => RangeRequest::Malformed(format!("{reason}: {value:?}")),
    }
}

/// Inspect request headers for a range.
///
/// Repeated `Range` headers and non-ASCII values are malformed.
pub fn range_from_headers(headers: &HeaderMap) -> RangeRequest {
    let mut values = headers.get_all(header::RANGE).iter();
    let Some(first) = values.next() else {
        return RangeRequest::NoRange;
    };
    if values.next().is_some() {
        return RangeRequest::Malformed("multiple Range headers".to_string());
    }

    match first.to_str() {
        Ok(value) => parse_range_header(Some(value)),
        Err(_) => RangeRequest::Malformed("Range header is not visible ASCII".to_string()),
    }
}

fn parse_bytes_range(value: &str) -> Result<RangeSpec, &'static str> {
    let spec = value
        .get(..6)
        .filter(|unit| unit.eq_ignore_ascii_case("bytes="))
        .map(|_| &value[6..])
        .ok_or("unsupported range unit")?;

    if spec.contains(',') {
        return Err("multiple ranges are not supported");
    }

    let (start, end) = spec.split_once('-').ok_or("missing '-' separator")?;
    let (start, end) = (start.trim(), end.trim());

    if start.is_empty() {
        return Err("suffix ranges are not supported");
    }

    let start = parse_offset(start)?;
    let end = if end.is_empty() {
        None
    } else {
        Some(parse_offset(end)?)
    };

    if let Some(end) = end {
        if end < start {
            return Err("range end precedes start");
        }
    }

    Ok(RangeSpec { start, end })
}

/// Digits only: `u64::from_str` alone would also take a leading `+`.
fn parse_offset(digits: &str) -> Result<u64, &'static str> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err("byte offset is not a number");
    }
    digits.parse().map_err(|_| "byte offset out of range")
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use axum::http::HeaderValue;

    fn spec(start: u64, end: Option<u64>) -> RangeRequest {
        RangeRequest::Range(RangeSpec { start, end })
    }

    #[test]
    fn absent_header_is_no_range() {
        assert_eq!(parse_range_header(None), RangeRequest::NoRange);
    }

    #[test]
    fn closed_range() {
        assert_eq!(parse_range_header(Some("bytes=0-499")), spec(0, Some(499)));
        assert_eq!(parse_range_header(Some("bytes=10-20")), spec(10, Some(20)));
    }

    #[test]
    fn open_range() {
        assert_eq!(parse_range_header(Some("bytes=500-")), spec(500, None));
    }

    #[test]
    fn single_byte_range() {
        assert_eq!(parse_range_header(Some("bytes=7-7")), spec(7, Some(7)));
    }

    #[test]
    fn tolerates_whitespace_and_unit_case() {
        assert_eq!(parse_range_header(Some("  bytes=1-2 ")), spec(1, Some(2)));
        assert_eq!(parse_range_header(Some("Bytes=1 - 2")), spec(1, Some(2)));
    }

    #[test]
    fn end_beyond_size_is_left_for_planner() {
        assert_eq!(
            parse_range_header(Some("bytes=0-999999")),
            spec(0, Some(999_999))
        );
    }

    #[test]
    fn malformed_syntax() {
        for value in [
            "bytes=abc-def",
            "bytes=",
            "bytes=-",
            "bytes=5",
            "bytes=+5-10",
            "bytes=5--10",
            "bytes=0x10-20",
            "items=0-10",
            "0-10",
            "",
        ] {
            assert_matches!(
                parse_range_header(Some(value)),
                RangeRequest::Malformed(_),
                "{value:?} should be malformed"
            );
        }
    }

    #[test]
    fn suffix_range_is_unsupported() {
        assert_matches!(
            parse_range_header(Some("bytes=-500")),
            RangeRequest::Malformed(reason) if reason.contains("suffix")
        );
    }

    #[test]
    fn multiple_ranges_are_unsupported() {
        assert_matches!(
            parse_range_header(Some("bytes=0-10,20-30")),
            RangeRequest::Malformed(reason) if reason.contains("multiple")
        );
    }

    #[test]
    fn reversed_range_is_malformed() {
        assert_matches!(
            parse_range_header(Some("bytes=10-5")),
            RangeRequest::Malformed(_)
        );
    }

    #[test]
    fn overflowing_offset_is_malformed() {
        assert_matches!(
            parse_range_header(Some("bytes=99999999999999999999-")),
            RangeRequest::Malformed(reason) if reason.contains("out of range")
        );
        assert_eq!(
            parse_range_header(Some("bytes=18446744073709551615-")),
            spec(u64::MAX, None)
        );
    }

    #[test]
    fn headers_without_range() {
        assert_eq!(range_from_headers(&HeaderMap::new()), RangeRequest::NoRange);
    }

    #[test]
    fn headers_with_range() {
        let mut headers = HeaderMap::new();
        headers.insert(header::RANGE, HeaderValue::from_static("bytes=100-199"));
        assert_eq!(range_from_headers(&headers), spec(100, Some(199)));
    }

    #[test]
    fn headers_with_repeated_range() {
        let mut headers = HeaderMap::new();
        headers.append(header::RANGE, HeaderValue::from_static("bytes=0-1"));
        headers.append(header::RANGE, HeaderValue::from_static("bytes=2-3"));
        assert_matches!(range_from_headers(&headers), RangeRequest::Malformed(_));
    }

    #[test]
    fn headers_with_opaque_bytes() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::RANGE,
            HeaderValue::from_bytes(b"bytes=0-\xff").unwrap(),
        );
        assert_matches!(range_from_headers(&headers), RangeRequest::Malformed(_));
    }
}
