//! `Range` header parsing.
//!
//! Only the single-range form `bytes=<start>-[<end>]` is accepted. Suffix
//! ranges (`bytes=-500`), multi-range sets and any offset outside the
//! resource are rejected rather than clamped; callers answer every
//! [`RangeError`] with `416 Range Not Satisfiable`.

use std::fmt;

/// An inclusive byte window `[start, end]` inside a resource.
///
/// Constructed only by [`parse_range`], which guarantees
/// `start <= end < total_size`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeSpec {
    pub start: u64,
    pub end: u64,
}

impl RangeSpec {
    /// Number of bytes covered by the window (`end - start + 1`).
    pub fn len(&self) -> u64 {
        self.end - self.start + 1
    }

    /// A parsed window is never empty.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// `Content-Range` header value for this window.
    pub fn content_range(&self, total_size: u64) -> String {
        format!("bytes {}-{}/{}", self.start, self.end, total_size)
    }
}

impl fmt::Display for RangeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// Why a `Range` header could not be honoured.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RangeError {
    #[error("malformed range: {0}")]
    Malformed(&'static str),

    #[error("multiple ranges are not supported")]
    MultipleRanges,

    #[error("range {start}-{end} does not fit a resource of {total_size} bytes")]
    OutOfBounds { start: u64, end: u64, total_size: u64 },

    #[error("range start {start} is after end {end}")]
    Inverted { start: u64, end: u64 },
}

fn parse_offset(s: &str) -> Result<u64, RangeError> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(RangeError::Malformed("offset is not a non-negative integer"));
    }
    s.parse()
        .map_err(|_| RangeError::Malformed("offset does not fit in 64 bits"))
}

/// Parse a `Range` header value against a resource of `total_size` bytes.
///
/// An omitted end defaults to `total_size - 1`.
pub fn parse_range(value: &str, total_size: u64) -> Result<RangeSpec, RangeError> {
    let (unit, set) = value
        .trim()
        .split_once('=')
        .ok_or(RangeError::Malformed("missing '='"))?;

    if !unit.trim().eq_ignore_ascii_case("bytes") {
        return Err(RangeError::Malformed("unit is not bytes"));
    }
    if set.contains(',') {
        return Err(RangeError::MultipleRanges);
    }

    let (start_str, end_str) = set
        .split_once('-')
        .ok_or(RangeError::Malformed("missing '-'"))?;

    let start = parse_offset(start_str.trim())?;
    let end_str = end_str.trim();
    let end = if end_str.is_empty() {
        None
    } else {
        Some(parse_offset(end_str)?)
    };

    if let Some(end) = end {
        if start > end {
            return Err(RangeError::Inverted { start, end });
        }
    }

    let last = total_size.checked_sub(1);
    match (last, end) {
        (Some(last), None) if start <= last => Ok(RangeSpec { start, end: last }),
        (Some(last), Some(end)) if end <= last => Ok(RangeSpec { start, end }),
        _ => Err(RangeError::OutOfBounds {
            start,
            end: end.unwrap_or(start),
            total_size,
        }),
    }
}
