//! Range delivery: decides what window of a file to send and streams it.
//!
//! Files are never buffered whole. Each response owns its own file handle,
//! positioned at the window start and capped with `take`, and wrapped in a
//! `ReaderStream`. Hyper only polls the stream when the connection can accept
//! more bytes, so a slow client throttles its own reads and nothing else.

use std::fmt;
use std::io::SeekFrom;
use std::path::Path;

use axum::body::Body;
use axum::http::{header, StatusCode};
use axum::response::Response;
use futures::TryStreamExt;
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncSeekExt};
use tokio_util::io::ReaderStream;

use rc_core::config::StreamingConfig;
use rc_core::{Error, MediaAsset, Result};

use crate::range::{parse_range, RangeSpec};

/// What a media request will receive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryPlan {
    /// No `Range` header: the whole file with `200 OK`.
    Full { total_size: u64 },
    /// A satisfiable window with `206 Partial Content`.
    Partial { range: RangeSpec, total_size: u64 },
}

impl DeliveryPlan {
    pub fn status(&self) -> StatusCode {
        match self {
            DeliveryPlan::Full { .. } => StatusCode::OK,
            DeliveryPlan::Partial { .. } => StatusCode::PARTIAL_CONTENT,
        }
    }

    /// Byte offset of the first byte sent.
    pub fn offset(&self) -> u64 {
        match self {
            DeliveryPlan::Full { .. } => 0,
            DeliveryPlan::Partial { range, .. } => range.start,
        }
    }

    /// Number of bytes sent, advertised as `Content-Length`.
    pub fn content_length(&self) -> u64 {
        match self {
            DeliveryPlan::Full { total_size } => *total_size,
            DeliveryPlan::Partial { range, .. } => range.len(),
        }
    }

    /// `Content-Range` value, present only for partial responses.
    pub fn content_range(&self) -> Option<String> {
        match self {
            DeliveryPlan::Full { .. } => None,
            DeliveryPlan::Partial { range, total_size } => Some(range.content_range(*total_size)),
        }
    }
}

/// Decide how to answer a request for a resource of `total_size` bytes.
///
/// Any malformed or unsatisfiable range becomes
/// [`Error::RangeNotSatisfiable`].
pub fn plan_delivery(total_size: u64, range_header: Option<&str>) -> Result<DeliveryPlan> {
    let Some(value) = range_header else {
        return Ok(DeliveryPlan::Full { total_size });
    };

    match parse_range(value, total_size) {
        Ok(range) => Ok(DeliveryPlan::Partial { range, total_size }),
        Err(e) => {
            tracing::debug!(range = value, total_size, "Rejecting range: {e}");
            Err(Error::unsatisfiable(total_size))
        }
    }
}

/// Open a regular file, mapping absence to [`Error::NotFound`].
async fn open_existing(path: &Path, entity: &str, id: impl fmt::Display) -> Result<(File, u64)> {
    let file = match File::open(path).await {
        Ok(f) => f,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(Error::not_found(entity, id));
        }
        Err(e) => return Err(e.into()),
    };

    let metadata = file.metadata().await?;
    if !metadata.is_file() {
        return Err(Error::not_found(entity, id));
    }
    Ok((file, metadata.len()))
}

/// Stream at most `length` bytes from the file's current position.
fn bounded_body(file: File, length: u64, chunk_size: usize, path: &Path) -> Body {
    let path = path.to_path_buf();
    let stream = ReaderStream::with_capacity(file.take(length), chunk_size).inspect_err(
        move |e| {
            tracing::warn!("Aborting response body for {}: {e}", path.display());
        },
    );
    Body::from_stream(stream)
}

/// Answer a media request: the whole file, or the window named by
/// `range_header`.
///
/// The size is taken from the open handle rather than the catalog so the
/// advertised length always matches what the cursor can read.
pub async fn deliver_media(
    asset: &MediaAsset,
    range_header: Option<&str>,
    streaming: &StreamingConfig,
) -> Result<Response> {
    let (mut file, total_size) = open_existing(&asset.media_path, "media_file", &asset.id).await?;
    let plan = plan_delivery(total_size, range_header)?;

    if plan.offset() > 0 {
        file.seek(SeekFrom::Start(plan.offset())).await?;
    }

    tracing::debug!(
        asset = %asset.id,
        status = plan.status().as_u16(),
        offset = plan.offset(),
        length = plan.content_length(),
        "Delivering media"
    );

    let body = bounded_body(
        file,
        plan.content_length(),
        streaming.effective_chunk_size(),
        &asset.media_path,
    );

    let mut builder = Response::builder()
        .status(plan.status())
        .header(header::CONTENT_TYPE, asset.content_type.as_str())
        .header(header::CONTENT_LENGTH, plan.content_length())
        .header(header::ACCEPT_RANGES, "bytes");

    if let Some(content_range) = plan.content_range() {
        builder = builder.header(header::CONTENT_RANGE, content_range);
    }
    if let Some(secs) = streaming.cache_max_age_secs {
        builder = builder.header(header::CACHE_CONTROL, format!("max-age={secs}"));
    }

    builder
        .body(body)
        .map_err(|e| Error::Internal(format!("Failed to build media response: {e}")))
}

/// Serve a whole file with `200 OK`, or [`Error::NotFound`] if it is absent.
///
/// Used for caption tracks and contact sheets, which never take ranges.
pub async fn deliver_whole_file(
    path: &Path,
    content_type: &str,
    entity: &str,
    id: impl fmt::Display,
    streaming: &StreamingConfig,
) -> Result<Response> {
    let (file, size) = open_existing(path, entity, id).await?;
    let body = bounded_body(file, size, streaming.effective_chunk_size(), path);

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CONTENT_LENGTH, size)
        .body(body)
        .map_err(|e| Error::Internal(format!("Failed to build file response: {e}")))
}
