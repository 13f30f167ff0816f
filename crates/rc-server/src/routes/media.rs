//! Media byte delivery with HTTP range support.

use axum::extract::{Path, State};
use axum::http::{header, HeaderMap};
use axum::response::Response;

use crate::context::AppContext;
use crate::delivery;
use crate::error::AppError;

/// GET /media/{id}
///
/// `200` with the whole file, `206` with the requested window, `404` when the
/// asset or its file is missing, `416` for malformed or unsatisfiable ranges.
pub async fn stream_media(
    State(ctx): State<AppContext>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let id = super::parse_asset_id(&id)?;

    let asset = ctx
        .catalog
        .resolve(&id)
        .await?
        .ok_or_else(|| rc_core::Error::not_found("asset", &id))?;

    // A header that is not visible ASCII can never parse; an empty value
    // routes it to the same 416 answer.
    let range = headers
        .get(header::RANGE)
        .map(|v| v.to_str().unwrap_or_default());

    Ok(delivery::deliver_media(&asset, range, &ctx.config.streaming).await?)
}
