//! Caption track route.

use axum::extract::{Path, State};
use axum::response::Response;

use crate::context::AppContext;
use crate::delivery;
use crate::error::AppError;

/// GET /captions/{id}: the asset's WebVTT track, or 404 when the asset has
/// none configured or the file is absent.
pub async fn get_caption(
    State(ctx): State<AppContext>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let id = super::parse_asset_id(&id)?;

    let path = ctx
        .catalog
        .lookup(&id)
        .and_then(|entry| entry.caption_path)
        .ok_or_else(|| rc_core::Error::not_found("caption", &id))?;

    Ok(delivery::deliver_whole_file(
        &path,
        rc_core::CAPTION_CONTENT_TYPE,
        "caption",
        &id,
        &ctx.config.streaming,
    )
    .await?)
}
