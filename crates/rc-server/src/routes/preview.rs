//! Contact-sheet route.

use axum::extract::{Path, State};
use axum::response::Response;

use crate::context::AppContext;
use crate::delivery;
use crate::error::AppError;

/// GET /preview/{id}
pub async fn get_preview(
    State(ctx): State<AppContext>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let id = super::parse_asset_id(&id)?;

    let path = ctx
        .catalog
        .lookup(&id)
        .and_then(|entry| entry.preview_path)
        .ok_or_else(|| rc_core::Error::not_found("preview", &id))?;

    let content_type = rc_core::guess_image_content_type(&path);
    Ok(
        delivery::deliver_whole_file(&path, content_type, "preview", &id, &ctx.config.streaming)
            .await?,
    )
}
