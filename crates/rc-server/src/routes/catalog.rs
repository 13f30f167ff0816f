//! Catalog listing routes: the records a client needs to set up playback.

use axum::extract::{Path, State};
use axum::Json;

use rc_core::config::AssetEntry;
use rc_core::AssetRecord;

use crate::context::AppContext;
use crate::error::AppError;

fn to_record(entry: &AssetEntry, base_url: &str) -> AssetRecord {
    AssetRecord::new(
        &entry.id,
        &entry.title,
        &entry.description,
        entry.caption_path.is_some(),
        base_url,
    )
}

/// GET /api/catalog
pub async fn list_assets(State(ctx): State<AppContext>) -> Json<Vec<AssetRecord>> {
    let base_url = &ctx.config.server.public_url;
    Json(
        ctx.catalog
            .entries()
            .iter()
            .map(|e| to_record(e, base_url))
            .collect(),
    )
}

/// GET /api/catalog/{id}
pub async fn get_asset(
    State(ctx): State<AppContext>,
    Path(id): Path<String>,
) -> Result<Json<AssetRecord>, AppError> {
    let id = super::parse_asset_id(&id)?;
    let entry = ctx
        .catalog
        .lookup(&id)
        .ok_or_else(|| rc_core::Error::not_found("asset", &id))?;
    Ok(Json(to_record(&entry, &ctx.config.server.public_url)))
}
