//! Route handlers for the HTTP API.

pub mod captions;
pub mod catalog;
pub mod health;
pub mod media;
pub mod preview;

use rc_core::AssetId;

/// Parse a path segment as an asset id.
///
/// An id that cannot exist in any catalog is simply not found.
pub(crate) fn parse_asset_id(raw: &str) -> rc_core::Result<AssetId> {
    raw.parse()
        .map_err(|_| rc_core::Error::not_found("asset", raw))
}
