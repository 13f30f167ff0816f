//! Media asset descriptors and content-type guessing.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::AssetId;

/// Content type served for caption tracks.
pub const CAPTION_CONTENT_TYPE: &str = "text/vtt";

// ---------------------------------------------------------------------------
// MediaAsset
// ---------------------------------------------------------------------------

/// A resolved media asset.
///
/// Produced by the catalog after the backing file has been stat'ed; immutable
/// for the lifetime of a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaAsset {
    pub id: AssetId,
    pub title: String,
    pub description: String,
    pub media_path: PathBuf,
    /// Size of the media file in bytes at resolution time.
    pub byte_length: u64,
    pub content_type: String,
    pub caption_path: Option<PathBuf>,
    pub preview_path: Option<PathBuf>,
}

impl MediaAsset {
    /// Whether a caption track is configured for this asset.
    pub fn has_caption(&self) -> bool {
        self.caption_path.is_some()
    }

    /// Build the client-facing record using the given URL prefix (which may
    /// be empty for same-origin relative URLs).
    pub fn record(&self, base_url: &str) -> AssetRecord {
        AssetRecord::new(
            &self.id,
            &self.title,
            &self.description,
            self.has_caption(),
            base_url,
        )
    }
}

// ---------------------------------------------------------------------------
// AssetRecord
// ---------------------------------------------------------------------------

/// Client-facing description of an asset, used to initialize a playback
/// surface. The URLs are opaque to the player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetRecord {
    pub id: AssetId,
    pub title: String,
    pub description: String,
    pub media_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption_url: Option<String>,
    pub preview_url: String,
}

impl AssetRecord {
    /// Build a record pointing at the primary `/media`, `/captions` and
    /// `/preview` routes under `base_url`.
    pub fn new(
        id: &AssetId,
        title: &str,
        description: &str,
        has_caption: bool,
        base_url: &str,
    ) -> Self {
        let base = base_url.trim_end_matches('/');
        Self {
            id: id.clone(),
            title: title.to_owned(),
            description: description.to_owned(),
            media_url: format!("{base}/media/{id}"),
            caption_url: has_caption.then(|| format!("{base}/captions/{id}")),
            preview_url: format!("{base}/preview/{id}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Content types
// ---------------------------------------------------------------------------

fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase()
}

/// Guess the MIME type of a media file from its extension.
pub fn guess_media_content_type(path: &Path) -> &'static str {
    match extension_of(path).as_str() {
        "mp4" | "m4v" => "video/mp4",
        "webm" => "video/webm",
        "mkv" => "video/x-matroska",
        "mov" => "video/quicktime",
        "ts" => "video/mp2t",
        "ogv" => "video/ogg",
        "m4a" => "audio/mp4",
        "mp3" => "audio/mpeg",
        "ogg" | "oga" => "audio/ogg",
        "wav" => "audio/wav",
        _ => "application/octet-stream",
    }
}

/// Guess the MIME type of a contact-sheet image from its extension.
pub fn guess_image_content_type(path: &Path) -> &'static str {
    match extension_of(path).as_str() {
        "png" => "image/png",
        "webp" => "image/webp",
        "gif" => "image/gif",
        _ => "image/jpeg",
    }
}
