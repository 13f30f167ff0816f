//! Application configuration types.
//!
//! The top-level [`Config`] struct is deserialized from JSON. Every section
//! defaults sensibly so a completely empty `{}` file is valid.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::{AssetId, Error};

// ---------------------------------------------------------------------------
// Top-level Config
// ---------------------------------------------------------------------------

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub streaming: StreamingConfig,
    pub catalog: CatalogConfig,
    pub preview: PreviewConfig,
}

impl Config {
    /// Deserialize a `Config` from a JSON string.
    pub fn from_json(json_str: &str) -> Result<Self> {
        serde_json::from_str(json_str)
            .map_err(|e| Error::Validation(format!("config parse error: {e}")))
    }

    /// Load configuration from a file path.
    ///
    /// A `None` path or a missing file yields the defaults; a file that
    /// exists but cannot be read or parsed is an error.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        match std::fs::read_to_string(path) {
            Ok(contents) => Self::from_json(&contents),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("No config file at {}; using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(Error::Io { source: e }),
        }
    }

    /// Return a list of validation warnings (non-fatal issues).
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.server.port == 0 {
            warnings.push("server.port is 0; a random port will be assigned".into());
        }

        if self.streaming.chunk_size == 0 {
            warnings.push(format!(
                "streaming.chunk_size is 0; the default of {DEFAULT_CHUNK_SIZE} bytes is used"
            ));
        }

        let mut seen = HashSet::new();
        for (i, asset) in self.catalog.assets.iter().enumerate() {
            if !seen.insert(&asset.id) {
                warnings.push(format!(
                    "catalog.assets[{i}].id '{}' is a duplicate; only the first entry is served",
                    asset.id
                ));
            }
            if asset.media_path.as_os_str().is_empty() {
                warnings.push(format!("catalog.assets[{i}].media_path is empty"));
            }
        }

        let p = &self.preview;
        if p.cell_width == 0 || p.cell_height == 0 {
            warnings.push("preview cell dimensions must be non-zero".into());
        } else {
            if p.sheet_width % p.cell_width != 0 {
                warnings.push(format!(
                    "preview.sheet_width {} is not a multiple of cell_width {}",
                    p.sheet_width, p.cell_width
                ));
            }
            if p.sheet_width < p.cell_width {
                warnings.push("preview sheet is narrower than one cell".into());
            }
            let columns = u64::from((p.sheet_width / p.cell_width).max(1));
            let last_row_y = 100 / columns * u64::from(p.cell_height);
            if last_row_y > u64::from(p.sheet_height) {
                warnings.push(format!(
                    "preview.sheet_height {} is too short: the last cell starts at y={last_row_y}",
                    p.sheet_height
                ));
            }
        }

        warnings
    }
}

// ---------------------------------------------------------------------------
// Sub-configs
// ---------------------------------------------------------------------------

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory holding a built web client, served as an SPA fallback.
    pub static_dir: Option<PathBuf>,
    /// Prefix used when building catalog URLs (empty = same-origin paths).
    pub public_url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 3001,
            static_dir: None,
            public_url: String::new(),
        }
    }
}

/// Default read-cursor chunk size for streamed responses.
pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;

/// Byte delivery settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamingConfig {
    /// Size of each read from the media file while streaming a response.
    pub chunk_size: usize,
    /// When set, media responses carry `Cache-Control: max-age=<secs>`.
    pub cache_max_age_secs: Option<u64>,
}

impl Default for StreamingConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            cache_max_age_secs: None,
        }
    }
}

impl StreamingConfig {
    /// Chunk size with a zero value replaced by the default.
    pub fn effective_chunk_size(&self) -> usize {
        if self.chunk_size == 0 {
            DEFAULT_CHUNK_SIZE
        } else {
            self.chunk_size
        }
    }
}

/// Static asset catalog.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Relative asset paths are resolved against this directory.
    pub base_dir: PathBuf,
    pub assets: Vec<AssetEntry>,
}

/// One catalog entry as written in the config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetEntry {
    pub id: AssetId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub media_path: PathBuf,
    /// Overrides the content type guessed from the media file extension.
    #[serde(default)]
    pub content_type: Option<String>,
    #[serde(default)]
    pub caption_path: Option<PathBuf>,
    #[serde(default)]
    pub preview_path: Option<PathBuf>,
}

/// Contact-sheet grid constants shared by the server (for `cell`) and the
/// playback core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewConfig {
    pub sheet_width: u32,
    pub sheet_height: u32,
    pub cell_width: u32,
    pub cell_height: u32,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            sheet_width: 800,
            sheet_height: 450,
            cell_width: 80,
            cell_height: 45,
        }
    }
}
