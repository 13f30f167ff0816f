//! Asset resolution: identifier → on-disk paths and byte length.
//!
//! [`AssetResolver`] is the seam between the HTTP layer and whatever knows
//! about media. [`StaticCatalog`] is the bundled implementation backed by the
//! `catalog` section of the config file.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use rc_core::config::{AssetEntry, CatalogConfig};
use rc_core::{guess_media_content_type, AssetId, MediaAsset, Result};

/// Maps asset identifiers to catalog entries and resolved assets.
#[async_trait]
pub trait AssetResolver: Send + Sync {
    /// Look up the catalog entry for `id`, with paths made absolute.
    fn lookup(&self, id: &AssetId) -> Option<AssetEntry>;

    /// All catalog entries in catalog order.
    fn entries(&self) -> Vec<AssetEntry>;

    /// Resolve `id` to a [`MediaAsset`].
    ///
    /// Returns `Ok(None)` when the id is unknown or its media file is absent.
    async fn resolve(&self, id: &AssetId) -> Result<Option<MediaAsset>> {
        let Some(entry) = self.lookup(id) else {
            return Ok(None);
        };

        let metadata = match tokio::fs::metadata(&entry.media_path).await {
            Ok(m) if m.is_file() => m,
            Ok(_) => return Ok(None),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(asset = %id, "Media file missing: {}", entry.media_path.display());
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        let content_type = entry
            .content_type
            .clone()
            .unwrap_or_else(|| guess_media_content_type(&entry.media_path).to_owned());

        Ok(Some(MediaAsset {
            id: entry.id,
            title: entry.title,
            description: entry.description,
            media_path: entry.media_path,
            byte_length: metadata.len(),
            content_type,
            caption_path: entry.caption_path,
            preview_path: entry.preview_path,
        }))
    }
}

/// Catalog built once from configuration; immutable afterwards.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    entries: Vec<AssetEntry>,
    index: HashMap<AssetId, usize>,
}

impl StaticCatalog {
    /// Build from a catalog config, resolving relative paths against
    /// `base_dir`. Duplicate ids keep their first entry.
    pub fn from_config(config: &CatalogConfig) -> Self {
        let mut catalog = Self::default();
        for entry in &config.assets {
            if catalog.index.contains_key(&entry.id) {
                tracing::warn!(asset = %entry.id, "Ignoring duplicate catalog entry");
                continue;
            }
            let entry = AssetEntry {
                media_path: join(&config.base_dir, &entry.media_path),
                caption_path: entry.caption_path.as_deref().map(|p| join(&config.base_dir, p)),
                preview_path: entry.preview_path.as_deref().map(|p| join(&config.base_dir, p)),
                ..entry.clone()
            };
            catalog.index.insert(entry.id.clone(), catalog.entries.len());
            catalog.entries.push(entry);
        }
        catalog
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn join(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

#[async_trait]
impl AssetResolver for StaticCatalog {
    fn lookup(&self, id: &AssetId) -> Option<AssetEntry> {
        self.index.get(id).map(|&i| self.entries[i].clone())
    }

    fn entries(&self) -> Vec<AssetEntry> {
        self.entries.clone()
    }
}
