//! Shared test harness for integration tests.
//!
//! [`TestHarness`] owns a temporary media directory and a [`Config`] whose
//! catalog points into it. [`TestHarness::serve`] starts the server on a
//! random port and returns a [`RunningServer`] that shuts down on drop.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::path::PathBuf;

use rc_core::config::{AssetEntry, Config};
use rc_server::AppContext;
use tempfile::TempDir;
use tokio_util::sync::CancellationToken;

/// Deterministic, non-repeating-per-256 byte pattern so any window can be
/// checked against its offsets.
pub fn pattern_bytes(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i % 251) as u8).collect()
}

pub struct TestHarness {
    pub dir: TempDir,
    pub config: Config,
}

impl TestHarness {
    /// Empty catalog rooted in a fresh temporary directory.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let mut config = Config::default();
        config.catalog.base_dir = dir.path().to_path_buf();
        Self { dir, config }
    }

    /// Harness with a single asset `id` whose media file holds `len` pattern bytes.
    pub fn with_media(id: &str, len: usize) -> Self {
        let mut harness = Self::new();
        let file = format!("{id}.mp4");
        harness.write_file(&file, &pattern_bytes(len));
        harness.add_asset(id, &file, None, None);
        harness
    }

    pub fn write_file(&self, name: &str, contents: &[u8]) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, contents).expect("failed to write fixture");
        path
    }

    /// Register an asset with paths relative to the harness directory.
    /// Files need not exist.
    pub fn add_asset(
        &mut self,
        id: &str,
        media: &str,
        caption: Option<&str>,
        preview: Option<&str>,
    ) {
        self.config.catalog.assets.push(AssetEntry {
            id: id.parse().expect("invalid asset id"),
            title: format!("Title of {id}"),
            description: format!("Description of {id}"),
            media_path: PathBuf::from(media),
            content_type: None,
            caption_path: caption.map(PathBuf::from),
            preview_path: preview.map(PathBuf::from),
        });
    }

    /// Start the server on a random port.
    pub async fn serve(self) -> RunningServer {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind random port");
        let addr = listener.local_addr().expect("failed to get local addr");

        let ctx = AppContext::from_config(self.config);
        let cancel = CancellationToken::new();
        let server_cancel = cancel.clone();
        tokio::spawn(async move {
            rc_server::serve(listener, ctx, server_cancel).await.ok();
        });

        RunningServer {
            addr,
            cancel,
            _dir: self.dir,
        }
    }
}

pub struct RunningServer {
    pub addr: SocketAddr,
    cancel: CancellationToken,
    _dir: TempDir,
}

impl RunningServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        reqwest::get(self.url(path)).await.expect("request failed")
    }

    pub async fn get_range(&self, path: &str, range: &str) -> reqwest::Response {
        reqwest::Client::new()
            .get(self.url(path))
            .header("Range", range)
            .send()
            .await
            .expect("request failed")
    }
}

impl Drop for RunningServer {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
