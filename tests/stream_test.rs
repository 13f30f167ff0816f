//! Integration tests for media byte delivery over HTTP.

mod common;

use common::{pattern_bytes, TestHarness};

fn header<'a>(resp: &'a reqwest::Response, name: &str) -> Option<&'a str> {
    resp.headers().get(name).and_then(|v| v.to_str().ok())
}

#[tokio::test]
async fn full_request_streams_whole_file() {
    let server = TestHarness::with_media("clip", 4096).serve().await;

    let resp = server.get("/media/clip").await;
    assert_eq!(resp.status(), 200);
    assert_eq!(header(&resp, "content-type"), Some("video/mp4"));
    assert_eq!(header(&resp, "content-length"), Some("4096"));
    assert_eq!(header(&resp, "accept-ranges"), Some("bytes"));
    assert_eq!(header(&resp, "content-range"), None);

    let body = resp.bytes().await.unwrap();
    assert_eq!(body.as_ref(), pattern_bytes(4096).as_slice());
}

#[tokio::test]
async fn closed_range_returns_exact_window() {
    let server = TestHarness::with_media("clip", 2048).serve().await;

    let resp = server.get_range("/media/clip", "bytes=100-199").await;
    assert_eq!(resp.status(), 206);
    assert_eq!(header(&resp, "content-range"), Some("bytes 100-199/2048"));
    assert_eq!(header(&resp, "content-length"), Some("100"));
    assert_eq!(header(&resp, "accept-ranges"), Some("bytes"));

    let body = resp.bytes().await.unwrap();
    assert_eq!(body.as_ref(), &pattern_bytes(2048)[100..200]);
}

#[tokio::test]
async fn open_ended_range_on_large_file() {
    let server = TestHarness::with_media("big", 1_000_000).serve().await;

    let resp = server.get_range("/media/big", "bytes=500000-").await;
    assert_eq!(resp.status(), 206);
    assert_eq!(
        header(&resp, "content-range"),
        Some("bytes 500000-999999/1000000")
    );
    assert_eq!(header(&resp, "content-length"), Some("500000"));

    let body = resp.bytes().await.unwrap();
    assert_eq!(body.len(), 500_000);
    assert_eq!(body.as_ref(), &pattern_bytes(1_000_000)[500_000..]);
}

#[tokio::test]
async fn no_range_matches_full_explicit_range() {
    let server = TestHarness::with_media("clip", 10_000).serve().await;

    let full = server.get("/media/clip").await.bytes().await.unwrap();
    let ranged = server
        .get_range("/media/clip", "bytes=0-9999")
        .await
        .bytes()
        .await
        .unwrap();
    assert_eq!(full, ranged);
}

#[tokio::test]
async fn unsatisfiable_ranges_are_416_with_no_body() {
    let server = TestHarness::with_media("clip", 1000).serve().await;

    for range in [
        "bytes=1000-",
        "bytes=5000-6000",
        "bytes=500-100",
        "bytes=0-1000",
        "bytes=abc-",
        "bytes=-500",
        "bytes=0-99,200-299",
        "pages=0-10",
    ] {
        let resp = server.get_range("/media/clip", range).await;
        assert_eq!(resp.status(), 416, "{range}");
        assert_eq!(header(&resp, "content-range"), Some("bytes */1000"), "{range}");
        let body = resp.bytes().await.unwrap();
        assert!(body.is_empty(), "{range}");
    }
}

#[tokio::test]
async fn empty_file_full_request_and_range() {
    let mut harness = TestHarness::new();
    harness.write_file("empty.mp4", b"");
    harness.add_asset("empty", "empty.mp4", None, None);
    let server = harness.serve().await;

    let resp = server.get("/media/empty").await;
    assert_eq!(resp.status(), 200);
    assert_eq!(header(&resp, "content-length"), Some("0"));

    let resp = server.get_range("/media/empty", "bytes=0-").await;
    assert_eq!(resp.status(), 416);
    assert_eq!(header(&resp, "content-range"), Some("bytes */0"));
}

#[tokio::test]
async fn unknown_asset_is_404() {
    let server = TestHarness::with_media("clip", 10).serve().await;

    let resp = server.get("/media/nope").await;
    assert_eq!(resp.status(), 404);
    assert!(resp.bytes().await.unwrap().is_empty());
}

#[tokio::test]
async fn asset_missing_on_disk_is_404_with_empty_body() {
    let mut harness = TestHarness::new();
    harness.add_asset("ghost", "ghost.mp4", None, None);
    let server = harness.serve().await;

    let resp = server.get("/media/ghost").await;
    assert_eq!(resp.status(), 404);
    assert!(resp.bytes().await.unwrap().is_empty());

    // Range does not change the answer for a missing file.
    let resp = server.get_range("/media/ghost", "bytes=0-10").await;
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn legacy_stream_alias_serves_same_bytes() {
    let server = TestHarness::with_media("clip", 3000).serve().await;

    let primary = server
        .get_range("/media/clip", "bytes=1000-1999")
        .await
        .bytes()
        .await
        .unwrap();
    let resp = server
        .get_range("/api/stream/video/clip", "bytes=1000-1999")
        .await;
    assert_eq!(resp.status(), 206);
    assert_eq!(resp.bytes().await.unwrap(), primary);
}

#[tokio::test]
async fn concurrent_overlapping_ranges_are_independent() {
    let len = 200_000;
    let server = TestHarness::with_media("clip", len).serve().await;
    let expected = pattern_bytes(len);

    let windows: Vec<(usize, usize)> = (0..16)
        .map(|i| {
            let start = i * 9_000;
            (start, start + 50_000)
        })
        .collect();

    let requests = windows.iter().map(|&(start, end)| {
        let range = format!("bytes={start}-{end}");
        let server = &server;
        async move {
            let resp = server.get_range("/media/clip", &range).await;
            assert_eq!(resp.status(), 206);
            resp.bytes().await.unwrap()
        }
    });

    let bodies = futures::future::join_all(requests).await;
    for ((start, end), body) in windows.iter().zip(bodies) {
        assert_eq!(body.as_ref(), &expected[*start..=*end]);
    }
}

#[tokio::test]
async fn cache_control_when_configured() {
    let mut harness = TestHarness::with_media("clip", 100);
    harness.config.streaming.cache_max_age_secs = Some(3600);
    harness.config.streaming.chunk_size = 7;
    let server = harness.serve().await;

    let resp = server.get("/media/clip").await;
    assert_eq!(header(&resp, "cache-control"), Some("max-age=3600"));
    // A tiny read chunk still yields the whole file.
    assert_eq!(resp.bytes().await.unwrap().len(), 100);
}

#[tokio::test]
async fn content_type_override_and_guess() {
    let mut harness = TestHarness::new();
    harness.write_file("a.webm", b"webm-bytes");
    harness.write_file("b.bin", b"raw");
    harness.add_asset("a", "a.webm", None, None);
    harness.add_asset("b", "b.bin", None, None);
    harness.config.catalog.assets[1].content_type = Some("video/x-custom".into());
    let server = harness.serve().await;

    let resp = server.get("/media/a").await;
    assert_eq!(header(&resp, "content-type"), Some("video/webm"));
    let resp = server.get("/media/b").await;
    assert_eq!(header(&resp, "content-type"), Some("video/x-custom"));
}

#[tokio::test]
async fn request_id_header_is_returned() {
    let server = TestHarness::with_media("clip", 10).serve().await;
    let resp = server.get("/media/clip").await;
    assert!(resp.headers().contains_key("x-request-id"));
}
