// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Tests for the data facade
//!
//! - Decoding resource lists from whichever tier answers
//! - Image batch downloads skip cached files

use island_core::{DataError, DataLogic, MemoryBundle, RemoteImage, Resource};
use serde::Deserialize;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

use super::fixtures::{bundle_with, remote_path, Harness};

#[derive(Debug, Deserialize, PartialEq)]
struct Faq {
    question: String,
    answer: String,
}

fn image(url: &str) -> RemoteImage {
    RemoteImage {
        url: url.to_string(),
        name: url.to_string(),
        kind: "file".to_string(),
        original_url: None,
        url_expires_at: None,
    }
}

#[tokio::test]
async fn test_fetch_decodes_bundled_list() {
    let h = Harness::start().await;
    let bundle = bundle_with(
        "faq.json",
        br#"[{"question": "Where?", "answer": "Texel"}]"#,
    );
    let data = DataLogic::new(h.build(h.config().bundled_only(), bundle));

    let faqs: Vec<Faq> = data.fetch(Resource::Faq).await.unwrap();

    assert_eq!(
        faqs,
        vec![Faq {
            question: "Where?".to_string(),
            answer: "Texel".to_string(),
        }]
    );
}

#[tokio::test]
async fn test_fetch_reports_invalid_json() {
    let h = Harness::start().await;
    let data = DataLogic::new(h.build(
        h.config().bundled_only(),
        bundle_with("faq.json", b"{not json"),
    ));

    let err = data.fetch::<Faq>(Resource::Faq).await.unwrap_err();
    assert!(matches!(err, DataError::Json(_)));
}

#[tokio::test]
async fn test_fetch_or_empty_swallows_failures() {
    let h = Harness::start().await;
    let data = DataLogic::new(h.build(
        h.config().bundled_only(),
        bundle_with("faq.json", b"{not json"),
    ));

    let broken: Vec<Faq> = data.fetch_or_empty(Resource::Faq).await;
    let missing: Vec<Faq> = data.fetch_or_empty(Resource::Sponsors).await;

    assert!(broken.is_empty());
    assert!(missing.is_empty());
}

#[tokio::test]
async fn test_fetch_prefers_network_after_first_launch() {
    let h = Harness::start().await;
    h.mark_launched();
    Mock::given(method("GET"))
        .and(path(remote_path("faq.json")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(br#"[{"question": "When?", "answer": "August"}]"#.to_vec()),
        )
        .mount(&h.server)
        .await;
    let data = DataLogic::new(h.build(
        h.config(),
        bundle_with("faq.json", br#"[{"question": "old", "answer": "old"}]"#),
    ));

    let faqs: Vec<Faq> = data.fetch(Resource::Faq).await.unwrap();
    assert_eq!(faqs[0].answer, "August");
}

#[tokio::test]
async fn test_download_images_skips_cached_and_reports_failures() {
    let h = Harness::start().await;
    h.seed_cache("images/cached.png", b"old");
    Mock::given(method("GET"))
        .and(path(remote_path("images/new.png")))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"new".to_vec()))
        .mount(&h.server)
        .await;
    Mock::given(method("GET"))
        .and(path(remote_path("images/gone.png")))
        .respond_with(ResponseTemplate::new(404))
        .mount(&h.server)
        .await;
    let data = DataLogic::new(h.build(h.config(), MemoryBundle::new()));

    let report = data
        .download_images(&[
            image("images/cached.png"),
            image("images/new.png"),
            image("images/new.png"),
            image("images/gone.png"),
        ])
        .await;

    assert_eq!(report.skipped, vec!["images/cached.png"]);
    assert_eq!(report.downloaded, vec!["images/new.png"]);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].0, "images/gone.png");
    assert_eq!(h.cached("images/new.png").as_deref(), Some(&b"new"[..]));
    assert_eq!(h.cached("images/cached.png").as_deref(), Some(&b"old"[..]));
}

#[tokio::test]
async fn test_download_images_reports_bundled_separately() {
    let h = Harness::start().await;
    let bundle = MemoryBundle::new()
        .with_resource("images/a.png", b"a".to_vec())
        .unwrap()
        .with_resource("images/b.png", b"b".to_vec())
        .unwrap();
    let data = DataLogic::new(h.build(h.config().bundled_only(), bundle));

    let report = data
        .download_images(&[image("images/a.png"), image("images/b.png")])
        .await;

    assert!(report.downloaded.is_empty());
    assert_eq!(report.bundled, vec!["images/a.png", "images/b.png"]);
    assert!(report.failed.is_empty());
    assert!(h.cached("images/a.png").is_none());
    assert_eq!(h.request_count().await, 0);
}
