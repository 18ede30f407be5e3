mod common;

use axum::http::StatusCode;
use url::Url;

use pagemeta_server::extract::extract_summary;
use pagemeta_server::fetch::{fetch_html, FetchError};

fn client() -> reqwest::Client {
    reqwest::Client::new()
}

#[tokio::test]
async fn html_page_passes_the_gate() {
    let page = common::spawn_page(
        "text/html; charset=utf-8",
        r#"<html><head><meta property="og:title" content="Gated"/></head></html>"#,
    )
    .await;
    let url = Url::parse(&page).unwrap();

    let stream = fetch_html(&client(), &url).await.expect("fetch should succeed");
    let summary = extract_summary(stream, &url).await.unwrap();
    assert_eq!(summary.title.as_deref(), Some("Gated"));
}

#[tokio::test]
async fn non_html_content_type_never_reaches_the_extractor() {
    let page = common::spawn_page("application/json", r#"{"title": "nope"}"#).await;
    let url = Url::parse(&page).unwrap();

    let err = fetch_html(&client(), &url).await.unwrap_err();
    assert!(matches!(err, FetchError::ContentType(ct) if ct == "application/json"));
}

#[tokio::test]
async fn missing_content_type_is_rejected() {
    let page = common::spawn_status(StatusCode::NO_CONTENT).await;
    let url = Url::parse(&page).unwrap();

    let err = fetch_html(&client(), &url).await.unwrap_err();
    assert!(matches!(err, FetchError::ContentType(_)));
}

#[tokio::test]
async fn error_status_is_rejected() {
    let page = common::spawn_status(StatusCode::NOT_FOUND).await;
    let url = Url::parse(&page).unwrap();

    let err = fetch_html(&client(), &url).await.unwrap_err();
    match err {
        FetchError::Status(status) => assert_eq!(status.as_u16(), 404),
        other => panic!("expected status error, got {other:?}"),
    }
}
