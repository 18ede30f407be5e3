//! Page retrieval with status and content-type gates.
//!
//! The fetcher hands the extractor a byte stream only when the response
//! status is below 400 and the content type begins with `text/html`. The
//! stream is lazy: the body is not buffered here, so the extractor can stop
//! reading at `</head>` and drop the connection.

use std::time::Duration;

use bytes::Bytes;
use futures::{Stream, TryStreamExt};
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use thiserror::Error;
use url::Url;

use crate::error::BoxError;

pub const FETCH_TIMEOUT: Duration = Duration::from_secs(5);
pub const USER_AGENT: &str =
    "Mozilla/5.0 (compatible; PagemetaBot/1.0; +https://github.com/pagemeta/pagemeta-server)";

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("failed to fetch URL: {0}")]
    Request(#[from] reqwest::Error),

    #[error("upstream returned status {0}")]
    Status(StatusCode),

    #[error("unsupported content type \"{0}\", expected text/html")]
    ContentType(String),
}

/// Fetch `url` and return the response body as a byte stream.
///
/// Fails if the request itself fails, the response status is 400 or above,
/// or the `Content-Type` header does not start with `text/html`. A missing
/// content type is treated as non-HTML.
pub async fn fetch_html(
    client: &reqwest::Client,
    url: &Url,
) -> Result<impl Stream<Item = Result<Bytes, BoxError>>, FetchError> {
    let response = client.get(url.clone()).send().await?;

    let status = response.status();
    if status.as_u16() >= 400 {
        return Err(FetchError::Status(status));
    }

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();
    if !content_type.starts_with("text/html") {
        return Err(FetchError::ContentType(content_type));
    }

    Ok(response.bytes_stream().map_err(|e| Box::new(e) as BoxError))
}
