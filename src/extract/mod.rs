//! HTML `<head>` metadata extraction.
//!
//! The extractor drives a lazy `html5ever` token stream over the fetched
//! bytes, stopping at `</head>` so the page body is never downloaded, then
//! resolves the accumulated raw tags into a [`PageSummary`]. Malformed or
//! missing individual tags degrade to unset fields; only a stream failure
//! before any content and an unresolvable `og:url` are surfaced as errors.

mod decode;
mod properties;
mod walk;

use bytes::Bytes;
use futures::{pin_mut, Stream, StreamExt};
use html5ever::tendril::StrTendril;
use html5ever::tokenizer::{BufferQueue, Tokenizer, TokenizerOpts};
use thiserror::Error;
use url::Url;

use crate::error::BoxError;
use crate::models::PageSummary;

use decode::StreamDecoder;
use properties::MetaKey;
use walk::{HeadWalker, RawHead};

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("failed to read page content: {0}")]
    Stream(#[source] BoxError),

    #[error("could not resolve og:url value \"{value}\" against the page URL")]
    ResolveUrl {
        value: String,
        #[source]
        source: url::ParseError,
    },
}

/// Tokenize `stream` and extract the page summary metadata, resolving
/// references against `page_url`.
///
/// The walk ends at `</head>` or at end of input, whichever comes first;
/// truncated documents yield a best-effort summary. The stream is dropped
/// (and the connection released) as soon as the walk finishes.
pub async fn extract_summary<S>(stream: S, page_url: &Url) -> Result<PageSummary, ExtractError>
where
    S: Stream<Item = Result<Bytes, BoxError>>,
{
    pin_mut!(stream);

    let mut tokenizer = Tokenizer::new(HeadWalker::default(), TokenizerOpts::default());
    let mut queue = BufferQueue::new();
    let mut decoder = StreamDecoder::new();
    let mut saw_bytes = false;

    while let Some(next) = stream.next().await {
        match next {
            Ok(chunk) => {
                saw_bytes = true;
                let text = decoder.decode(&chunk);
                if !text.is_empty() {
                    queue.push_back(StrTendril::from_slice(&text));
                    let _ = tokenizer.feed(&mut queue);
                }
                if tokenizer.sink.done() {
                    break;
                }
            }
            Err(e) if !saw_bytes => return Err(ExtractError::Stream(e)),
            Err(e) => {
                // mid-stream failure degrades to end-of-input: finalize with
                // whatever was seen, same as a page with no </head>
                tracing::debug!(error = %e, "page stream failed mid-head, keeping partial summary");
                break;
            }
        }
    }

    if !tokenizer.sink.done() {
        let tail = decoder.finish();
        if !tail.is_empty() {
            queue.push_back(StrTendril::from_slice(&tail));
            let _ = tokenizer.feed(&mut queue);
        }
        tokenizer.end();
    }

    let raw = tokenizer.sink.take_raw();
    finalize(&raw, page_url)
}

/// Convert the raw accumulator into the final summary, applying Open Graph
/// precedence and URL resolution. Idempotent over the same input.
fn finalize(raw: &RawHead, page_url: &Url) -> Result<PageSummary, ExtractError> {
    let url = match raw.metas.get(&MetaKey::Url) {
        Some(value) => {
            let resolved = page_url
                .join(value)
                .map_err(|source| ExtractError::ResolveUrl {
                    value: value.clone(),
                    source,
                })?;
            Some(resolved.to_string())
        }
        None => None,
    };

    let title_fallback = raw
        .title_fallback
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from);

    Ok(PageSummary {
        page_type: raw.metas.get(&MetaKey::Type).cloned(),
        url,
        title: raw.metas.get(&MetaKey::OgTitle).cloned().or(title_fallback),
        site_name: raw.metas.get(&MetaKey::SiteName).cloned(),
        description: raw
            .metas
            .get(&MetaKey::OgDescription)
            .or_else(|| raw.metas.get(&MetaKey::Description))
            .cloned(),
        author: raw.metas.get(&MetaKey::Author).cloned(),
        keywords: raw
            .metas
            .get(&MetaKey::Keywords)
            .map(|v| split_keywords(v))
            .unwrap_or_default(),
        icon: raw.icon.clone(),
        images: raw.images.clone(),
    })
}

/// Split a comma-delimited keywords value, trimming whitespace and dropping
/// empty pieces while preserving order.
fn split_keywords(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(String::from)
        .collect()
}
