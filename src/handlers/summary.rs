use std::net::IpAddr;
use std::time::{Duration, Instant};

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use url::Url;

use crate::error::{AppError, AppResult};
use crate::extract::extract_summary;
use crate::fetch::fetch_html;
use crate::models::PageSummary;
use crate::state::AppState;

pub const CACHE_TTL: Duration = Duration::from_secs(86_400);

// ── Public helpers ─────────────────────────────────────────────────────────

/// Returns `true` if `ip` is a private, loopback, or link-local address.
pub fn is_private_ip(ip: IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => {
            let o = v4.octets();
            matches!(
                o,
                [127, ..]
                    | [10, ..]
                    | [169, 254, ..]
                    | [192, 168, ..]
                    | [0, ..]
                    | [255, 255, 255, 255]
            ) || (o[0] == 172 && (16..=31).contains(&o[1]))
        }
        IpAddr::V6(v6) => {
            v6.is_loopback()
                || (v6.segments()[0] & 0xfe00 == 0xfc00)
                || (v6.segments()[0] & 0xffc0 == 0xfe80)
        }
    }
}

// ── Query params ───────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct SummaryQuery {
    pub url: String,
}

// ── Handler ────────────────────────────────────────────────────────────────

/// GET /v1/summary?url=<encoded-url>
///
/// Fetches the page, scans its head for Open Graph and standard metadata,
/// and returns a JSON summary. Results are cached for 24 hours. Rejects
/// private/loopback IPs (SSRF protection). A page with no recognizable
/// metadata still yields 200 with an empty summary object.
pub async fn get_summary(
    State(state): State<AppState>,
    Query(params): Query<SummaryQuery>,
) -> AppResult<Json<PageSummary>> {
    let url_str = params.url.clone();

    // ── Validate URL ──────────────────────────────────────────────────────
    let parsed = Url::parse(&url_str).map_err(|_| AppError::Validation("Invalid URL".into()))?;

    match parsed.scheme() {
        "http" | "https" => {}
        _ => {
            return Err(AppError::Validation(
                "Only http/https URLs are supported".into(),
            ))
        }
    }

    let host = parsed
        .host_str()
        .ok_or_else(|| AppError::Validation("URL has no host".into()))?
        .to_string();

    // ── SSRF: resolve hostname and check all IPs ──────────────────────────
    let lookup_target = format!("{}:80", host);
    let addrs = tokio::net::lookup_host(&lookup_target)
        .await
        .map_err(|_| AppError::Validation("Could not resolve URL host".into()))?;

    for addr in addrs {
        if is_private_ip(addr.ip()) {
            return Err(AppError::Validation(
                "URL resolves to a private or reserved address".into(),
            ));
        }
    }

    // ── Check cache ───────────────────────────────────────────────────────
    {
        let cache = state.summary_cache.lock().unwrap();
        if let Some((summary, cached_at)) = cache.get(&url_str) {
            if cached_at.elapsed() < CACHE_TTL {
                return Ok(Json(summary.clone()));
            }
        }
    }

    // ── Fetch and extract ─────────────────────────────────────────────────
    let stream = fetch_html(&state.http_client, &parsed).await?;
    let summary = extract_summary(stream, &parsed).await?;

    tracing::info!(url = %url_str, images = summary.images.len(), "Extracted page summary");

    // ── Store in cache ────────────────────────────────────────────────────
    {
        let mut cache = state.summary_cache.lock().unwrap();
        cache.insert(url_str, (summary.clone(), Instant::now()));
    }

    Ok(Json(summary))
}

// ── Unit tests ─────────────────────────────────────────────────────────────
