use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Instant;

use crate::fetch::{FETCH_TIMEOUT, USER_AGENT};
use crate::models::PageSummary;

/// Extracted summaries keyed by requested URL, with insertion time for TTL
/// expiry.
pub type SummaryCache = Arc<Mutex<HashMap<String, (PageSummary, Instant)>>>;

/// Shared application state passed to all handlers.
/// The HTTP client is built once at startup so connection pooling is shared
/// across requests.
#[derive(Clone)]
pub struct AppState {
    pub http_client: reqwest::Client,
    pub summary_cache: SummaryCache,
}

impl AppState {
    pub fn new() -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()
            .expect("Failed to build HTTP client");

        AppState {
            http_client,
            summary_cache: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
