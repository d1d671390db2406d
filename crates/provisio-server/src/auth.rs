//! Admin API authentication and rate limiting.
//!
//! Both checks live in server state and are injected into the router,
//! never read from globals. The rate limiter counts requests per API
//! key over a fixed window with explicit expiry: a window that has
//! passed its reset instant is replaced on the next request, so stale
//! entries never deny a client.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use provisio_core::error::ProvisioError;

use crate::error::ApiError;
use crate::state::AppState;

/// The set of accepted admin API keys.
pub struct ApiKeyStore {
    keys: HashSet<String>,
}

impl ApiKeyStore {
    pub fn new(keys: impl IntoIterator<Item = String>) -> Self {
        Self {
            keys: keys.into_iter().collect(),
        }
    }

    pub fn verify(&self, key: &str) -> bool {
        self.keys.contains(key)
    }
}

struct Window {
    count: u32,
    reset_at: Instant,
}

/// Fixed-window request counter keyed by API key.
pub struct RateLimiter {
    max_requests: u32,
    window: Duration,
    windows: Mutex<HashMap<String, Window>>,
}

impl RateLimiter {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            windows: Mutex::new(HashMap::new()),
        }
    }

    /// Count one request against `key`; `false` when the key has
    /// exhausted its window.
    pub fn check(&self, key: &str) -> bool {
        let now = Instant::now();
        let mut windows = match self.windows.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        let window = windows.entry(key.to_string()).or_insert(Window {
            count: 0,
            reset_at: now + self.window,
        });
        if now >= window.reset_at {
            window.count = 0;
            window.reset_at = now + self.window;
        }
        window.count += 1;
        window.count <= self.max_requests
    }
}

/// Middleware guarding the admin API: requires a valid key in the
/// `X-API-Key` header (or `api_key` query parameter), then applies the
/// per-key rate limit.
pub async fn require_api_key(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let Some(key) = extract_key(&request) else {
        return ApiError::unauthorized("missing API key").into_response();
    };
    if !state.api_keys.verify(&key) {
        return ApiError::unauthorized("invalid API key").into_response();
    }
    if !state.rate_limiter.check(&key) {
        return ApiError(ProvisioError::RateLimited).into_response();
    }
    next.run(request).await
}

fn extract_key(request: &Request) -> Option<String> {
    if let Some(value) = request.headers().get("x-api-key") {
        return value.to_str().ok().map(str::to_string);
    }
    request
        .uri()
        .query()?
        .split('&')
        .find_map(|pair| pair.strip_prefix("api_key="))
        .map(str::to_string)
}
