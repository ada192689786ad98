//! Shared application state injected into every handler as `web::Data`.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::{Duration, Instant};

use rusqlite::Connection;
use tokio::sync::RwLock;

use crate::config::Config;
use crate::gemini::GeminiClient;
use crate::store::{self, StoreError};

/// Generation calls allowed per user per minute.
pub const GENERATIONS_PER_MINUTE: usize = 3;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub gemini: GeminiClient,
    pub generation_limiter: RateLimiter,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let gemini = GeminiClient::new(config.gemini_api_key.clone(), config.gemini_model.clone());
        Self {
            config: Arc::new(config),
            gemini,
            generation_limiter: RateLimiter::new(GENERATIONS_PER_MINUTE, Duration::from_secs(60)),
        }
    }

    /// A fresh connection for the current request.
    pub fn connect(&self) -> Result<Connection, StoreError> {
        store::open(&self.config.db_path)
    }
}

/// Sliding-window limiter keyed by user id.
///
/// Each key may acquire at most `limit` permits within any `window`.
/// Clones share the same counters.
#[derive(Clone)]
pub struct RateLimiter {
    limit: usize,
    window: Duration,
    hits: Arc<RwLock<HashMap<i64, VecDeque<Instant>>>>,
}

impl RateLimiter {
    pub fn new(limit: usize, window: Duration) -> Self {
        Self {
            limit,
            window,
            hits: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Records a hit for `key` unless its window is already full.
    pub async fn try_acquire(&self, key: i64) -> bool {
        self.try_acquire_at(key, Instant::now()).await
    }

    async fn try_acquire_at(&self, key: i64, now: Instant) -> bool {
        let mut hits = self.hits.write().await;

        // Expired hits are dropped for every key; keys left empty are removed.
        hits.retain(|_, recent| {
            while let Some(oldest) = recent.front() {
                if now.saturating_duration_since(*oldest) >= self.window {
                    recent.pop_front();
                } else {
                    break;
                }
            }
            !recent.is_empty()
        });

        let recent = hits.entry(key).or_default();
        if recent.len() >= self.limit {
            return false;
        }
        recent.push_back(now);
        true
    }

    #[cfg(test)]
    async fn tracked_keys(&self) -> usize {
        self.hits.read().await.len()
    }
}
