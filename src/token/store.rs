use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::types::user::Role;

/// Claims recorded for an issued token. Immutable once issued.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct TokenRecord {
    pub(crate) user_id: String,
    pub(crate) role: Role,
    pub(crate) expires_at: DateTime<Utc>,
}

impl TokenRecord {
    pub(crate) fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}

/// In-memory token registry, shared by every request.
///
/// Records are only removed when a guard sees them expired, or by
/// [`sweep_loop`] when it is enabled. Expired tokens nobody presents again
/// otherwise stay here for the lifetime of the process.
#[derive(Clone, Debug, Default)]
pub(crate) struct TokenStore {
    tokens: Arc<RwLock<HashMap<String, TokenRecord>>>,
}

impl TokenStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) async fn put(&self, token: String, record: TokenRecord) {
        self.tokens.write().await.insert(token, record);
    }

    pub(crate) async fn get(&self, token: &str) -> Option<TokenRecord> {
        self.tokens.read().await.get(token).cloned()
    }

    pub(crate) async fn delete(&self, token: &str) {
        self.tokens.write().await.remove(token);
    }

    pub(crate) async fn len(&self) -> usize {
        self.tokens.read().await.len()
    }

    pub(crate) async fn sweep_expired(&self, now: DateTime<Utc>) -> usize {
        let mut tokens = self.tokens.write().await;
        let before = tokens.len();

        tokens.retain(|_, record| !record.is_expired(now));

        before - tokens.len()
    }
}

pub(crate) async fn sweep_loop(store: TokenStore, period: Duration) {
    let mut interval = tokio::time::interval(period);

    loop {
        interval.tick().await;

        let removed = store.sweep_expired(Utc::now()).await;

        if removed > 0 {
            let remaining = store.len().await;
            tracing::info!(removed, remaining, "swept expired tokens");
        }
    }
}
