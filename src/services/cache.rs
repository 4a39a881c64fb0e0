use crate::models::{CacheEntry, CompositeWeatherResult};
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

struct CacheState {
    entries: HashMap<String, CacheEntry>,
    next_seq: u64,
}

/// Bounded, time-expiring store of composite results keyed by city.
///
/// Keys are used verbatim; callers normalize them. Expired entries are treated as
/// absent on read and dropped lazily when room is needed. When a new key arrives at
/// capacity the least-recently-inserted entry is evicted.
pub struct WeatherCache {
    state: RwLock<CacheState>,
    capacity: usize,
    ttl: Duration,
}

impl WeatherCache {
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        Self {
            state: RwLock::new(CacheState {
                entries: HashMap::with_capacity(capacity),
                next_seq: 0,
            }),
            capacity,
            ttl,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    fn is_live(&self, entry: &CacheEntry, now: Instant) -> bool {
        now.duration_since(entry.inserted_at) < self.ttl
    }

    pub async fn get(&self, key: &str) -> Option<CompositeWeatherResult> {
        let state = self.state.read().await;
        let entry = state.entries.get(key)?;
        if self.is_live(entry, Instant::now()) {
            Some(entry.value.clone())
        } else {
            None
        }
    }

    pub async fn put(&self, key: &str, value: CompositeWeatherResult) {
        let mut state = self.state.write().await;
        let now = Instant::now();

        if !state.entries.contains_key(key) && state.entries.len() >= self.capacity {
            state.entries.retain(|_, entry| now.duration_since(entry.inserted_at) < self.ttl);

            if state.entries.len() >= self.capacity {
                let oldest = state
                    .entries
                    .iter()
                    .min_by_key(|(_, entry)| entry.seq)
                    .map(|(k, _)| k.clone());
                if let Some(oldest) = oldest {
                    tracing::debug!("Evicting cached weather for: {}", oldest);
                    state.entries.remove(&oldest);
                }
            }
        }

        let seq = state.next_seq;
        state.next_seq += 1;
        state.entries.insert(
            key.to_string(),
            CacheEntry {
                value,
                inserted_at: now,
                seq,
            },
        );
    }

    /// Number of entries still inside their TTL window.
    pub async fn len(&self) -> usize {
        let state = self.state.read().await;
        let now = Instant::now();
        state
            .entries
            .values()
            .filter(|entry| self.is_live(entry, now))
            .count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[cfg(test)]
impl WeatherCache {
    /// Stored entries regardless of expiry.
    pub(crate) async fn stored(&self) -> usize {
        self.state.read().await.entries.len()
    }
}
