//! Caching layer for resolved routes.
//!
//! Entries are keyed by graph generation as well as endpoints, so a route
//! resolved against an older graph is never returned once a newer graph has
//! been published. The whole cache is also cleared after each refresh so old
//! generations do not linger until their TTL expires.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;

use crate::domain::StationId;
use crate::planner::RoutePayload;

/// Cache key for routes: (graph generation, start, end).
pub type RouteKey = (u64, StationId, StationId);

/// Cached route entry.
type RouteEntry = Arc<RoutePayload>;

/// Configuration for the route cache.
#[derive(Debug, Clone)]
pub struct RouteCacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for RouteCacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(3600),
            max_capacity: 10_000,
        }
    }
}

/// Cache for resolved route payloads.
///
/// Cheap to clone; clones share the same underlying storage.
#[derive(Clone)]
pub struct RouteCache {
    routes: MokaCache<RouteKey, RouteEntry>,
}

impl RouteCache {
    /// Create a new cache with the given configuration.
    pub fn new(config: &RouteCacheConfig) -> Self {
        let routes = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { routes }
    }

    /// Get a cached route.
    pub async fn get(&self, key: &RouteKey) -> Option<RouteEntry> {
        self.routes.get(key).await
    }

    /// Insert a route into the cache.
    pub async fn insert(&self, key: RouteKey, entry: RouteEntry) {
        self.routes.insert(key, entry).await;
    }

    /// Approximate number of cached routes (for monitoring).
    pub fn entry_count(&self) -> u64 {
        self.routes.entry_count()
    }

    /// Invalidate all cached entries.
    pub fn invalidate_all(&self) {
        self.routes.invalidate_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sid(n: i64) -> StationId {
        StationId::new(n).unwrap()
    }

    fn payload(stops: usize) -> RouteEntry {
        Arc::new(RoutePayload {
            path: Vec::new(),
            stops,
            transfers: 0,
            interchanges: Vec::new(),
            distance_m: 0,
            ticket_price: 8,
            estimated_travel_minutes: 0,
        })
    }

    #[test]
    fn default_config() {
        let config = RouteCacheConfig::default();
        assert_eq!(config.ttl, Duration::from_secs(3600));
        assert_eq!(config.max_capacity, 10_000);
    }

    #[test]
    fn cache_creation() {
        let cache = RouteCache::new(&RouteCacheConfig::default());
        assert_eq!(cache.entry_count(), 0);
    }

    #[tokio::test]
    async fn insert_then_get() {
        let cache = RouteCache::new(&RouteCacheConfig::default());
        cache.insert((1, sid(1), sid(5)), payload(4)).await;

        let hit = cache.get(&(1, sid(1), sid(5))).await.unwrap();
        assert_eq!(hit.stops, 4);
        assert!(cache.get(&(1, sid(5), sid(1))).await.is_none());
    }

    #[tokio::test]
    async fn generation_is_part_of_the_key() {
        let cache = RouteCache::new(&RouteCacheConfig::default());
        cache.insert((1, sid(1), sid(5)), payload(4)).await;
        assert!(cache.get(&(2, sid(1), sid(5))).await.is_none());
    }

    #[tokio::test]
    async fn invalidate_all_clears_entries() {
        let cache = RouteCache::new(&RouteCacheConfig::default());
        cache.insert((1, sid(1), sid(2)), payload(1)).await;
        cache.invalidate_all();
        assert!(cache.get(&(1, sid(1), sid(2))).await.is_none());
    }

    #[tokio::test]
    async fn clones_share_storage() {
        let cache = RouteCache::new(&RouteCacheConfig::default());
        let other = cache.clone();
        cache.insert((1, sid(1), sid(2)), payload(1)).await;
        assert!(other.get(&(1, sid(1), sid(2))).await.is_some());
    }
}
