//! The route request pipeline: validate, consult the cache, resolve, format.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::cache::{RouteCache, RouteCacheConfig};
use crate::graph::{GraphError, LiveGraph, PublishedGraph, Snapshot, build};
use crate::network::NetworkStore;

use super::error::RouteError;
use super::format::{RoutePayload, format_route};
use super::resolve::resolve;
use super::validate::{RouteRequest, validate};

/// Answers route requests against the currently published graph.
///
/// Cheap to clone; clones share the store, graph and cache.
#[derive(Clone)]
pub struct Planner {
    store: Arc<dyn NetworkStore>,
    graph: PublishedGraph,
    cache: RouteCache,
    /// Held for the whole of a refresh, so generations follow fetch order.
    refreshing: Arc<Mutex<()>>,
}

impl Planner {
    pub fn new(store: Arc<dyn NetworkStore>, graph: PublishedGraph, cache: RouteCache) -> Self {
        Self {
            store,
            graph,
            cache,
            refreshing: Arc::new(Mutex::new(())),
        }
    }

    /// Build the initial graph from `store` and wrap it in a planner.
    pub fn load(
        store: Arc<dyn NetworkStore>,
        cache_config: &RouteCacheConfig,
    ) -> Result<Self, GraphError> {
        let graph = PublishedGraph::load(store.as_ref())?;
        Ok(Self::new(store, graph, RouteCache::new(cache_config)))
    }

    pub fn store(&self) -> &dyn NetworkStore {
        self.store.as_ref()
    }

    pub fn graph(&self) -> &PublishedGraph {
        &self.graph
    }

    pub fn cache(&self) -> &RouteCache {
        &self.cache
    }

    /// Find the best route for a request.
    ///
    /// Successful results are cached per graph generation. Errors are not
    /// cached.
    pub async fn find_route(&self, request: &RouteRequest) -> Result<Arc<RoutePayload>, RouteError> {
        let validated = validate(request, self.store.as_ref())?;
        let live = self.graph.current().await;

        let key = (live.generation, validated.start, validated.end);
        if let Some(cached) = self.cache.get(&key).await {
            debug!(start = %validated.start, end = %validated.end, "Route cache hit");
            return Ok(cached);
        }

        let path = resolve(&live.graph, validated.start, validated.end)?;
        let payload = Arc::new(format_route(&live.graph, &path));
        self.cache.insert(key, Arc::clone(&payload)).await;

        Ok(payload)
    }

    /// Fetch the latest document, rebuild the graph and clear cached routes.
    ///
    /// The store only starts serving the fetched document once its graph has
    /// built, so validation and resolution keep agreeing. On failure the store,
    /// the published graph and the cache are all left as they were.
    pub async fn refresh(&self) -> Result<Arc<LiveGraph>, GraphError> {
        let _refreshing = self.refreshing.lock().await;

        let staged = self.store.fetch().map_err(GraphError::from).and_then(|data| {
            let graph = build(&Snapshot::from_data(&data))?;
            Ok((data, graph))
        });
        let (data, graph) = match staged {
            Ok(staged) => staged,
            Err(e) => {
                warn!(error = %e, "Graph rebuild failed, keeping previous graph");
                return Err(e);
            }
        };

        self.store.commit(data)?;
        let live = self.graph.publish(graph).await;
        self.cache.invalidate_all();
        Ok(live)
    }
}
