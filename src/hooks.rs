//! Data hooks: per-request query state machines.
//!
//! A `Query` follows one logical request identified by its cache key:
//!
//! ```text
//! Idle --load--> Loading --> Ready(payload) | Failed(message)
//!   ^               ^
//!   |               +-- refetch / load after a key change
//!   +-- key changed, or no identifier
//! ```
//!
//! A valid cached entry moves straight to `Ready` without touching the
//! network. `refetch` always goes to the network.

use std::sync::Arc;

use tracing::debug;

use crate::client::{FetchMode, RecipeClient, RecipeSource, RecipesSource, ReviewsSource, Source};

// == Query State ==
#[derive(Debug, Clone, PartialEq)]
pub enum QueryState<V> {
    Idle,
    Loading,
    Ready(V),
    Failed(String),
}

impl<V> QueryState<V> {
    pub fn label(&self) -> &'static str {
        match self {
            QueryState::Idle => "idle",
            QueryState::Loading => "loading",
            QueryState::Ready(_) => "ready",
            QueryState::Failed(_) => "failed",
        }
    }

    pub fn data(&self) -> Option<&V> {
        match self {
            QueryState::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            QueryState::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, QueryState::Loading)
    }
}

// == Query ==
pub struct Query<S: Source> {
    client: Arc<RecipeClient>,
    source: S,
    key: Option<String>,
    state: QueryState<S::Payload>,
}

pub type RecipesQuery = Query<RecipesSource>;
pub type RecipeQuery = Query<RecipeSource>;
pub type ReviewsQuery = Query<ReviewsSource>;

impl<S: Source> Query<S> {
    pub fn new(client: Arc<RecipeClient>, source: S) -> Self {
        let key = source.cache_key();
        Self {
            client,
            source,
            key,
            state: QueryState::Idle,
        }
    }

    pub fn state(&self) -> &QueryState<S::Payload> {
        &self.state
    }

    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Swaps the request parameters. Returns `true` if the cache key changed,
    /// in which case the query drops back to `Idle` until the next `load`.
    pub fn set_source(&mut self, source: S) -> bool {
        let key = source.cache_key();
        self.source = source;
        if key == self.key {
            return false;
        }
        self.key = key;
        self.transition(QueryState::Idle);
        true
    }

    /// Resolves the query, preferring a valid cached entry.
    pub async fn load(&mut self) -> &QueryState<S::Payload> {
        self.run(FetchMode::Cached).await
    }

    /// Forces a network read and overwrites the cached entry on success.
    pub async fn refetch(&mut self) -> &QueryState<S::Payload> {
        self.run(FetchMode::Refresh).await
    }

    async fn run(&mut self, mode: FetchMode) -> &QueryState<S::Payload> {
        if self.key.is_none() {
            self.transition(QueryState::Idle);
            return &self.state;
        }

        if mode == FetchMode::Cached {
            if let Some(hit) = self.client.cached(&self.source).await {
                self.transition(QueryState::Ready(hit));
                return &self.state;
            }
        }

        self.transition(QueryState::Loading);
        let next = match self.client.fetch(&self.source, mode).await {
            Ok(payload) => QueryState::Ready(payload),
            Err(e) => QueryState::Failed(e.message()),
        };
        self.transition(next);
        &self.state
    }

    fn transition(&mut self, next: QueryState<S::Payload>) {
        debug!(
            key = self.key.as_deref().unwrap_or("-"),
            from = self.state.label(),
            to = next.label(),
            "query transition"
        );
        self.state = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_state_accessors() {
        let ready: QueryState<u32> = QueryState::Ready(7);
        assert_eq!(ready.data(), Some(&7));
        assert_eq!(ready.error(), None);
        assert_eq!(ready.label(), "ready");

        let failed: QueryState<u32> = QueryState::Failed("boom".to_string());
        assert_eq!(failed.error(), Some("boom"));
        assert_eq!(failed.data(), None);

        assert!(QueryState::<u32>::Loading.is_loading());
        assert_eq!(QueryState::<u32>::Idle.label(), "idle");
    }
}
