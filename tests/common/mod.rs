//! Shared test fixtures: a scripted upstream and payload builders.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{json, Value};

use recipe_cache::cache::ManualClock;
use recipe_cache::transport::Transport;
use recipe_cache::{Caches, ClientError, Config, RecipeClient, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

// == Mock Transport ==
/// Upstream stand-in. Answers from one-shot queues first, then from the
/// standing response for the route; unknown routes fail at network level.
#[derive(Default)]
pub struct MockTransport {
    standing: Mutex<HashMap<(Method, String), Result<Value>>>,
    queued: Mutex<HashMap<(Method, String), VecDeque<Result<Value>>>>,
    calls: Mutex<Vec<Call>>,
    delay: Option<Duration>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every response waits `delay` first, so concurrent callers overlap.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn respond(&self, method: Method, path: &str, response: Result<Value>) {
        self.standing
            .lock()
            .insert((method, path.to_string()), response);
    }

    pub fn respond_once(&self, method: Method, path: &str, response: Result<Value>) {
        self.queued
            .lock()
            .entry((method, path.to_string()))
            .or_default()
            .push_back(response);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    pub fn count(&self, method: Method, path: &str) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|call| call.method == method && call.path == path)
            .count()
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().len()
    }

    async fn answer(
        &self,
        method: Method,
        path: &str,
        query: Vec<(String, String)>,
        body: Option<Value>,
    ) -> Result<Value> {
        self.calls.lock().push(Call {
            method,
            path: path.to_string(),
            query,
            body,
        });

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let route = (method, path.to_string());
        if let Some(response) = self
            .queued
            .lock()
            .get_mut(&route)
            .and_then(|queue| queue.pop_front())
        {
            return response;
        }
        self.standing
            .lock()
            .get(&route)
            .cloned()
            .unwrap_or_else(|| Err(ClientError::Network(format!("no route for {}", path))))
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn get(&self, path: &str, query: &[(String, String)]) -> Result<Value> {
        self.answer(Method::Get, path, query.to_vec(), None).await
    }

    async fn post(&self, path: &str, body: Value) -> Result<Value> {
        self.answer(Method::Post, path, Vec::new(), Some(body)).await
    }

    async fn put(&self, path: &str, body: Value) -> Result<Value> {
        self.answer(Method::Put, path, Vec::new(), Some(body)).await
    }

    async fn delete(&self, path: &str) -> Result<Value> {
        self.answer(Method::Delete, path, Vec::new(), None).await
    }
}

// == Client Builders ==

pub struct Harness {
    pub transport: Arc<MockTransport>,
    pub clock: Arc<ManualClock>,
    pub client: Arc<RecipeClient>,
}

pub fn harness() -> Harness {
    harness_with(MockTransport::new(), false)
}

pub fn harness_with(transport: MockTransport, coalesce: bool) -> Harness {
    let transport = Arc::new(transport);
    let clock = Arc::new(ManualClock::new(1_700_000_000_000));
    let caches = Caches::from_config(&Config::default(), clock.clone());
    let client = RecipeClient::new(transport.clone(), caches).with_coalescing(coalesce);
    Harness {
        transport,
        clock,
        client: Arc::new(client),
    }
}

// == Payloads ==

pub fn ok(data: Value) -> Result<Value> {
    Ok(json!({"success": true, "data": data, "message": "OK"}))
}

pub fn failed(message: &str) -> Result<Value> {
    Ok(json!({"success": false, "data": null, "message": message}))
}

pub fn recipe(id: &str, name: &str, rating: f64) -> Value {
    json!({"id": id, "name": name, "category": "makanan", "averageRating": rating})
}

pub fn review(id: &str, recipe_id: &str, rating: u8) -> Value {
    json!({"id": id, "recipeId": recipe_id, "userIdentifier": "sari", "rating": rating})
}

pub fn recipe_page(recipes: Vec<Value>) -> Result<Value> {
    let total = recipes.len();
    Ok(json!({
        "success": true,
        "data": recipes,
        "message": "OK",
        "pagination": {"page": 1, "limit": 12, "total": total, "totalPages": 1}
    }))
}
