//! Scripted transport for tests.

use super::GraphQlTransport;
use crate::error::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

type Handler = Box<dyn Fn(&str) -> Result<Value> + Send + Sync>;
type Latency = Box<dyn Fn(&str) -> Duration + Send + Sync>;

pub struct MockTransport {
    handler: Handler,
    latency: Option<Latency>,
    queries: Mutex<Vec<String>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl MockTransport {
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(&str) -> Result<Value> + Send + Sync + 'static,
    {
        Self {
            handler: Box::new(handler),
            latency: None,
            queries: Mutex::new(Vec::new()),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    /// Delay each answer by `latency(query)` before handling it.
    pub fn with_latency<L>(mut self, latency: L) -> Self
    where
        L: Fn(&str) -> Duration + Send + Sync + 'static,
    {
        self.latency = Some(Box::new(latency));
        self
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.queries.lock().unwrap().len()
    }

    /// Highest number of requests that were pending at the same time.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GraphQlTransport for MockTransport {
    async fn request(&self, query: &str) -> Result<Value> {
        self.queries.lock().unwrap().push(query.to_string());

        let pending = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(pending, Ordering::SeqCst);

        if let Some(latency) = &self.latency {
            tokio::time::sleep(latency(query)).await;
        }
        tokio::task::yield_now().await;

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        (self.handler)(query)
    }
}

/// Integer following `name: ` in a query, e.g. `skip` or `number`.
pub fn query_arg(query: &str, name: &str) -> Option<u64> {
    let needle = format!("{}: ", name);
    let start = query.find(&needle)? + needle.len();
    let digits: String = query[start..].chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}
