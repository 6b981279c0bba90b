//! Fan-out dispatch and fan-in collection.
//!
//! The engine starts one worker task per request element, hands every
//! worker a clone of the output queue sender, and collects the queue until
//! it closes. The queue closes exactly once: when the last worker has
//! exited and dropped its sender. A supervisory task reaps the join
//! handles so a panicked worker is logged rather than silently lost.

use std::sync::Arc;
use std::time::Duration;

use aurs_core::types::{Package, SearchMode, SearchRequest};
use aurs_rpc::{CacheKey, RpcClient, SearchCache};
use tokio::sync::{mpsc, Semaphore};
use tokio::task::JoinSet;
use tracing::{debug, warn};

use crate::worker::SearchWorker;

/// Default cap on simultaneous in-flight network calls
pub const DEFAULT_MAX_IN_FLIGHT: usize = 8;

/// Default deadline for a single network call
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Output queue depth; a fast worker backpressures against a slow collector
const OUTPUT_QUEUE_CAPACITY: usize = 64;

/// Concurrent fan-out/fan-in search engine
#[derive(Debug, Clone)]
pub struct SearchEngine {
    client: Arc<RpcClient>,
    cache: Arc<SearchCache>,
    fetch_permits: Arc<Semaphore>,
    request_timeout: Duration,
    verbose: bool,
}

impl SearchEngine {
    /// Create an engine over a shared client and cache
    pub fn new(client: Arc<RpcClient>, cache: Arc<SearchCache>) -> Self {
        Self {
            client,
            cache,
            fetch_permits: Arc::new(Semaphore::new(DEFAULT_MAX_IN_FLIGHT)),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            verbose: false,
        }
    }

    /// Cap the number of simultaneous in-flight network calls
    pub fn with_max_in_flight(mut self, permits: usize) -> Self {
        self.fetch_permits = Arc::new(Semaphore::new(permits.max(1)));
        self
    }

    /// Set the per-call network deadline
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Enable verbose diagnostics: emitted packages carry their resolved
    /// request URL and a per-worker sequence number
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Run every lookup in the request concurrently and collect the merged
    /// results.
    ///
    /// Arrival order across workers is unspecified; within one worker it
    /// follows server-returned order. A failed lookup contributes zero
    /// results and never surfaces as an error here.
    pub async fn run(&self, request: &SearchRequest) -> Vec<Package> {
        let (tx, rx) = mpsc::channel(OUTPUT_QUEUE_CAPACITY);
        let mut workers = JoinSet::new();

        for term in &request.terms {
            let key = match request.mode {
                SearchMode::Search => CacheKey::search(term.clone(), request.field),
                SearchMode::Info => CacheKey::info(term.clone()),
            };
            let worker = SearchWorker {
                client: Arc::clone(&self.client),
                cache: Arc::clone(&self.cache),
                key,
                limit: request.effective_limit(),
                verbose: self.verbose,
                fetch_permits: Arc::clone(&self.fetch_permits),
                request_timeout: self.request_timeout,
            };
            let tx = tx.clone();
            workers.spawn(async move { worker.run(tx).await });
        }

        // Every live sender now belongs to a worker; with zero terms the
        // queue is already closed and collection returns immediately.
        drop(tx);

        tokio::spawn(async move {
            while let Some(joined) = workers.join_next().await {
                match joined {
                    Ok(outcome) => debug!("Worker finished: {:?}", outcome),
                    Err(err) => warn!("Search worker panicked: {}", err),
                }
            }
        });

        collect(rx).await
    }
}

/// Drain the output queue until it closes, in arrival order.
///
/// No deduplication: a package matching several terms legitimately
/// appears once per matching term.
async fn collect(mut rx: mpsc::Receiver<Package>) -> Vec<Package> {
    let mut results = Vec::new();
    while let Some(package) = rx.recv().await {
        if let (Some(url), Some(sequence)) = (&package.request_url, package.sequence) {
            debug!("GET {:02} '{}' at {} - 200 OK", sequence, package.name, url);
        }
        results.push(package);
    }
    results
}

#[cfg(test)]
mod tests;
