//! Per-term lookup worker.
//!
//! Each worker runs the same state machine: check the cache, replay a
//! fresh entry without touching the network, otherwise fetch, decode,
//! emit up to the cap, and store the complete decoded set back into the
//! cache.

use std::sync::Arc;
use std::time::Duration;

use aurs_core::error::{AurError, AurResult};
use aurs_core::types::Package;
use aurs_rpc::{CacheKey, RpcClient, RpcReply, SearchCache};
use tokio::sync::{mpsc, Semaphore};
use tracing::{debug, warn};

/// Terminal state of one worker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerOutcome {
    /// Served from a fresh cache entry; no network access occurred
    Replayed(usize),
    /// Fetched from the registry, emitted, and cached
    Fetched(usize),
    /// Fetch or envelope decode failed; nothing was emitted
    Failed,
}

pub(crate) struct SearchWorker {
    pub(crate) client: Arc<RpcClient>,
    pub(crate) cache: Arc<SearchCache>,
    pub(crate) key: CacheKey,
    /// Emission cap for this worker; `None` means unbounded
    pub(crate) limit: Option<usize>,
    pub(crate) verbose: bool,
    /// Gates simultaneous in-flight network calls across all workers
    pub(crate) fetch_permits: Arc<Semaphore>,
    pub(crate) request_timeout: Duration,
}

impl SearchWorker {
    /// Drive the worker to completion, emitting onto `tx`.
    ///
    /// Failures are logged here and reported only through the outcome;
    /// nothing error-shaped ever crosses the output queue.
    pub(crate) async fn run(self, tx: mpsc::Sender<Package>) -> WorkerOutcome {
        if let Some(results) = self.cache.get(&self.key) {
            debug!("Cache hit for '{}' ({} results)", self.key, results.len());
            let sent = self.emit(results, &self.replay_url(), &tx).await;
            return WorkerOutcome::Replayed(sent);
        }

        let reply = match self.fetch().await {
            Ok(reply) => reply,
            Err(err) => {
                warn!("Lookup for '{}' failed: {}", self.key, err);
                return WorkerOutcome::Failed;
            },
        };

        let packages = reply.response.decode_packages(self.key.target());
        let sent = self.emit(packages.clone(), &reply.url, &tx).await;

        // The complete decoded set is stored, not the emitted subset, so a
        // later replay with a higher or absent cap serves full results.
        self.cache.insert(self.key.clone(), packages);
        WorkerOutcome::Fetched(sent)
    }

    /// Acquire a fetch permit and issue the network call under a deadline
    async fn fetch(&self) -> AurResult<RpcReply> {
        let _permit = self
            .fetch_permits
            .acquire()
            .await
            .map_err(|e| AurError::network(self.key.target(), "fetch gate closed", e))?;

        match tokio::time::timeout(self.request_timeout, self.client.fetch(&self.key)).await {
            Ok(result) => result,
            Err(elapsed) => Err(AurError::network(
                self.key.target(),
                format!("request timed out after {:?}", self.request_timeout),
                elapsed,
            )),
        }
    }

    /// Send packages in order, stopping at the cap.
    ///
    /// The counter is local to this worker; sibling workers never share
    /// emission state.
    async fn emit(&self, packages: Vec<Package>, url: &str, tx: &mpsc::Sender<Package>) -> usize {
        let mut sent = 0usize;
        for mut package in packages {
            if let Some(limit) = self.limit {
                if sent >= limit {
                    break;
                }
            }
            if self.verbose {
                package.stamp_diagnostics(url, (sent + 1) as u64);
            }
            if tx.send(package).await.is_err() {
                // Collector is gone; nothing left to deliver to
                break;
            }
            sent += 1;
        }
        sent
    }

    /// The URL a replay would have fetched; stamped onto replayed packages
    /// so verbose output is uniform across hit and miss paths
    fn replay_url(&self) -> String {
        self.client
            .query_url(&self.key)
            .map(|url| url.to_string())
            .unwrap_or_default()
    }
}
