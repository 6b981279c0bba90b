//! HTTP client for the AUR RPC endpoint.

use std::time::Duration;

use aurs_core::error::AurError;
use reqwest::{Client, ClientBuilder};
use tracing::debug;
use url::Url;

use crate::api::RpcResponse;
use crate::cache::CacheKey;
use crate::RpcResult;

/// Production RPC endpoint
pub const DEFAULT_BASE_URL: &str = "https://aur.archlinux.org/rpc";

/// RPC protocol version sent as the `v` query parameter
pub const RPC_VERSION: &str = "5";

const USER_AGENT: &str = concat!("aurs/", env!("CARGO_PKG_VERSION"));

/// A decoded reply together with the URL that produced it
#[derive(Debug, Clone)]
pub struct RpcReply {
    /// Fully resolved request URL, used for verbose diagnostics
    pub url: String,
    /// Decoded response envelope
    pub response: RpcResponse,
}

/// HTTP client for AUR RPC queries
#[derive(Debug, Clone)]
pub struct RpcClient {
    /// Underlying HTTP client with connection pooling
    client: Client,
    /// Base endpoint URL
    base_url: String,
}

impl RpcClient {
    /// Create a new client against the production endpoint
    pub fn new() -> RpcResult<Self> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Create a client against a custom endpoint (mirrors, tests)
    pub fn with_base_url(base_url: impl Into<String>) -> RpcResult<Self> {
        let client = ClientBuilder::new()
            .pool_max_idle_per_host(8)
            .pool_idle_timeout(Duration::from_secs(90))
            .timeout(Duration::from_secs(30))
            .gzip(true)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| AurError::network("rpc", "Failed to create HTTP client", e))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Build the fully resolved query URL for a lookup key.
    ///
    /// Wire parameters per the v5 contract: `v=5`, `type`, `by` plus `arg`
    /// for searches, `arg[]` for info lookups.
    pub fn query_url(&self, key: &CacheKey) -> RpcResult<Url> {
        let mut url = Url::parse(&self.base_url).map_err(|e| AurError::Decode {
            target: key.target().to_string(),
            message: format!("invalid base URL '{}': {}", self.base_url, e),
        })?;

        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("v", RPC_VERSION);
            pairs.append_pair("type", key.mode().as_str());
            match key {
                CacheKey::Search { term, field } => {
                    pairs.append_pair("by", field.as_str());
                    pairs.append_pair("arg", term);
                },
                CacheKey::Info { name } => {
                    pairs.append_pair("arg[]", name);
                },
            }
        }

        Ok(url)
    }

    /// Issue a single query and decode the envelope.
    ///
    /// Non-success statuses, body/JSON decode failures and error envelopes
    /// all map to typed errors; there is no retry at this layer.
    pub async fn fetch(&self, key: &CacheKey) -> RpcResult<RpcReply> {
        let url = self.query_url(key)?;
        let url_string = url.to_string();
        let target = key.target().to_string();
        debug!("GET {}", url_string);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| AurError::network(target.clone(), format!("request failed: {e}"), e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AurError::Status {
                status: status.as_u16(),
                target,
            });
        }

        let envelope = response
            .json::<RpcResponse>()
            .await
            .map_err(|e| AurError::Decode {
                target: target.clone(),
                message: e.to_string(),
            })?;

        if envelope.is_error() {
            return Err(AurError::Rpc {
                target,
                message: envelope.error_message(),
            });
        }

        Ok(RpcReply {
            url: url_string,
            response: envelope,
        })
    }
}
