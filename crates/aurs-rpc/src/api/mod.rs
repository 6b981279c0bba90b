//! AUR RPC v5 response envelope.

use aurs_core::types::Package;
use serde::Deserialize;
use tracing::warn;

/// Top-level response envelope returned by the RPC endpoint.
///
/// A response without a `results` array fails envelope decoding and is a
/// fetch failure for the whole lookup. The entries themselves stay untyped
/// here so that one malformed entry fails alone in [`decode_packages`]
/// instead of aborting its siblings.
///
/// [`decode_packages`]: RpcResponse::decode_packages
#[derive(Debug, Clone, Deserialize)]
pub struct RpcResponse {
    #[serde(default)]
    pub version: Option<u32>,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(rename = "resultcount", default)]
    pub result_count: u64,
    pub results: Vec<serde_json::Value>,
    #[serde(default)]
    pub error: Option<String>,
}

impl RpcResponse {
    /// Check whether the registry answered with an error envelope
    pub fn is_error(&self) -> bool {
        self.kind == "error" || self.error.is_some()
    }

    /// The registry's error message, if any
    pub fn error_message(&self) -> String {
        self.error
            .clone()
            .unwrap_or_else(|| "unspecified registry error".to_string())
    }

    /// Decode the result entries into packages, one at a time.
    ///
    /// An entry that fails to decode is skipped with a warning; the
    /// remaining entries of the same response are still decoded, in
    /// server-returned order.
    pub fn decode_packages(&self, target: &str) -> Vec<Package> {
        let mut packages = Vec::with_capacity(self.results.len());
        for entry in &self.results {
            match serde_json::from_value::<Package>(entry.clone()) {
                Ok(package) => packages.push(package),
                Err(err) => {
                    warn!("Skipping undecodable result entry for '{}': {}", target, err);
                },
            }
        }
        packages
    }
}
