//! Package metadata as returned by the AUR RPC endpoint.

use serde::{Deserialize, Deserializer, Serialize};

/// One package entry from an RPC `results` array.
///
/// Field names follow the wire format of the AUR RPC v5 API. Absent or
/// `null` fields decode to their zero value, so a partially filled entry
/// (orphaned packages have a `null` maintainer) never fails to decode.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Package {
    #[serde(rename = "Name", deserialize_with = "null_to_default")]
    pub name: String,
    #[serde(rename = "Version", deserialize_with = "null_to_default")]
    pub version: String,
    #[serde(rename = "Description", deserialize_with = "null_to_default")]
    pub description: String,
    #[serde(rename = "Maintainer", deserialize_with = "null_to_default")]
    pub maintainer: String,
    #[serde(rename = "NumVotes", deserialize_with = "null_to_default")]
    pub num_votes: i64,
    #[serde(rename = "Popularity", deserialize_with = "null_to_default")]
    pub popularity: f64,
    #[serde(rename = "URL", deserialize_with = "null_to_default")]
    pub url: String,

    /// Resolved request URL, stamped before emission in verbose mode.
    /// Never part of the wire format or the JSON output.
    #[serde(skip)]
    pub request_url: Option<String>,
    /// 1-based position within the worker's emission stream, stamped
    /// together with `request_url`.
    #[serde(skip)]
    pub sequence: Option<u64>,
}

/// Decode `null` as the field's zero value instead of failing
fn null_to_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Package {
    /// Create a package with the required name and version
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            ..Self::default()
        }
    }

    /// Check whether the package has no maintainer
    pub fn is_orphaned(&self) -> bool {
        self.maintainer.is_empty()
    }

    /// Attach verbose diagnostics prior to emission
    pub fn stamp_diagnostics(&mut self, request_url: impl Into<String>, sequence: u64) {
        self.request_url = Some(request_url.into());
        self.sequence = Some(sequence);
    }
}
