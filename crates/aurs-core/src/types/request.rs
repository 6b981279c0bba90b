//! Search request types.
//!
//! A `SearchRequest` is immutable once dispatch begins; one worker is
//! started per term (or package name in info mode).

use std::fmt;
use std::str::FromStr;

use crate::error::AurError;

/// Query shape against the registry: multi-term matching vs. detail lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchMode {
    Search,
    Info,
}

impl SearchMode {
    /// Wire value for the `type` query parameter
    pub fn as_str(self) -> &'static str {
        match self {
            SearchMode::Search => "search",
            SearchMode::Info => "info",
        }
    }
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Search field selector for the `by` query parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SearchField {
    #[default]
    Name,
    NameDesc,
    Maintainer,
    Depends,
    MakeDepends,
    OptDepends,
    CheckDepends,
}

impl SearchField {
    /// All selectable fields, in CLI help order
    pub const ALL: [SearchField; 7] = [
        SearchField::Name,
        SearchField::NameDesc,
        SearchField::Maintainer,
        SearchField::Depends,
        SearchField::MakeDepends,
        SearchField::OptDepends,
        SearchField::CheckDepends,
    ];

    /// Wire value for the `by` query parameter
    pub fn as_str(self) -> &'static str {
        match self {
            SearchField::Name => "name",
            SearchField::NameDesc => "name-desc",
            SearchField::Maintainer => "maintainer",
            SearchField::Depends => "depends",
            SearchField::MakeDepends => "makedepends",
            SearchField::OptDepends => "optdepends",
            SearchField::CheckDepends => "checkdepends",
        }
    }
}

impl fmt::Display for SearchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchField {
    type Err = AurError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SearchField::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| AurError::InvalidSearchField {
                value: s.to_string(),
            })
    }
}

/// One invocation's worth of lookups
#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub mode: SearchMode,
    pub field: SearchField,
    /// Search terms (search mode) or package names (info mode)
    pub terms: Vec<String>,
    /// Per-term emission cap; -1 or any value <= 0 means unbounded
    pub limit: i64,
}

impl SearchRequest {
    /// Build a search-mode request over the given terms
    pub fn search(terms: Vec<String>, field: SearchField) -> Self {
        Self {
            mode: SearchMode::Search,
            field,
            terms,
            limit: -1,
        }
    }

    /// Build an info-mode request over the given package names
    pub fn info(names: Vec<String>) -> Self {
        Self {
            mode: SearchMode::Info,
            field: SearchField::Name,
            terms: names,
            limit: -1,
        }
    }

    /// Set the per-term emission cap
    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = limit;
        self
    }

    /// The emission cap as an option; `None` means unbounded
    pub fn effective_limit(&self) -> Option<usize> {
        (self.limit > 0).then_some(self.limit as usize)
    }

    /// Check whether there is anything to dispatch
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}
