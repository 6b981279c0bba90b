//! Core data types for AUR lookups.

mod package;
mod request;

pub use package::Package;
pub use request::{SearchField, SearchMode, SearchRequest};
