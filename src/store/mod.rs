//! Hierarchical document store addressed by `/`-separated paths.
//!
//! Every backend shares the tree semantics in [`document`]: writes create
//! intermediate nodes, and empty maps or `null` leaves are never kept, so a
//! node that ends up empty reads back as absent.

use futures::future::BoxFuture;
use serde_json::{Map, Value};
use std::fmt;
use crate::errors::StoreResult;

pub mod document;
mod memory;
mod redis_store;

pub use memory::MemoryStore;
pub use redis_store::RedisStore;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StorePath {
    segments: Vec<String>,
}

impl StorePath {
    pub fn root(segment: impl Into<String>) -> Self {
        Self { segments: vec![segment.into()] }
    }

    pub fn child(mut self, segment: impl Into<String>) -> Self {
        self.segments.push(segment.into());
        self
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}

impl fmt::Display for StorePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("/"))
    }
}

/// A remote document database. Calls are never retried here; failures
/// propagate to the caller as [`StoreError`].
pub trait DocumentStore: Send + Sync {
    /// Reads the node at `path`, `None` when absent.
    fn get<'a>(&'a self, path: &'a StorePath) -> BoxFuture<'a, StoreResult<Option<Value>>>;

    /// Replaces the node at `path` with `document`.
    fn set<'a>(&'a self, path: &'a StorePath, document: Value) -> BoxFuture<'a, StoreResult<()>>;

    /// Merges `fields` into the node at `path`, leaving other children untouched.
    fn update<'a>(
        &'a self,
        path: &'a StorePath,
        fields: Map<String, Value>,
    ) -> BoxFuture<'a, StoreResult<()>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_builder_and_display() {
        let path = StorePath::root("users").child("alice").child("expenseChart");
        assert_eq!(path.to_string(), "users/alice/expenseChart");
        assert_eq!(path.segments().len(), 3);
    }
}
