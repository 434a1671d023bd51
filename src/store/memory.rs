use futures::future::{BoxFuture, FutureExt};
use serde_json::{Map, Value};
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};
use tokio::sync::RwLock;
use crate::errors::StoreResult;
use super::{document, DocumentStore, StorePath};

/// In-process document tree. Clones share the same tree.
#[derive(Clone, Default)]
pub struct MemoryStore {
    root: Arc<RwLock<Value>>,
    writes: Arc<AtomicUsize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `set`/`update` calls that reached the tree.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub async fn snapshot(&self) -> Value {
        self.root.read().await.clone()
    }
}

impl DocumentStore for MemoryStore {
    fn get<'a>(&'a self, path: &'a StorePath) -> BoxFuture<'a, StoreResult<Option<Value>>> {
        async move {
            tracing::debug!("memory get {}", path);
            let root = self.root.read().await;
            Ok(document::get_at(&root, path.segments()).cloned())
        }
        .boxed()
    }

    fn set<'a>(&'a self, path: &'a StorePath, value: Value) -> BoxFuture<'a, StoreResult<()>> {
        async move {
            tracing::debug!("memory set {}", path);
            let mut root = self.root.write().await;
            self.writes.fetch_add(1, Ordering::SeqCst);
            document::set_at(&mut root, path.segments(), value)
        }
        .boxed()
    }

    fn update<'a>(
        &'a self,
        path: &'a StorePath,
        fields: Map<String, Value>,
    ) -> BoxFuture<'a, StoreResult<()>> {
        async move {
            tracing::debug!("memory update {} ({} fields)", path, fields.len());
            let mut root = self.root.write().await;
            self.writes.fetch_add(1, Ordering::SeqCst);
            document::merge_at(&mut root, path.segments(), fields)
        }
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_set_then_get() {
        let store = MemoryStore::new();
        let path = StorePath::root("users").child("alice");
        store.set(&path, json!({"username": "Alice"})).await.unwrap();

        assert_eq!(store.get(&path).await.unwrap(), Some(json!({"username": "Alice"})));
        assert_eq!(store.get(&path.clone().child("missing")).await.unwrap(), None);
        assert_eq!(store.write_count(), 1);
    }

    #[tokio::test]
    async fn test_update_merges_fields() {
        let store = MemoryStore::new();
        let path = StorePath::root("users").child("alice");
        store.set(&path, json!({"username": "Alice", "monthlySalary": 0})).await.unwrap();

        let mut fields = Map::new();
        fields.insert("monthlySalary".into(), json!(2500));
        store.update(&path, fields).await.unwrap();

        assert_eq!(
            store.get(&path).await.unwrap(),
            Some(json!({"username": "Alice", "monthlySalary": 2500}))
        );
        assert_eq!(store.write_count(), 2);
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let store = MemoryStore::new();
        let other = store.clone();
        let path = StorePath::root("users").child("erin");
        store.set(&path, json!({"password": "x"})).await.unwrap();
        assert!(other.get(&path).await.unwrap().is_some());
    }
}
