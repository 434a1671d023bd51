use futures::future::{BoxFuture, FutureExt};
use redis::{AsyncCommands, Client};
use serde_json::{Map, Value};
use std::sync::Arc;
use crate::errors::{StoreError, StoreResult};
use super::{document, DocumentStore, StorePath};

/// Keeps each `<collection>/<id>` record as one JSON string under the Redis
/// key `<collection>:<id>`. Deeper paths are resolved inside that record.
///
/// Writes below a record read the record, modify it and write it back with no
/// locking; concurrent writers to the same record race and the last one wins.
#[derive(Clone)]
pub struct RedisStore {
    client: Arc<Client>,
}

impl RedisStore {
    pub fn new(client: Arc<Client>) -> Self {
        Self { client }
    }

    async fn load_record(&self, key: &str) -> StoreResult<Value> {
        let mut conn = self.client.get_async_connection().await?;
        let data: Option<String> = conn.get(key).await?;
        match data {
            Some(data) => Ok(serde_json::from_str(&data)?),
            None => Ok(Value::Null),
        }
    }

    async fn save_record(&self, key: &str, record: &Value) -> StoreResult<()> {
        let mut conn = self.client.get_async_connection().await?;
        if record.is_null() || record.as_object().is_some_and(Map::is_empty) {
            conn.del::<_, ()>(key).await?;
        } else {
            conn.set::<_, _, ()>(key, serde_json::to_string(record)?).await?;
        }
        Ok(())
    }
}

// Splits `users/alice/expenseChart` into the key `users:alice` and the
// remaining segments inside that record.
fn record_key(path: &StorePath) -> StoreResult<(String, &[String])> {
    match path.segments() {
        [collection, id, rest @ ..] => Ok((format!("{}:{}", collection, id), rest)),
        _ => Err(StoreError::InvalidPath(path.to_string())),
    }
}

impl DocumentStore for RedisStore {
    fn get<'a>(&'a self, path: &'a StorePath) -> BoxFuture<'a, StoreResult<Option<Value>>> {
        async move {
            let (key, rest) = record_key(path)?;
            tracing::debug!("redis get {} ({})", key, path);
            let record = self.load_record(&key).await?;
            Ok(document::get_at(&record, rest).cloned())
        }
        .boxed()
    }

    fn set<'a>(&'a self, path: &'a StorePath, value: Value) -> BoxFuture<'a, StoreResult<()>> {
        async move {
            let (key, rest) = record_key(path)?;
            tracing::debug!("redis set {} ({})", key, path);
            let mut record = if rest.is_empty() {
                Value::Null
            } else {
                self.load_record(&key).await?
            };
            document::set_at(&mut record, rest, value)?;
            self.save_record(&key, &record).await
        }
        .boxed()
    }

    fn update<'a>(
        &'a self,
        path: &'a StorePath,
        fields: Map<String, Value>,
    ) -> BoxFuture<'a, StoreResult<()>> {
        async move {
            let (key, rest) = record_key(path)?;
            tracing::debug!("redis update {} ({})", key, path);
            let mut record = self.load_record(&key).await?;
            document::merge_at(&mut record, rest, fields)?;
            self.save_record(&key, &record).await
        }
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_key_splits_path() {
        let path = StorePath::root("users").child("alice").child("expenseChart").child("Food");
        let (key, rest) = record_key(&path).unwrap();
        assert_eq!(key, "users:alice");
        assert_eq!(rest, &["expenseChart".to_string(), "Food".to_string()][..]);
    }

    #[test]
    fn test_record_key_needs_collection_and_id() {
        let path = StorePath::root("users");
        assert!(matches!(record_key(&path), Err(StoreError::InvalidPath(_))));
    }
}
