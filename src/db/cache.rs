// db/cache.rs
use redis::aio::ConnectionManager;
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;

/// Small JSON get/set helper over the shared Redis connection manager.
/// Every operation is best-effort; callers ignore cache errors.
pub struct CacheHelper;

impl CacheHelper {
    pub async fn get<T: DeserializeOwned>(
        redis_client: &Arc<ConnectionManager>,
        key: &str,
    ) -> Result<Option<T>, redis::RedisError> {
        let mut conn = ConnectionManager::clone(redis_client);
        let raw: Option<String> = redis::cmd("GET").arg(key).query_async(&mut conn).await?;

        match raw {
            Some(raw) => Ok(serde_json::from_str::<T>(&raw).ok()),
            None => Ok(None),
        }
    }

    pub async fn set<T: Serialize>(
        redis_client: &Arc<ConnectionManager>,
        key: &str,
        value: &T,
        ttl_seconds: usize,
    ) -> Result<(), redis::RedisError> {
        let mut conn = ConnectionManager::clone(redis_client);
        let payload = serde_json::to_string(value).unwrap_or_else(|_| "null".to_string());

        redis::cmd("SETEX")
            .arg(key)
            .arg(ttl_seconds)
            .arg(payload)
            .query_async::<_, ()>(&mut conn)
            .await
    }
}
