use async_trait::async_trait;
use redis::{AsyncCommands, aio::MultiplexedConnection};
use tracing::{debug, error, warn};

use crate::cache::{CacheResult, ObjectCache};
use crate::config::AppConfig;
use crate::declare_object_cache_plugin;

declare_object_cache_plugin!("redis", RedisObjectCache);

pub struct RedisObjectCache {
    client: redis::Client,
    key_prefix: String,
    ttl: u64, // TTL in seconds
}

impl RedisObjectCache {
    pub fn new() -> Result<Self, String> {
        let config = AppConfig::get();
        let redis_config = &config.cache.redis;

        debug!(
            "RedisObjectCache created with prefix: '{}', TTL: {}s",
            redis_config.key_prefix, config.cache.default_ttl
        );

        let client = redis::Client::open(redis_config.url.clone())
            .map_err(|e| format!("Failed to create Redis client: {e}"))?;

        // 测试 Redis 连接 - 使用同步连接进行简单测试
        match client.get_connection() {
            Ok(mut conn) => match redis::cmd("PING").query::<String>(&mut conn) {
                Ok(response) => {
                    debug!("Redis connection test successful: {}", response);
                }
                Err(e) => {
                    error!(
                        "Failed to ping Redis server: {}. Check Redis server status and URL: {}",
                        e, redis_config.url
                    );
                    return Err(format!("Redis ping failed: {e}"));
                }
            },
            Err(e) => {
                error!(
                    "Failed to connect to Redis server: {}. Check Redis server status and URL: {}",
                    e, redis_config.url
                );
                return Err(format!("Redis connection failed: {e}"));
            }
        }

        Ok(Self {
            client,
            key_prefix: redis_config.key_prefix.clone(),
            ttl: config.cache.default_ttl,
        })
    }

    async fn get_connection(&self) -> Result<MultiplexedConnection, redis::RedisError> {
        let client = &self.client;
        let conn = client.get_multiplexed_async_connection().await?;
        Ok(conn)
    }

    fn make_key(&self, key: &str) -> String {
        format!("{}{}", self.key_prefix, key)
    }
}

#[async_trait]
impl ObjectCache for RedisObjectCache {
    async fn get_raw(&self, key: &str) -> CacheResult<String> {
        let full_key = self.make_key(key);
        match self.get_connection().await {
            Ok(mut conn) => match conn.get::<_, Option<String>>(&full_key).await {
                Ok(Some(value)) => CacheResult::Found(value),
                Ok(None) => CacheResult::NotFound,
                Err(e) => {
                    warn!("Redis GET failed for {}: {}", full_key, e);
                    CacheResult::NotFound
                }
            },
            Err(e) => {
                warn!("Failed to get Redis connection: {}", e);
                CacheResult::NotFound
            }
        }
    }

    async fn insert_raw(&self, key: String, value: String, ttl: u64) {
        let full_key = self.make_key(&key);
        let effective_ttl = if ttl == 0 { self.ttl } else { ttl };
        match self.get_connection().await {
            Ok(mut conn) => {
                if let Err(e) = conn
                    .set_ex::<_, _, ()>(&full_key, value, effective_ttl)
                    .await
                {
                    warn!("Redis SETEX failed for {}: {}", full_key, e);
                }
            }
            Err(e) => warn!("Failed to get Redis connection: {}", e),
        }
    }

    async fn remove(&self, key: &str) {
        let full_key = self.make_key(key);
        match self.get_connection().await {
            Ok(mut conn) => {
                if let Err(e) = conn.del::<_, ()>(&full_key).await {
                    warn!("Redis DEL failed for {}: {}", full_key, e);
                }
            }
            Err(e) => warn!("Failed to get Redis connection: {}", e),
        }
    }

    async fn invalidate_all(&self) {
        let pattern = self.make_key("*");
        match self.get_connection().await {
            Ok(mut conn) => {
                let keys: Vec<String> = match conn.keys(&pattern).await {
                    Ok(keys) => keys,
                    Err(e) => {
                        warn!("Redis KEYS failed for {}: {}", pattern, e);
                        return;
                    }
                };
                if !keys.is_empty()
                    && let Err(e) = conn.del::<_, ()>(keys).await
                {
                    warn!("Redis DEL failed during invalidate_all: {}", e);
                }
            }
            Err(e) => warn!("Failed to get Redis connection: {}", e),
        }
    }
}
