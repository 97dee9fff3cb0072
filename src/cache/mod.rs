//! 对象缓存层
//!
//! 通过插件注册表支持多种缓存后端（Moka 内存缓存 / Redis）。
//! 缓存用于 JWT 用户信息与评分草稿，value 统一以 JSON 字符串存储。

pub mod object_cache;
pub mod register;

use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};

/// 缓存查询结果
#[derive(Debug, Clone, PartialEq)]
pub enum CacheResult<T> {
    Found(T),
    NotFound,
}

impl<T> CacheResult<T> {
    pub fn into_option(self) -> Option<T> {
        match self {
            CacheResult::Found(v) => Some(v),
            CacheResult::NotFound => None,
        }
    }
}

#[async_trait]
pub trait ObjectCache: Send + Sync {
    /// 读取原始字符串值
    async fn get_raw(&self, key: &str) -> CacheResult<String>;

    /// 写入原始字符串值，ttl 为秒，0 表示使用后端默认
    async fn insert_raw(&self, key: String, value: String, ttl: u64);

    /// 删除键
    async fn remove(&self, key: &str);

    /// 清空缓存
    async fn invalidate_all(&self);
}

/// 类型化读取，反序列化失败视为未命中并移除脏数据
pub async fn get_json<T: DeserializeOwned>(
    cache: &dyn ObjectCache,
    key: &str,
) -> CacheResult<T> {
    match cache.get_raw(key).await {
        CacheResult::Found(raw) => match serde_json::from_str::<T>(&raw) {
            Ok(value) => CacheResult::Found(value),
            Err(_) => {
                cache.remove(key).await;
                CacheResult::NotFound
            }
        },
        CacheResult::NotFound => CacheResult::NotFound,
    }
}

/// 类型化写入
pub async fn insert_json<T: Serialize>(cache: &dyn ObjectCache, key: String, value: &T, ttl: u64) {
    match serde_json::to_string(value) {
        Ok(raw) => cache.insert_raw(key, raw, ttl).await,
        Err(e) => tracing::warn!("Failed to serialize cache value for {key}: {e}"),
    }
}

/// 声明缓存插件并在程序启动时自动注册
#[macro_export]
macro_rules! declare_object_cache_plugin {
    ($name:literal, $ty:ident) => {
        paste::paste! {
            #[ctor::ctor]
            fn [<register_ $ty:snake _plugin>]() {
                $crate::cache::register::register_object_cache_plugin(
                    $name,
                    std::sync::Arc::new(|| {
                        Box::pin(async {
                            $ty::new()
                                .map(|c| Box::new(c) as Box<dyn $crate::cache::ObjectCache>)
                                .map_err($crate::errors::HwProjError::cache_connection)
                        })
                            as $crate::cache::register::BoxedObjectCacheFuture
                    }),
                );
            }
        }
    };
}
