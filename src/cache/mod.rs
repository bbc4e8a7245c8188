//! 对象缓存
//!
//! 后端以插件形式注册（moka / redis），启动时按配置选择，连接失败回退到 moka。
//! 用于会话用户和管理员验证码。

pub mod object_cache;
pub mod register;

use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};
use std::sync::Arc;
use tracing::{error, warn};

use crate::config::AppConfig;
use crate::errors::{CampusError, Result};

#[derive(Debug, Clone, PartialEq)]
pub enum CacheResult<T> {
    Found(T),
    NotFound,
    // 后端出错，无法判断键是否存在
    ExistsButNoValue,
}

#[async_trait]
pub trait ObjectCache: Send + Sync {
    async fn get_raw(&self, key: &str) -> CacheResult<String>;
    /// ttl 为秒，0 表示使用默认 TTL
    async fn insert_raw(&self, key: String, value: String, ttl: u64);
    async fn remove(&self, key: &str);
}

impl dyn ObjectCache {
    pub async fn get_json<T: DeserializeOwned>(&self, key: &str) -> CacheResult<T> {
        match self.get_raw(key).await {
            CacheResult::Found(raw) => match serde_json::from_str(&raw) {
                Ok(value) => CacheResult::Found(value),
                Err(_) => {
                    self.remove(key).await;
                    CacheResult::NotFound
                }
            },
            CacheResult::NotFound => CacheResult::NotFound,
            CacheResult::ExistsButNoValue => CacheResult::ExistsButNoValue,
        }
    }

    pub async fn insert_json<T: Serialize>(&self, key: String, value: &T, ttl: u64) {
        match serde_json::to_string(value) {
            Ok(raw) => self.insert_raw(key, raw, ttl).await,
            Err(e) => error!("Failed to serialize cache value for {}: {}", key, e),
        }
    }
}

/// 注册缓存插件，插件类型需提供 `fn new() -> Result<Self, String>`
#[macro_export]
macro_rules! declare_object_cache_plugin {
    ($name:expr, $ty:ty) => {
        #[ctor::ctor]
        unsafe fn __register_object_cache_plugin() {
            $crate::cache::register::register_object_cache_plugin(
                $name,
                std::sync::Arc::new(|| -> $crate::cache::register::BoxedObjectCacheFuture {
                    Box::pin(async {
                        let cache = <$ty>::new().map_err($crate::errors::CampusError::cache_connection)?;
                        Ok::<_, $crate::errors::CampusError>(
                            Box::new(cache) as Box<dyn $crate::cache::ObjectCache>
                        )
                    })
                }),
            );
        }
    };
}

/// 按配置创建缓存，失败时回退到 moka
pub async fn create_object_cache() -> Result<Arc<dyn ObjectCache>> {
    register::debug_object_cache_registry();
    let configured = AppConfig::get().cache.cache_type.clone();

    match build_plugin(&configured).await {
        Ok(cache) => Ok(cache),
        Err(e) if configured != "moka" => {
            warn!("Cache backend '{}' unavailable ({}), falling back to moka", configured, e);
            build_plugin("moka").await
        }
        Err(e) => Err(e),
    }
}

async fn build_plugin(name: &str) -> Result<Arc<dyn ObjectCache>> {
    let constructor = register::get_object_cache_plugin(name)
        .ok_or_else(|| CampusError::cache_plugin_not_found(name.to_string()))?;
    let cache = constructor().await?;
    Ok(Arc::from(cache))
}
