use crate::cache::traits::ObjectCache;
#[cfg(test)]
use crate::cache::traits::CacheResult;
use crate::errors::{Result, SchoolError};
use once_cell::sync::Lazy;
use std::{
    collections::HashMap,
    future::Future,
    pin::Pin,
    sync::{Arc, RwLock},
};

pub type BoxedObjectCacheFuture =
    Pin<Box<dyn Future<Output = Result<Box<dyn ObjectCache>>> + Send>>;
pub type ObjectCacheConstructor = Arc<dyn Fn() -> BoxedObjectCacheFuture + Send + Sync>;

static OBJECT_CACHE_REGISTRY: Lazy<RwLock<HashMap<String, ObjectCacheConstructor>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

pub fn register_object_cache_plugin<S: Into<String>>(name: S, constructor: ObjectCacheConstructor) {
    let name = name.into();
    // 锁中毒时沿用内部数据，注册表只做插入
    let mut registry = OBJECT_CACHE_REGISTRY
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    registry.insert(name, constructor);
}

pub fn get_object_cache_plugin(name: &str) -> Option<ObjectCacheConstructor> {
    OBJECT_CACHE_REGISTRY
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .get(name)
        .cloned()
}

/// 按名称构造缓存后端
pub async fn create_object_cache(name: &str) -> Result<Box<dyn ObjectCache>> {
    let constructor = get_object_cache_plugin(name).ok_or_else(|| {
        SchoolError::cache_plugin_not_found(format!("Cache plugin '{name}' is not registered"))
    })?;
    constructor().await
}

pub fn debug_object_cache_registry() {
    let registry = OBJECT_CACHE_REGISTRY
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    if registry.is_empty() {
        tracing::debug!("No object cache plugins registered.");
    } else {
        tracing::debug!("Registered object cache plugins:");
        for key in registry.keys() {
            tracing::debug!(" - {}", key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unknown_plugin_is_reported() {
        let result = create_object_cache("memcached").await;
        match result {
            Err(err) => assert_eq!(err.code(), "E002"),
            Ok(_) => panic!("unexpected cache backend"),
        }
    }

    #[tokio::test]
    async fn test_moka_plugin_roundtrip() {
        crate::cache::register_builtin_object_caches();
        let Ok(cache) = create_object_cache("moka").await else {
            panic!("moka backend should always be constructible");
        };
        cache
            .insert_raw("user:token".to_string(), "{\"id\":1}".to_string(), 0)
            .await;
        assert_eq!(
            cache.get_raw("user:token").await,
            CacheResult::Found("{\"id\":1}".to_string())
        );
        cache.remove("user:token").await;
        assert_eq!(cache.get_raw("user:token").await, CacheResult::NotFound);
    }
}
