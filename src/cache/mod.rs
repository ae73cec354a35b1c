pub mod object_cache;
pub mod register;
pub mod traits;

pub use traits::{CacheResult, ObjectCache};

/// 声明一个对象缓存插件，生成 `register()` 将构造器写入注册表
#[macro_export]
macro_rules! declare_object_cache_plugin {
    ($name:literal, $ty:ty) => {
        pub fn register() {
            $crate::cache::register::register_object_cache_plugin(
                $name,
                std::sync::Arc::new(|| {
                    Box::pin(async {
                        <$ty>::new()
                            .map(|cache| {
                                Box::new(cache) as Box<dyn $crate::cache::ObjectCache>
                            })
                            .map_err($crate::errors::SchoolError::cache_connection)
                    }) as $crate::cache::register::BoxedObjectCacheFuture
                }),
            );
        }
    };
}

/// 注册内置缓存后端
pub fn register_builtin_object_caches() {
    object_cache::moka::register();
    object_cache::redis::register();
}
