//! 对象缓存层
//!
//! 通过注册表插件机制支持多种缓存后端（Moka 内存缓存 / Redis），
//! 后端在各自模块里用 `declare_object_cache_plugin!` 自注册。

pub mod object_cache;
pub mod register;
pub mod traits;

pub use traits::{CacheResult, ObjectCache};

/// 声明并自注册一个缓存后端插件
#[macro_export]
macro_rules! declare_object_cache_plugin {
    ($name:expr, $ty:ty) => {
        #[ctor::ctor]
        fn __register_object_cache_plugin() {
            $crate::cache::register::register_object_cache_plugin(
                $name,
                std::sync::Arc::new(
                    || -> $crate::cache::register::BoxedObjectCacheFuture {
                        Box::pin(async {
                            let cache = <$ty>::new()
                                .map_err($crate::errors::CourseHubError::cache_connection)?;
                            Ok(Box::new(cache) as Box<dyn $crate::cache::ObjectCache>)
                        })
                    },
                ),
            );
        }
    };
}
