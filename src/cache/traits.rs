use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// 缓存查询结果
///
/// ExistsButNoValue 表示后端暂时不可用或值无法取出，
/// 调用方应当回源而不是当作未命中缓存负值。
#[derive(Debug, Clone, PartialEq)]
pub enum CacheResult<T> {
    Found(T),
    NotFound,
    ExistsButNoValue,
}

/// 对象缓存统一接口
///
/// 后端只负责字符串键值；类型化的读写通过下面 `dyn ObjectCache`
/// 上的辅助方法以 JSON 序列化完成。
#[async_trait]
pub trait ObjectCache: Send + Sync {
    async fn get_raw(&self, key: &str) -> CacheResult<String>;
    // ttl 单位秒，0 表示使用后端默认 TTL
    async fn insert_raw(&self, key: String, value: String, ttl: u64);
    async fn remove(&self, key: &str);
    async fn invalidate_all(&self);
}

impl dyn ObjectCache {
    /// 读取并反序列化缓存对象
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> CacheResult<T> {
        match self.get_raw(key).await {
            CacheResult::Found(raw) => match serde_json::from_str(&raw) {
                Ok(value) => CacheResult::Found(value),
                Err(e) => {
                    tracing::warn!("Failed to deserialize cached value for key '{}': {}", key, e);
                    // 脏数据直接清掉，让调用方回源
                    self.remove(key).await;
                    CacheResult::NotFound
                }
            },
            CacheResult::NotFound => CacheResult::NotFound,
            CacheResult::ExistsButNoValue => CacheResult::ExistsButNoValue,
        }
    }

    /// 序列化并写入缓存对象
    pub async fn insert<T: Serialize>(&self, key: String, value: &T, ttl: u64) {
        match serde_json::to_string(value) {
            Ok(raw) => self.insert_raw(key, raw, ttl).await,
            Err(e) => {
                tracing::warn!("Failed to serialize value for cache key '{}': {}", key, e);
            }
        }
    }
}
