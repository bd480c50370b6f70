use async_trait::async_trait;
use crate::Result;

/// Raw durable blob store: string keys to string values. Implementations
/// live in `hn_storage`; callers that need the swallow-and-log cache
/// semantics go through `ArticleCache` instead of this trait directly.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;

    async fn set(&self, key: &str, value: &str) -> Result<()>;

    async fn remove(&self, key: &str) -> Result<()>;
}
