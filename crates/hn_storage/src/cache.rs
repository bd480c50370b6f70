use chrono::{DateTime, Utc};
use hn_core::{Article, KeyValueStore, Partition};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tracing::warn;

/// Record keys outside the three article partitions.
pub mod keys {
    pub const NOTIFICATION_FILTERS: &str = "notification_filters";
    pub const LAST_SEEN_CREATED_AT: &str = "hn_last_seen_created_at";
    pub const NOTIFICATIONS_ENABLED: &str = "app_notifications_enabled";
}

/// Durable cache over a raw key-value store. Reads that fail or hit a
/// corrupt record yield the empty value; writes that fail are dropped.
/// Either way the failure is logged and never reaches the caller, so
/// in-memory state stays authoritative for the running process.
#[derive(Clone)]
pub struct ArticleCache {
    store: Arc<dyn KeyValueStore>,
}

impl ArticleCache {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    async fn read_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.store.get(key).await {
            Ok(value) => value?,
            Err(e) => {
                warn!("Error reading cache record {}: {}", key, e);
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Corrupt cache record {}, treating as empty: {}", key, e);
                None
            }
        }
    }

    async fn write_json<T: Serialize>(&self, key: &str, value: &T) {
        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Error serializing cache record {}: {}", key, e);
                return;
            }
        };
        if let Err(e) = self.store.set(key, &raw).await {
            warn!("Error writing cache record {}: {}", key, e);
        }
    }

    pub async fn get_partition(&self, partition: Partition) -> Vec<Article> {
        self.read_json(partition.cache_key()).await.unwrap_or_default()
    }

    /// Full overwrite of a partition record.
    pub async fn replace_partition(&self, partition: Partition, articles: &[Article]) {
        self.write_json(partition.cache_key(), &articles).await;
    }

    /// Idempotent insert: no-op when an article with the same id is
    /// already present.
    pub async fn append(&self, partition: Partition, article: &Article) {
        let mut current = self.get_partition(partition).await;
        if current.iter().any(|a| a.id == article.id) {
            return;
        }
        current.push(article.clone());
        self.replace_partition(partition, &current).await;
    }

    pub async fn remove_by_id(&self, partition: Partition, id: &str) {
        let mut current = self.get_partition(partition).await;
        current.retain(|a| a.id != id);
        self.replace_partition(partition, &current).await;
    }

    pub async fn clear(&self, partition: Partition) {
        if let Err(e) = self.store.remove(partition.cache_key()).await {
            warn!("Error clearing cache record {}: {}", partition.cache_key(), e);
        }
    }

    pub async fn filters(&self) -> Vec<String> {
        self.read_json(keys::NOTIFICATION_FILTERS).await.unwrap_or_default()
    }

    pub async fn set_filters(&self, filters: &[String]) {
        self.write_json(keys::NOTIFICATION_FILTERS, &filters).await;
    }

    /// High-water-mark of the headless background check. Independent of
    /// the foreground poller's in-memory mark, which never touches the
    /// cache.
    pub async fn last_seen(&self) -> Option<DateTime<Utc>> {
        self.read_json(keys::LAST_SEEN_CREATED_AT).await
    }

    pub async fn set_last_seen(&self, timestamp: DateTime<Utc>) {
        self.write_json(keys::LAST_SEEN_CREATED_AT, &timestamp).await;
    }

    pub async fn notifications_enabled(&self) -> bool {
        self.read_json(keys::NOTIFICATIONS_ENABLED).await.unwrap_or(true)
    }

    pub async fn set_notifications_enabled(&self, enabled: bool) {
        self.write_json(keys::NOTIFICATIONS_ENABLED, &enabled).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;
    use chrono::TimeZone;

    fn article(id: &str) -> Article {
        Article {
            id: id.to_string(),
            title: Some(format!("Article {}", id)),
            story_title: None,
            story_url: None,
            author: "tester".to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
        }
    }

    fn cache() -> ArticleCache {
        ArticleCache::new(Arc::new(MemoryStore::new()))
    }

    #[tokio::test]
    async fn missing_partition_reads_as_empty() {
        let cache = cache();
        assert!(cache.get_partition(Partition::Active).await.is_empty());
    }

    #[tokio::test]
    async fn append_dedups_by_id() {
        let cache = cache();
        cache.append(Partition::Deleted, &article("a")).await;
        cache.append(Partition::Deleted, &article("a")).await;
        assert_eq!(cache.get_partition(Partition::Deleted).await.len(), 1);
    }

    #[tokio::test]
    async fn remove_by_id_filters_the_record() {
        let cache = cache();
        cache.append(Partition::Favourite, &article("a")).await;
        cache.append(Partition::Favourite, &article("b")).await;
        cache.remove_by_id(Partition::Favourite, "a").await;

        let remaining = cache.get_partition(Partition::Favourite).await;
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, "b");
    }

    #[tokio::test]
    async fn corrupt_record_reads_as_empty() {
        let store = Arc::new(MemoryStore::new());
        store
            .set(Partition::Active.cache_key(), "not valid json")
            .await
            .unwrap();

        let cache = ArticleCache::new(store);
        assert!(cache.get_partition(Partition::Active).await.is_empty());
    }

    #[tokio::test]
    async fn clear_drops_the_record() {
        let cache = cache();
        cache.append(Partition::Deleted, &article("a")).await;
        cache.clear(Partition::Deleted).await;
        assert!(cache.get_partition(Partition::Deleted).await.is_empty());
    }

    #[tokio::test]
    async fn notifications_enabled_defaults_to_true() {
        let cache = cache();
        assert!(cache.notifications_enabled().await);
        cache.set_notifications_enabled(false).await;
        assert!(!cache.notifications_enabled().await);
    }

    #[tokio::test]
    async fn last_seen_round_trips() {
        let cache = cache();
        assert_eq!(cache.last_seen().await, None);
        let ts = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        cache.set_last_seen(ts).await;
        assert_eq!(cache.last_seen().await, Some(ts));
    }
}
