use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use hn_core::{Article, ArticleSource, Connectivity, Partition, Result};
use hn_storage::{ArticleCache, MemoryStore};
use hn_sync::{ArticleStore, Refresher};
use std::sync::Arc;

fn article(id: &str, minute: u32) -> Article {
    Article {
        id: id.to_string(),
        title: Some(format!("Article {}", id)),
        story_title: None,
        story_url: None,
        author: "tester".to_string(),
        created_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, minute, 0).unwrap(),
    }
}

struct FixedSource(Vec<Article>);

#[async_trait]
impl ArticleSource for FixedSource {
    async fn fetch_page(&self, _page: u32) -> Result<Vec<Article>> {
        Ok(self.0.clone())
    }
}

struct Online;

#[async_trait]
impl Connectivity for Online {
    async fn is_connected(&self) -> bool {
        true
    }
}

#[tokio::test]
async fn refresh_reconciles_remote_against_deleted_and_writes_through() {
    let backend = Arc::new(MemoryStore::new());
    let cache = ArticleCache::new(backend);
    let store = ArticleStore::new(cache.clone());
    store.load_starting_data().await;

    // The user previously deleted article "b".
    store.set_deleted(vec![article("b", 0)]).await;

    let source = Arc::new(FixedSource(vec![article("a", 2), article("b", 1)]));
    let refresher = Refresher::new(source, Arc::new(Online), store.clone(), cache.clone());
    refresher.refresh(0).await;

    let active = store.active().await;
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].id, "a");

    // The durable active record serializes to a list containing only "a".
    let cached = cache.get_partition(Partition::Active).await;
    assert_eq!(cached.len(), 1);
    assert_eq!(cached[0].id, "a");

    // A fresh store over the same backing storage sees the reconciled state.
    let restarted = ArticleStore::new(cache.clone());
    restarted.load_starting_data().await;
    assert_eq!(restarted.active().await.len(), 1);
    assert_eq!(restarted.deleted().await.len(), 1);
}
