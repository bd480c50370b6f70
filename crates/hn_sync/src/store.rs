use hn_core::{Article, Partition};
use hn_storage::ArticleCache;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

#[derive(Default)]
struct Partitions {
    active: Vec<Article>,
    deleted: Vec<Article>,
    favourites: Vec<Article>,
}

/// In-memory source of truth for the three article partitions, with
/// write-through to the durable cache on every mutation. Clone-shareable;
/// clones observe the same partitions.
///
/// An id lives in at most one of Active/Deleted at a time. Favourite is an
/// independent overlay and never moves articles between the other two.
#[derive(Clone)]
pub struct ArticleStore {
    partitions: Arc<RwLock<Partitions>>,
    cache: ArticleCache,
}

impl ArticleStore {
    pub fn new(cache: ArticleCache) -> Self {
        Self {
            partitions: Arc::new(RwLock::new(Partitions::default())),
            cache,
        }
    }

    /// Populate all three partitions from the durable cache at startup.
    pub async fn load_starting_data(&self) {
        let active = self.cache.get_partition(Partition::Active).await;
        let deleted = self.cache.get_partition(Partition::Deleted).await;
        let favourites = self.cache.get_partition(Partition::Favourite).await;

        let mut parts = self.partitions.write().await;
        info!(
            "Starting data loaded from cache: {} active, {} deleted, {} favourite",
            active.len(),
            deleted.len(),
            favourites.len()
        );
        parts.active = active;
        parts.deleted = deleted;
        parts.favourites = favourites;
    }

    pub async fn active(&self) -> Vec<Article> {
        self.partitions.read().await.active.clone()
    }

    pub async fn deleted(&self) -> Vec<Article> {
        self.partitions.read().await.deleted.clone()
    }

    pub async fn favourites(&self) -> Vec<Article> {
        self.partitions.read().await.favourites.clone()
    }

    pub async fn set_active(&self, articles: Vec<Article>) {
        {
            let mut parts = self.partitions.write().await;
            parts.active = articles.clone();
        }
        self.cache.replace_partition(Partition::Active, &articles).await;
    }

    /// Replace the Active partition in memory only. Used when the new
    /// contents came straight from the cache, so re-writing them would be
    /// redundant.
    pub async fn set_active_local(&self, articles: Vec<Article>) {
        self.partitions.write().await.active = articles;
    }

    pub async fn set_deleted(&self, articles: Vec<Article>) {
        {
            let mut parts = self.partitions.write().await;
            parts.deleted = articles.clone();
        }
        self.cache.replace_partition(Partition::Deleted, &articles).await;
    }

    pub async fn set_favourites(&self, articles: Vec<Article>) {
        {
            let mut parts = self.partitions.write().await;
            parts.favourites = articles.clone();
        }
        self.cache.replace_partition(Partition::Favourite, &articles).await;
    }

    /// Move an article from Active to Deleted. No-op when the id is not in
    /// Active.
    pub async fn delete(&self, id: &str) {
        let moved = {
            let mut parts = self.partitions.write().await;
            match parts.active.iter().position(|a| a.id == id) {
                Some(index) => {
                    let article = parts.active.remove(index);
                    parts.deleted.push(article.clone());
                    Some((article, parts.active.clone()))
                }
                None => None,
            }
        };
        let Some((article, remaining_active)) = moved else {
            return;
        };
        self.cache.append(Partition::Deleted, &article).await;
        self.cache
            .replace_partition(Partition::Active, &remaining_active)
            .await;
    }

    /// Move an article from Deleted back to Active. Inverse of `delete`;
    /// no-op when the id is not in Deleted.
    pub async fn restore(&self, id: &str) {
        let moved = {
            let mut parts = self.partitions.write().await;
            match parts.deleted.iter().position(|a| a.id == id) {
                Some(index) => {
                    let article = parts.deleted.remove(index);
                    parts.active.push(article.clone());
                    Some((article, parts.active.clone()))
                }
                None => None,
            }
        };
        let Some((_, active)) = moved else {
            return;
        };
        self.cache.remove_by_id(Partition::Deleted, id).await;
        self.cache.replace_partition(Partition::Active, &active).await;
    }

    /// Add an Active article to Favourites. Idempotent; a second call with
    /// the same id is a silent no-op.
    pub async fn add_favourite(&self, id: &str) {
        let added = {
            let mut parts = self.partitions.write().await;
            if parts.favourites.iter().any(|a| a.id == id) {
                None
            } else if let Some(article) = parts.active.iter().find(|a| a.id == id).cloned() {
                parts.favourites.push(article.clone());
                Some(article)
            } else {
                None
            }
        };
        if let Some(article) = added {
            self.cache.append(Partition::Favourite, &article).await;
        }
    }

    /// Drop an article from Favourites regardless of its Active/Deleted
    /// membership.
    pub async fn remove_favourite(&self, id: &str) {
        self.partitions.write().await.favourites.retain(|a| a.id != id);
        self.cache.remove_by_id(Partition::Favourite, id).await;
    }

    pub async fn clear_deleted(&self) {
        self.partitions.write().await.deleted.clear();
        self.cache.clear(Partition::Deleted).await;
    }

    pub async fn clear_favourites(&self) {
        self.partitions.write().await.favourites.clear();
        self.cache.clear(Partition::Favourite).await;
    }

    /// Prepend a freshly observed article to Active without a full refetch.
    pub async fn add_new(&self, article: Article) {
        let active = {
            let mut parts = self.partitions.write().await;
            parts.active.insert(0, article);
            parts.active.clone()
        };
        self.cache.replace_partition(Partition::Active, &active).await;
    }
}
