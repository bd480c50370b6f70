use async_trait::async_trait;
use hn_core::{Article, ArticleSource, Connectivity, Partition, Result, SearchResponse};
use hn_storage::ArticleCache;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

use crate::store::ArticleStore;

/// Fixed search term; the feed is scoped to mobile-related items.
pub const SEARCH_QUERY: &str = "mobile";

const DEFAULT_BASE_URL: &str = "https://hn.algolia.com/api/v1";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const PROBE_TIMEOUT: Duration = Duration::from_secs(3);

/// HN Algolia `search_by_date` client.
pub struct HnClient {
    client: reqwest::Client,
    base_url: String,
}

impl HnClient {
    pub fn new() -> Result<Self> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }
}

#[async_trait]
impl ArticleSource for HnClient {
    async fn fetch_page(&self, page: u32) -> Result<Vec<Article>> {
        let url = format!(
            "{}/search_by_date?query={}&page={}",
            self.base_url, SEARCH_QUERY, page
        );
        let response = self.client.get(&url).send().await?.error_for_status()?;
        let body: SearchResponse = response.json().await?;
        Ok(body.hits)
    }
}

/// Reachability probe against the API host.
pub struct OnlineCheck {
    client: reqwest::Client,
    url: String,
}

impl OnlineCheck {
    pub fn new() -> Result<Self> {
        Self::with_url(DEFAULT_BASE_URL)
    }

    pub fn with_url(url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(PROBE_TIMEOUT).build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl Connectivity for OnlineCheck {
    async fn is_connected(&self) -> bool {
        self.client.head(&self.url).send().await.is_ok()
    }
}

/// Remote fetch and reconciliation: replaces the Active partition with the
/// latest page, minus anything the user already deleted. Offline is an
/// expected condition and falls back to the cached Active partition; fetch
/// failures leave the last-known state untouched.
pub struct Refresher {
    source: Arc<dyn ArticleSource>,
    connectivity: Arc<dyn Connectivity>,
    store: ArticleStore,
    cache: ArticleCache,
}

impl Refresher {
    pub fn new(
        source: Arc<dyn ArticleSource>,
        connectivity: Arc<dyn Connectivity>,
        store: ArticleStore,
        cache: ArticleCache,
    ) -> Self {
        Self {
            source,
            connectivity,
            store,
            cache,
        }
    }

    pub async fn refresh(&self, page: u32) {
        if !self.connectivity.is_connected().await {
            let cached = self.cache.get_partition(Partition::Active).await;
            info!("Offline, loaded {} articles from cache", cached.len());
            self.store.set_active_local(cached).await;
            return;
        }

        let hits = match self.source.fetch_page(page).await {
            Ok(hits) => hits,
            Err(e) => {
                error!("Error fetching articles: {}", e);
                return;
            }
        };

        let deleted = self.store.deleted().await;
        let revised: Vec<Article> = hits
            .into_iter()
            .filter(|article| !deleted.iter().any(|d| d.id == article.id))
            .collect();
        self.store.set_active(revised).await;
    }
}
