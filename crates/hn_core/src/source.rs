use async_trait::async_trait;
use crate::types::Article;
use crate::Result;

/// Remote article feed, paginated, newest-first. The engine relies on the
/// ordering and never re-sorts results locally.
#[async_trait]
pub trait ArticleSource: Send + Sync {
    /// Fetch one page of the feed.
    async fn fetch_page(&self, page: u32) -> Result<Vec<Article>>;
}
