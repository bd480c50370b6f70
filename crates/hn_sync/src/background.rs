use hn_core::{Article, ArticleSource, Notifier, Result};
use hn_storage::ArticleCache;
use tracing::{info, warn};

use crate::notify;

/// One headless check, meant for an OS scheduler (minimum interval 15
/// minutes is the scheduler's contract, not enforced here).
///
/// Compares against the persisted last-seen timestamp rather than the
/// foreground poller's in-memory mark: the background task may run in a
/// separate process lifetime. Seeds silently on first run, and on newer
/// items delivers a single notification for the newest one only.
pub async fn run_background_check(
    source: &dyn ArticleSource,
    cache: &ArticleCache,
    notifier: &dyn Notifier,
) -> Result<()> {
    let hits = source.fetch_page(0).await?;
    let Some(newest) = hits.first().map(|a| a.created_at) else {
        return Ok(());
    };

    let Some(last_seen) = cache.last_seen().await else {
        cache.set_last_seen(newest).await;
        info!("Background check seeded last-seen at {}", newest);
        return Ok(());
    };

    let fresh: Vec<&Article> = hits
        .iter()
        .filter(|a| a.created_at > last_seen)
        .collect();
    if fresh.is_empty() {
        return Ok(());
    }

    cache.set_last_seen(newest).await;

    let first = fresh[0];
    if let Err(e) = notifier.deliver(&notify::payload_for(first)).await {
        warn!("Notification delivery failed for {}: {}", first.id, e);
    }
    Ok(())
}
