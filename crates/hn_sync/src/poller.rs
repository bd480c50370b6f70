use chrono::{DateTime, Utc};
use hn_core::{Article, ArticleSource, Notifier, PermissionStatus};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::notify;
use crate::settings::NotificationSettings;

pub const POLL_INTERVAL: Duration = Duration::from_secs(60);

/// Change-detection poller. Idle until the first successful fetch seeds the
/// in-memory high-water-mark (no notifications on the seeding tick), then
/// tracking: each tick compares page 0 against the mark and delivers one
/// notification per filter-matching new item.
///
/// The mark lives only in this struct for the process lifetime; the
/// headless background check keeps its own persisted mark because the two
/// cannot share process memory.
pub struct ChangePoller {
    source: Arc<dyn ArticleSource>,
    notifier: Arc<dyn Notifier>,
    settings: NotificationSettings,
    last_created_at: Option<DateTime<Utc>>,
}

impl ChangePoller {
    pub fn new(
        source: Arc<dyn ArticleSource>,
        notifier: Arc<dyn Notifier>,
        settings: NotificationSettings,
    ) -> Self {
        Self {
            source,
            notifier,
            settings,
            last_created_at: None,
        }
    }

    pub fn high_water_mark(&self) -> Option<DateTime<Utc>> {
        self.last_created_at
    }

    /// One poll cycle. Failures and empty results are skipped silently and
    /// retried on the next tick.
    pub async fn tick(&mut self) {
        if !self.settings.app_enabled().await {
            // Disabled is a gate, not an error: nudge for permission and
            // skip the fetch.
            self.settings.ask_permission().await;
            return;
        }
        if self.settings.permission_status().await != PermissionStatus::Granted {
            // Denied or undetermined OS permission disables delivery;
            // article sync outside the poller keeps running.
            self.settings.ask_permission().await;
            return;
        }

        let hits = match self.source.fetch_page(0).await {
            Ok(hits) => hits,
            Err(e) => {
                warn!("Error fetching HN articles: {}", e);
                return;
            }
        };

        // Remote results are newest-first; the first hit carries the newest
        // timestamp.
        let Some(newest) = hits.first().map(|a| a.created_at) else {
            return;
        };

        let Some(last_seen) = self.last_created_at else {
            debug!("Seeding high-water-mark at {}", newest);
            self.last_created_at = Some(newest);
            return;
        };

        let fresh: Vec<&Article> = hits
            .iter()
            .filter(|a| a.created_at > last_seen)
            .collect();
        if fresh.is_empty() {
            return;
        }

        // The mark advances whenever strictly-newer items arrived, even if
        // none of them pass the keyword filters.
        self.last_created_at = Some(newest);

        let filters = self.settings.filters().await;
        for article in fresh.into_iter().filter(|a| notify::matches(a, &filters)) {
            if let Err(e) = self.notifier.deliver(&notify::payload_for(article)).await {
                warn!("Notification delivery failed for {}: {}", article.id, e);
            }
        }
    }

    /// Run the poller on a repeating timer: one immediate tick, then one
    /// every `POLL_INTERVAL`. The returned handle cancels the timer task on
    /// shutdown or drop; a tick in flight is cancelled at its next await
    /// point and its partial results discarded.
    pub fn spawn(mut self) -> PollerHandle {
        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval(POLL_INTERVAL);
            loop {
                interval.tick().await;
                self.tick().await;
            }
        });
        PollerHandle { task }
    }
}

pub struct PollerHandle {
    task: JoinHandle<()>,
}

impl PollerHandle {
    /// Cancel the repeating timer. Idempotent; aborting an already-finished
    /// task is a no-op.
    pub fn shutdown(&self) {
        self.task.abort();
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}
