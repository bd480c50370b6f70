use hn_core::{Notifier, PermissionStatus};
use hn_storage::ArticleCache;
use std::sync::Arc;
use tracing::warn;

/// Keyword suggestions surfaced in the settings UI.
pub const SUGGESTED_FILTERS: &[&str] = &[
    "android",
    "ios",
    "iphone",
    "ipad",
    "swift",
    "kotlin",
    "react native",
    "mobile",
];

/// Application-level notification settings: the enabled flag and the
/// keyword filter list, both cache-backed, plus the OS permission surface.
/// A denied permission disables delivery but never stops article sync.
#[derive(Clone)]
pub struct NotificationSettings {
    cache: ArticleCache,
    notifier: Arc<dyn Notifier>,
}

impl NotificationSettings {
    pub fn new(cache: ArticleCache, notifier: Arc<dyn Notifier>) -> Self {
        Self { cache, notifier }
    }

    pub async fn app_enabled(&self) -> bool {
        self.cache.notifications_enabled().await
    }

    pub async fn set_app_enabled(&self, enabled: bool) {
        self.cache.set_notifications_enabled(enabled).await;
    }

    pub async fn filters(&self) -> Vec<String> {
        self.cache.filters().await
    }

    /// Store a normalized filter set: trimmed, lowercased, de-duplicated,
    /// empties dropped.
    pub async fn set_filters(&self, filters: Vec<String>) {
        let mut normalized: Vec<String> = Vec::new();
        for filter in filters {
            let keyword = filter.trim().to_lowercase();
            if !keyword.is_empty() && !normalized.contains(&keyword) {
                normalized.push(keyword);
            }
        }
        self.cache.set_filters(&normalized).await;
    }

    pub async fn permission_status(&self) -> PermissionStatus {
        match self.notifier.permission_status().await {
            Ok(status) => status,
            Err(e) => {
                warn!("Error reading notification permission: {}", e);
                PermissionStatus::Undetermined
            }
        }
    }

    pub async fn ask_permission(&self) -> PermissionStatus {
        match self.notifier.request_permission().await {
            Ok(status) => status,
            Err(e) => {
                warn!("Error requesting notification permission: {}", e);
                PermissionStatus::Undetermined
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use hn_core::{NotificationPayload, Result};
    use hn_storage::MemoryStore;

    struct GrantingNotifier;

    #[async_trait]
    impl Notifier for GrantingNotifier {
        async fn deliver(&self, _payload: &NotificationPayload) -> Result<()> {
            Ok(())
        }

        async fn permission_status(&self) -> Result<PermissionStatus> {
            Ok(PermissionStatus::Granted)
        }

        async fn request_permission(&self) -> Result<PermissionStatus> {
            Ok(PermissionStatus::Granted)
        }
    }

    fn settings() -> NotificationSettings {
        NotificationSettings::new(
            ArticleCache::new(Arc::new(MemoryStore::new())),
            Arc::new(GrantingNotifier),
        )
    }

    #[tokio::test]
    async fn filters_are_normalized_on_write() {
        let settings = settings();
        settings
            .set_filters(vec![
                "  Android ".to_string(),
                "IOS".to_string(),
                "android".to_string(),
                "".to_string(),
            ])
            .await;

        assert_eq!(
            settings.filters().await,
            vec!["android".to_string(), "ios".to_string()]
        );
    }

    #[tokio::test]
    async fn enabled_flag_round_trips() {
        let settings = settings();
        assert!(settings.app_enabled().await);
        settings.set_app_enabled(false).await;
        assert!(!settings.app_enabled().await);
    }

    #[tokio::test]
    async fn permission_is_surfaced_as_a_value() {
        let settings = settings();
        assert_eq!(settings.permission_status().await, PermissionStatus::Granted);
        assert_eq!(settings.ask_permission().await, PermissionStatus::Granted);
    }
}
