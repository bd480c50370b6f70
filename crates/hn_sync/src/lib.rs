pub mod background;
pub mod fetch;
pub mod notify;
pub mod poller;
pub mod settings;
pub mod store;

pub use fetch::{HnClient, OnlineCheck, Refresher};
pub use poller::{ChangePoller, PollerHandle, POLL_INTERVAL};
pub use settings::{NotificationSettings, SUGGESTED_FILTERS};
pub use store::ArticleStore;

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::{DateTime, TimeZone, Utc};
    use hn_core::Article;

    pub fn ts(minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, minute, 0).unwrap()
    }

    pub fn article(id: &str, title: &str, minute: u32) -> Article {
        Article {
            id: id.to_string(),
            title: Some(title.to_string()),
            story_title: None,
            story_url: None,
            author: "tester".to_string(),
            created_at: ts(minute),
        }
    }
}
