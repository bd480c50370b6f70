use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One syndicated item from the HN search feed. Comment hits carry no
/// `title` of their own, only the parent `story_title`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    #[serde(rename = "objectID")]
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub story_title: Option<String>,
    #[serde(default)]
    pub story_url: Option<String>,
    #[serde(default)]
    pub author: String,
    pub created_at: DateTime<Utc>,
}

impl Article {
    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .or(self.story_title.as_deref())
            .unwrap_or("(untitled)")
    }
}

/// The three membership sets an article can belong to. Active and Deleted
/// are mutually exclusive; Favourite overlays either.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Partition {
    Active,
    Deleted,
    Favourite,
}

impl Partition {
    /// Durable record key for this partition's article list.
    pub fn cache_key(&self) -> &'static str {
        match self {
            Partition::Active => "cached_articles",
            Partition::Deleted => "cached_deleted_articles",
            Partition::Favourite => "cached_favourite_articles",
        }
    }
}

/// Body of the `search_by_date` response.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub hits: Vec<Article>,
}

/// What gets handed to the OS notification primitive. `url` is absent for
/// items without an external story link; tapping such a notification is a
/// no-op on the consumer side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationPayload {
    pub title: String,
    pub body: String,
    pub url: Option<String>,
}

/// OS-level notification permission, surfaced as a value rather than an
/// error so the settings layer can render it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionStatus {
    Granted,
    Denied,
    Undetermined,
}
