pub mod error;
pub mod notify;
pub mod source;
pub mod storage;
pub mod types;

pub use error::Error;
pub use notify::{Connectivity, Notifier};
pub use source::ArticleSource;
pub use storage::KeyValueStore;
pub use types::{Article, NotificationPayload, Partition, PermissionStatus, SearchResponse};

pub type Result<T> = std::result::Result<T, Error>;
