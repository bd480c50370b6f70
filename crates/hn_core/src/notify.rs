use async_trait::async_trait;
use crate::types::{NotificationPayload, PermissionStatus};
use crate::Result;

/// OS notification primitive plus its permission surface.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Present one notification. Failures are the caller's to log; they
    /// must not block the rest of a batch.
    async fn deliver(&self, payload: &NotificationPayload) -> Result<()>;

    async fn permission_status(&self) -> Result<PermissionStatus>;

    async fn request_permission(&self) -> Result<PermissionStatus>;
}

/// Network reachability probe.
#[async_trait]
pub trait Connectivity: Send + Sync {
    async fn is_connected(&self) -> bool;
}
