use async_trait::async_trait;

use super::actor::DbActorHandle;
use super::models::{DbReminder, ReminderCreate};
use crate::error::RelayError;

/// Row store the dispatcher and deleter run against.
#[async_trait]
pub trait ReminderStore: Send + Sync {
    /// Atomically flips a pending reminder to sent and returns it.
    ///
    /// `Ok(None)` when the id is unknown or the reminder was already sent; concurrent callers
    /// for the same id get `Some` at most once.
    async fn claim_pending(&self, id: &str) -> Result<Option<DbReminder>, RelayError>;

    /// Deletes the row and returns the number of rows removed (0 for unknown ids).
    async fn delete(&self, id: &str) -> Result<u64, RelayError>;

    async fn get(&self, id: &str) -> Result<Option<DbReminder>, RelayError>;

    async fn insert(&self, create: ReminderCreate) -> Result<String, RelayError>;
}

#[async_trait]
impl ReminderStore for DbActorHandle {
    async fn claim_pending(&self, id: &str) -> Result<Option<DbReminder>, RelayError> {
        DbActorHandle::claim_pending(self, id).await
    }

    async fn delete(&self, id: &str) -> Result<u64, RelayError> {
        DbActorHandle::delete(self, id).await
    }

    async fn get(&self, id: &str) -> Result<Option<DbReminder>, RelayError> {
        DbActorHandle::get(self, id).await
    }

    async fn insert(&self, create: ReminderCreate) -> Result<String, RelayError> {
        DbActorHandle::insert(self, create).await
    }
}
