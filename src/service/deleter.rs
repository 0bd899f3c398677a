use std::sync::Arc;
use tracing::{error, info};

use crate::cronjob::CronJobClient;
use crate::db::ReminderStore;
use crate::error::RelayError;

/// Removes a reminder row and, best-effort, its scheduler job.
///
/// The row store is authoritative: once the row is gone the operation succeeds, whatever the
/// scheduler answers.
pub struct ReminderDeleter {
    store: Arc<dyn ReminderStore>,
    cron: CronJobClient,
}

impl ReminderDeleter {
    pub fn new(store: Arc<dyn ReminderStore>, cron: CronJobClient) -> Self {
        Self { store, cron }
    }

    pub async fn delete(
        &self,
        reminder_id: &str,
        cron_job_id: Option<&str>,
    ) -> Result<(), RelayError> {
        let rows = self.store.delete(reminder_id).await.inspect_err(|e| {
            error!(reminder_id, error = %e, "Failed to delete reminder");
        })?;
        info!(reminder_id, rows, cron_job_id = ?cron_job_id, "Reminder deleted");

        if let Some(job_id) = cron_job_id {
            let _cleanup = self.cron.delete_job_best_effort(job_id).await;
        }

        Ok(())
    }
}
