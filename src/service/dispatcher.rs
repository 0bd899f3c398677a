use chrono_tz::Tz;
use reminder_relay_schema::ChannelOutcome;
use std::sync::Arc;
use tracing::{error, info};

use crate::channels::{ChannelSet, reminder_text};
use crate::cronjob::CronJobClient;
use crate::db::ReminderStore;
use crate::error::RelayError;

#[derive(Debug, Clone)]
pub struct DispatchReport {
    pub notifications: Vec<ChannelOutcome>,
}

/// Delivers one pending reminder to every configured channel.
///
/// The reminder is claimed (flipped to sent) before any channel is contacted, so a reminder is
/// attempted at most once even when the scheduler fires twice; channel failures are reported in
/// the outcome list and never roll the claim back.
pub struct NotificationDispatcher {
    store: Arc<dyn ReminderStore>,
    channels: Arc<ChannelSet>,
    cron: CronJobClient,
    display_timezone: Tz,
}

impl NotificationDispatcher {
    pub fn new(
        store: Arc<dyn ReminderStore>,
        channels: Arc<ChannelSet>,
        cron: CronJobClient,
        display_timezone: Tz,
    ) -> Self {
        Self {
            store,
            channels,
            cron,
            display_timezone,
        }
    }

    pub async fn dispatch(&self, reminder_id: &str) -> Result<DispatchReport, RelayError> {
        let reminder = match self.store.claim_pending(reminder_id).await {
            Ok(Some(reminder)) => reminder,
            Ok(None) => return Err(RelayError::NotFound(reminder_id.to_string())),
            Err(e) => {
                error!(reminder_id, error = %e, "Failed to claim reminder");
                return Err(e);
            }
        };

        let text = reminder_text(&reminder, self.display_timezone);
        let notifications = self.channels.deliver_all(&text).await;

        info!(
            reminder_id,
            attempted = notifications.len(),
            delivered = notifications.iter().filter(|o| o.success).count(),
            "Reminder dispatched"
        );

        match reminder.cron_job_id.as_deref() {
            Some(job_id) if self.cron.is_configured() => {
                let _cleanup = self.cron.delete_job_best_effort(job_id).await;
            }
            _ => {}
        }

        Ok(DispatchReport { notifications })
    }
}
