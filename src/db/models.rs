use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Delivery state of a reminder. Only `Pending -> Sent` is ever written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[repr(i32)]
pub enum ReminderStatus {
    Pending = 0,
    Sent = 1,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct DbReminder {
    pub id: String,
    pub title: String,
    pub content: String,
    pub remind_time: DateTime<Utc>,
    pub status: ReminderStatus,
    /// Job id on the external cron scheduler, if a trigger was registered.
    pub cron_job_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub sent_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReminderCreate {
    /// Generated (UUID v4) when absent.
    pub id: Option<String>,
    pub title: String,
    pub content: String,
    pub remind_time: DateTime<Utc>,
    pub cron_job_id: Option<String>,
}
