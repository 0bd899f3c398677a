use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::outcome::ChannelOutcome;

/// Body of the dispatch endpoint when called without a reminder id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeResponse {
    pub status: String,
    pub message: String,
}

impl ProbeResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            message: "Notification endpoint is working".to_string(),
        }
    }
}

/// Body of the dispatch endpoint for a processed (or failed) reminder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchResponse {
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    pub notifications: Vec<ChannelOutcome>,
}

/// Body of the delete endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Request body accepted by `DELETE /api/reminders/{id}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeleteReminderRequest {
    /// Scheduler job ids are numeric upstream but are stored and sent as strings by clients.
    #[serde(default, rename = "cronJobId", alias = "cron_job_id")]
    #[serde(deserialize_with = "deserialize_job_id_lax")]
    pub cron_job_id: Option<String>,
}

fn deserialize_job_id_lax<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Option::<Value>::deserialize(deserializer)?;

    match v {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => {
            let s = s.trim();
            Ok((!s.is_empty()).then(|| s.to_string()))
        }
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(_) => Err(serde::de::Error::custom(
            "expected a string or a number for cronJobId",
        )),
    }
}
