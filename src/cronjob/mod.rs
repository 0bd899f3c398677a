//! Client for the external cron scheduler that triggers dispatches.
//!
//! Only job deletion is needed here; jobs are created by whatever creates the reminder.

use backon::{ExponentialBuilder, Retryable};
use reminder_relay_schema::DeleteJobResponse;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

use crate::config::SchedulerConfig;
use crate::error::{IsRetryable, RelayError};

const BODY_PREVIEW_CHARS: usize = 512;

/// Result of a best-effort job cleanup. Call sites discard it; it exists so the non-fatal
/// contract is visible where the cleanup is attempted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CleanupOutcome {
    Deleted,
    /// No scheduler credential configured.
    Skipped,
    Failed(String),
}

#[derive(Clone)]
pub struct CronJobClient {
    client: reqwest::Client,
    api_base: Url,
    api_key: Option<String>,
    retry_policy: ExponentialBuilder,
}

impl CronJobClient {
    pub fn new(cfg: &SchedulerConfig, client: reqwest::Client) -> Self {
        let retry_policy = ExponentialBuilder::default()
            .with_min_delay(Duration::from_millis(100))
            .with_max_delay(Duration::from_millis(500))
            .with_max_times(cfg.retry_max_times)
            .with_jitter();

        Self {
            client,
            api_base: cfg.api_base.clone(),
            api_key: cfg.api_key.clone(),
            retry_policy,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// `{api_base}/jobs/{job_id}`; the id is pushed as a single, encoded path segment.
    pub fn job_url(&self, job_id: &str) -> Result<Url, RelayError> {
        let mut url = self.api_base.clone();
        url.path_segments_mut()
            .map_err(|()| {
                RelayError::UnexpectedError(format!(
                    "scheduler api_base cannot be a base URL: {}",
                    self.api_base
                ))
            })?
            .pop_if_empty()
            .push("jobs")
            .push(job_id);
        Ok(url)
    }

    pub fn build_delete_request(
        &self,
        job_id: &str,
        api_key: &str,
    ) -> Result<reqwest::Request, RelayError> {
        let url = self.job_url(job_id)?;
        Ok(self.client.delete(url).bearer_auth(api_key).build()?)
    }

    /// Deletes a job, retrying transport errors, 429 and 5xx.
    ///
    /// Succeeds only on a 2xx whose body is `{"success": true, ...}`.
    pub async fn delete_job(&self, job_id: &str) -> Result<(), RelayError> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(RelayError::UnexpectedError(
                "scheduler api_key is not configured".to_string(),
            ));
        };

        (|| async { self.delete_job_once(job_id, api_key).await })
            .retry(self.retry_policy)
            .when(|e: &RelayError| e.is_retryable())
            .notify(|err: &RelayError, dur: Duration| {
                debug!(job_id, error = %err, retry_in = ?dur, "Cron job delete failed (will retry)");
            })
            .await
    }

    async fn delete_job_once(&self, job_id: &str, api_key: &str) -> Result<(), RelayError> {
        let req = self.build_delete_request(job_id, api_key)?;
        let resp = self.client.execute(req).await?;
        let status = resp.status();
        let text = resp.text().await?;

        if !status.is_success() {
            warn!(
                job_id,
                %status,
                body = %format!("{:.len$}", text, len = BODY_PREVIEW_CHARS),
                "Cron job delete returned non-success status"
            );
            return Err(RelayError::UpstreamStatus(status));
        }

        let parsed: DeleteJobResponse = serde_json::from_str(&text)?;
        if !parsed.success {
            return Err(RelayError::UpstreamRejected(
                parsed.error.unwrap_or_else(|| "Unknown error".to_string()),
            ));
        }
        Ok(())
    }

    /// Attempts the deletion and logs the result; never propagates a failure.
    pub async fn delete_job_best_effort(&self, job_id: &str) -> CleanupOutcome {
        if !self.is_configured() {
            warn!(job_id, "Cron job cleanup skipped: scheduler api_key not configured");
            return CleanupOutcome::Skipped;
        }

        match self.delete_job(job_id).await {
            Ok(()) => {
                info!(job_id, "Cron job deleted");
                CleanupOutcome::Deleted
            }
            Err(e) => {
                warn!(job_id, error = %e, "Cron job cleanup failed");
                CleanupOutcome::Failed(e.to_string())
            }
        }
    }
}
