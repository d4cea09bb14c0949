use k8s_openapi::api::batch::v1::CronJob;
use serde::Serialize;

use crate::utils::format_time;

/// Status summary of the `cronjob` kubernetes resource.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CronJobSummary {
    pub schedule: String,
    pub suspend: String,
    pub active_jobs: usize,
    pub last_schedule_at: String,
}

impl From<&CronJob> for CronJobSummary {
    fn from(cron_job: &CronJob) -> Self {
        let spec = cron_job.spec.as_ref();
        let status = cron_job.status.as_ref();
        Self {
            schedule: spec.map(|s| s.schedule.clone()).unwrap_or_default(),
            suspend: spec.and_then(|s| s.suspend).unwrap_or_default().to_string(),
            active_jobs: status.and_then(|s| s.active.as_ref()).map(Vec::len).unwrap_or_default(),
            last_schedule_at: format_time(status.and_then(|s| s.last_schedule_time.as_ref())),
        }
    }
}
