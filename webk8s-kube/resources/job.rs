use k8s_openapi::api::batch::v1::Job;
use serde::Serialize;

/// Status summary of the `job` kubernetes resource.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobSummary {
    pub active: i32,
    pub succeeded: i32,
    pub failed: i32,
    pub parallelism: i32,
    pub completions: i32,
}

impl From<&Job> for JobSummary {
    fn from(job: &Job) -> Self {
        let spec = job.spec.as_ref();
        let status = job.status.as_ref();
        Self {
            active: status.and_then(|s| s.active).unwrap_or_default(),
            succeeded: status.and_then(|s| s.succeeded).unwrap_or_default(),
            failed: status.and_then(|s| s.failed).unwrap_or_default(),
            parallelism: spec.and_then(|s| s.parallelism).unwrap_or(1),
            completions: spec.and_then(|s| s.completions).unwrap_or_default(),
        }
    }
}
