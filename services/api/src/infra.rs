use chrono::NaiveDate;
use hireboard::pipeline::{Job, JobId, JobRepository, RepositoryError};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryJobRepository {
    jobs: Arc<Mutex<HashMap<JobId, Job>>>,
}

impl JobRepository for InMemoryJobRepository {
    fn insert(&self, job: Job) -> Result<Job, RepositoryError> {
        let mut guard = self.jobs.lock().expect("repository mutex poisoned");
        if guard.contains_key(&job.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(job.id.clone(), job.clone());
        Ok(job)
    }

    fn update(&self, job: Job) -> Result<(), RepositoryError> {
        let mut guard = self.jobs.lock().expect("repository mutex poisoned");
        if guard.contains_key(&job.id) {
            guard.insert(job.id.clone(), job);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn fetch(&self, id: &JobId) -> Result<Option<Job>, RepositoryError> {
        let guard = self.jobs.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn list(&self) -> Result<Vec<Job>, RepositoryError> {
        let guard = self.jobs.lock().expect("repository mutex poisoned");
        let mut jobs: Vec<Job> = guard.values().cloned().collect();
        jobs.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(jobs)
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn deserialize_optional_date<'de, D>(
    deserializer: D,
) -> Result<Option<NaiveDate>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    opt.map(|value| parse_date(&value).map_err(serde::de::Error::custom))
        .transpose()
}
