use std::sync::Arc;
use std::time::Duration;

use backon::{BackoffBuilder, ExponentialBuilder};

use crate::http::jobs;
use crate::http::jobs::list::ListJobsRequest;
use crate::http::jobs::{Job, JobStatus};
use crate::http::storage_client::StorageClient;
use crate::http::Error;

/// How the job client polls a running job.
#[derive(Clone, Debug)]
pub struct JobPollSetting {
    pub min_delay: Duration,
    pub max_delay: Duration,
    /// Polls after the first one before giving up.
    pub max_polls: usize,
}

impl Default for JobPollSetting {
    fn default() -> Self {
        Self {
            min_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(20),
            max_polls: 200,
        }
    }
}

impl JobPollSetting {
    fn backoff(&self) -> impl Iterator<Item = Duration> {
        ExponentialBuilder::default()
            .with_min_delay(self.min_delay)
            .with_max_delay(self.max_delay)
            .with_max_times(self.max_polls)
            .build()
    }
}

#[derive(Debug, Clone)]
pub struct StorageJobClient {
    inner: Arc<StorageClient>,
    polling: JobPollSetting,
}

impl StorageJobClient {
    pub fn new(inner: Arc<StorageClient>, polling: JobPollSetting) -> Self {
        Self { inner, polling }
    }

    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn list(&self, req: &ListJobsRequest) -> Result<Vec<Job>, Error> {
        let builder = jobs::list::build(self.inner.endpoint(), self.inner.http(), req);
        self.inner.send(builder).await
    }

    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn get(&self, job_id: &str) -> Result<Job, Error> {
        let builder = jobs::get::build(self.inner.endpoint(), self.inner.http(), job_id);
        self.inner.send(builder).await
    }

    pub async fn status(&self, job_id: &str) -> Result<JobStatus, Error> {
        Ok(self.get(job_id).await?.status)
    }

    /// Returns `true` when the job ended, successfully or not.
    pub async fn completed(&self, job_id: &str) -> Result<bool, Error> {
        Ok(self.status(job_id).await?.is_finished())
    }

    /// Polls the job until it ends and returns its final state.
    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn block_until_completed(&self, job_id: &str) -> Result<Job, Error> {
        let mut backoff = self.polling.backoff();
        loop {
            let job = self.get(job_id).await?;
            if job.status.is_finished() {
                tracing::debug!("job {} finished with {:?}", job_id, job.status);
                return Ok(job);
            }
            match backoff.next() {
                Some(delay) => {
                    tracing::debug!("job {} is {:?}, next poll in {:?}", job_id, job.status, delay);
                    tokio::time::sleep(delay).await;
                }
                None => return Err(Error::JobTimeout(job_id.to_string())),
            }
        }
    }

    /// Like [`block_until_completed`](Self::block_until_completed) but a job ending
    /// in `error` is returned as [`Error::JobFailed`].
    pub async fn block_for_success(&self, job_id: &str) -> Result<Job, Error> {
        let job = self.block_until_completed(job_id).await?;
        match job.status {
            JobStatus::Success => Ok(job),
            _ => Err(Error::JobFailed {
                message: job.error_message(),
                id: job.id,
            }),
        }
    }
}
