//! Host-side control of atlas jobs.
//!
//! The worker runs at most one job at a time. A start request that arrives
//! while a job is running is rejected; it neither queues nor preempts.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::Serialize;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use super::geometry::AtlasGeometry;
use super::job::{AtlasJob, AtlasResult, CancelToken, JobEvent, JobOutcome};
use crate::error::{IsothermError, Result};
use crate::grid::GridSeries;
use crate::render::RenderOptions;

/// Capacity of the event fan-out; slow subscribers miss the oldest events
const EVENT_CAPACITY: usize = 1024;

/// Snapshot of the worker's job state
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum JobStatus {
    Idle,
    Running {
        job_id: String,
        started_at: DateTime<Utc>,
        done: usize,
        total: usize,
    },
    Completed {
        job_id: String,
        started_at: DateTime<Utc>,
        finished_at: DateTime<Utc>,
        geometry: AtlasGeometry,
    },
    Cancelled {
        job_id: String,
        started_at: DateTime<Utc>,
        done: usize,
        total: usize,
    },
    Failed {
        job_id: String,
        started_at: DateTime<Utc>,
        message: String,
    },
}

impl JobStatus {
    pub fn is_running(&self) -> bool {
        matches!(self, JobStatus::Running { .. })
    }
}

#[derive(Debug)]
struct WorkerInner {
    status: JobStatus,
    running: Option<(String, CancelToken)>,
    result: Option<AtlasResult>,
}

/// Runs atlas jobs on the tokio runtime and tracks the latest one.
#[derive(Debug, Clone)]
pub struct AtlasWorker {
    inner: Arc<Mutex<WorkerInner>>,
    events: broadcast::Sender<JobEvent>,
}

impl Default for AtlasWorker {
    fn default() -> Self {
        Self::new()
    }
}

impl AtlasWorker {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            inner: Arc::new(Mutex::new(WorkerInner {
                status: JobStatus::Idle,
                running: None,
                result: None,
            })),
            events,
        }
    }

    /// Start a job over all days of `grid`. Must be called inside a tokio
    /// runtime. Returns the job id.
    pub fn start(&self, grid: Arc<GridSeries>, options: &RenderOptions) -> Result<String> {
        let num_days = grid.num_days();
        let job = AtlasJob::new(grid, num_days, options)?;
        self.launch(job)
    }

    fn launch(&self, job: AtlasJob) -> Result<String> {
        let job_id = job.id().to_string();
        let total = job.geometry().num_days as usize;
        let (started_at, token) = self.claim(&job_id, total)?;

        info!(job_id = %job_id, num_days = total, "Atlas job started");

        let sink = Arc::clone(&self.inner);
        let events = self.events.clone();
        let sink_id = job_id.clone();
        let handle = tokio::spawn(job.run(token, move |event| {
            apply_event(&mut sink.lock(), &sink_id, started_at, &event);
            // No subscribers is fine
            let _ = events.send(event);
        }));
        self.supervise(job_id.clone(), started_at, total, handle);

        Ok(job_id)
    }

    /// Mark `job_id` as the running job, unless another one is running.
    fn claim(&self, job_id: &str, total: usize) -> Result<(DateTime<Utc>, CancelToken)> {
        let mut guard = self.inner.lock();
        if let JobStatus::Running { job_id: running, .. } = &guard.status {
            return Err(IsothermError::JobAlreadyRunning {
                job_id: running.clone(),
            });
        }

        let started_at = Utc::now();
        let token = CancelToken::new();
        guard.status = JobStatus::Running {
            job_id: job_id.to_string(),
            started_at,
            done: 0,
            total,
        };
        guard.running = Some((job_id.to_string(), token.clone()));
        guard.result = None;
        Ok((started_at, token))
    }

    /// Wait for the job task and settle the final state. A job that panics
    /// is reported as failed.
    fn supervise(
        &self,
        job_id: String,
        started_at: DateTime<Utc>,
        total: usize,
        handle: JoinHandle<Result<JobOutcome>>,
    ) {
        let inner = Arc::clone(&self.inner);
        let events = self.events.clone();
        tokio::spawn(async move {
            let joined = handle.await;

            let mut guard = inner.lock();
            match joined {
                Ok(Ok(JobOutcome::Cancelled { done })) => {
                    guard.status = JobStatus::Cancelled {
                        job_id: job_id.clone(),
                        started_at,
                        done,
                        total,
                    };
                }
                // Completion and errors arrive as events
                Ok(Ok(JobOutcome::Completed(_))) | Ok(Err(_)) => {}
                Err(join_error) => {
                    error!(job_id = %job_id, error = %join_error, "Atlas job aborted");
                    let message = format!("atlas job aborted: {}", join_error);
                    guard.status = JobStatus::Failed {
                        job_id: job_id.clone(),
                        started_at,
                        message: message.clone(),
                    };
                    let _ = events.send(JobEvent::Failed { message });
                }
            }
            if matches!(&guard.running, Some((running_id, _)) if *running_id == job_id) {
                guard.running = None;
            }
        });
    }

    /// Signal the running job to stop at its next day boundary.
    /// Returns `false` when no job is running.
    pub fn cancel(&self) -> bool {
        let guard = self.inner.lock();
        match &guard.running {
            Some((job_id, token)) if guard.status.is_running() => {
                info!(job_id = %job_id, "Atlas job cancellation requested");
                token.cancel();
                true
            }
            _ => {
                warn!("Cancel requested with no running atlas job");
                false
            }
        }
    }

    pub fn status(&self) -> JobStatus {
        self.inner.lock().status.clone()
    }

    /// The last completed atlas, if it has not been taken.
    pub fn result(&self) -> Option<AtlasResult> {
        self.inner.lock().result.clone()
    }

    /// Hand out the completed atlas and return the worker to idle.
    pub fn take_result(&self) -> Option<AtlasResult> {
        let mut guard = self.inner.lock();
        let result = guard.result.take();
        if result.is_some() {
            guard.status = JobStatus::Idle;
        }
        result
    }

    /// Receive job events as they happen.
    pub fn subscribe(&self) -> broadcast::Receiver<JobEvent> {
        self.events.subscribe()
    }
}

fn apply_event(
    inner: &mut WorkerInner,
    job_id: &str,
    started_at: DateTime<Utc>,
    event: &JobEvent,
) {
    match event {
        JobEvent::Progress { done: d, .. } => {
            if let JobStatus::Running { done, .. } = &mut inner.status {
                *done = *d;
            }
        }
        JobEvent::Completed(result) => {
            inner.status = JobStatus::Completed {
                job_id: job_id.to_string(),
                started_at,
                finished_at: Utc::now(),
                geometry: result.geometry,
            };
            inner.result = Some(result.clone());
        }
        JobEvent::Failed { message } => {
            inner.status = JobStatus::Failed {
                job_id: job_id.to_string(),
                started_at,
                message: message.clone(),
            };
        }
    }
}
