//! Scheduler for periodic maintenance tasks.
//!
//! This module provides a cron-based job scheduler running background jobs against the shared
//! application state. Its single job releases payment authorizations for appointments whose
//! PIN expired without the session being validated.

use std::sync::Arc;

use tokio_cron_scheduler::{Job, JobScheduler};

use crate::server::{error::Error, model::app::AppState};

pub mod config;
pub mod expiry;

use self::{config::booking::EXPIRY_CRON_EXPRESSION, expiry::expire_stale_authorizations};

/// Job scheduler for background maintenance tasks.
pub struct Scheduler {
    state: AppState,
    sched: JobScheduler,
}

impl Scheduler {
    /// Creates a new instance of [`Scheduler`].
    ///
    /// # Returns
    /// - `Ok(Scheduler)` - Successfully created scheduler instance
    /// - `Err(Error)` - Failed to initialize the underlying job scheduler
    pub async fn new(state: AppState) -> Result<Self, Error> {
        let sched = JobScheduler::new().await?;
        Ok(Self { state, sched })
    }

    /// Registers all scheduled jobs and starts the scheduler.
    ///
    /// Once started, jobs run according to their cron expressions until the process exits.
    pub async fn start(mut self) -> Result<(), Error> {
        self.schedule_job(
            EXPIRY_CRON_EXPRESSION,
            "expired authorization",
            expire_stale_authorizations,
        )
        .await?;

        self.sched.start().await?;

        Ok(())
    }

    /// Schedules a recurring job with the specified cron expression.
    ///
    /// The job receives a clone of the application state on every run and logs the number of
    /// records it processed, or the error that stopped it.
    ///
    /// # Arguments
    /// - `cron` - Six-field cron expression, seconds first (e.g. "0 0 * * * *" for hourly)
    /// - `name` - Human-readable name for the job (used in log messages)
    /// - `function` - Async job body returning the number of records it processed
    ///
    /// # Returns
    /// - `Ok(())` - Job successfully registered with the scheduler
    /// - `Err(Error)` - Invalid cron expression or scheduler error
    pub async fn schedule_job<F, Fut>(
        &mut self,
        cron: &str,
        name: &str,
        function: F,
    ) -> Result<(), Error>
    where
        F: Fn(AppState) -> Fut + Send + Sync + 'static,
        Fut: std::future::Future<Output = Result<usize, Error>> + Send + 'static,
    {
        let state = self.state.clone();
        let name = name.to_string();
        let function = Arc::new(function);

        self.sched
            .add(Job::new_async(cron, move |_, _| {
                let state = state.clone();
                let name = name.clone();
                let function = Arc::clone(&function);

                Box::pin(async move {
                    match function(state).await {
                        Ok(count) => tracing::info!("Processed {} {} record(s)", count, name),
                        Err(e) => tracing::error!("Error running {} job: {:?}", name, e),
                    }
                })
            })?)
            .await?;

        Ok(())
    }
}
