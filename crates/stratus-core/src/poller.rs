//! Long-running operation polling
//!
//! A mutating remote call hands back an [`OperationHandle`]. The
//! [`OperationPoller`] polls it until it reports a terminal status or the
//! governing deadline passes. The deadline wraps the whole loop, so it also
//! interrupts a sleep between polls or a poll that is still in flight. The
//! remote operation itself keeps running when the poller gives up.

use crate::error::RemoteError;
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;
use tokio::time::{Instant, sleep, timeout_at};

/// Status reported by one poll of an in-flight operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollStatus {
    Pending,
    Succeeded,
    Failed(RemoteError),
}

/// Handle on an asynchronous remote operation
#[async_trait]
pub trait OperationHandle: Send {
    /// Ask the remote for the current status
    ///
    /// `Err` is a failure to obtain the status at all, as opposed to the
    /// operation reporting [`PollStatus::Failed`].
    async fn poll(&mut self) -> Result<PollStatus, RemoteError>;

    /// Delay suggested by the remote before the next poll
    fn retry_after(&self) -> Option<Duration> {
        None
    }
}

/// Polling cadence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSettings {
    /// Delay between polls when the remote suggests none
    pub interval: Duration,

    /// Upper bound for any delay, including remote suggestions
    pub max_interval: Duration,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(10),
            max_interval: Duration::from_secs(60),
        }
    }
}

/// Outcome of an operation that reached success
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Completion {
    pub polls: u32,
    pub elapsed: Duration,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PollError {
    #[error("deadline exceeded after {polls} polls")]
    DeadlineExceeded { polls: u32 },

    #[error(transparent)]
    Remote(#[from] RemoteError),
}

/// Drives operation handles to a terminal status
#[derive(Debug, Clone, Default)]
pub struct OperationPoller {
    settings: PollSettings,
}

impl OperationPoller {
    pub fn new(settings: PollSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> PollSettings {
        self.settings
    }

    /// Poll `handle` until it succeeds, fails, or `deadline` passes
    pub async fn wait(
        &self,
        handle: &mut dyn OperationHandle,
        deadline: Instant,
    ) -> Result<Completion, PollError> {
        let started = Instant::now();
        let mut polls = 0;

        let outcome = timeout_at(deadline, self.poll_until_terminal(handle, &mut polls)).await;

        match outcome {
            Ok(Ok(())) => Ok(Completion {
                polls,
                elapsed: started.elapsed(),
            }),
            Ok(Err(e)) => Err(PollError::Remote(e)),
            Err(_) => {
                tracing::debug!("Gave up waiting on operation after {} polls", polls);
                Err(PollError::DeadlineExceeded { polls })
            }
        }
    }

    async fn poll_until_terminal(
        &self,
        handle: &mut dyn OperationHandle,
        polls: &mut u32,
    ) -> Result<(), RemoteError> {
        loop {
            *polls += 1;
            match handle.poll().await? {
                PollStatus::Succeeded => return Ok(()),
                PollStatus::Failed(e) => return Err(e),
                PollStatus::Pending => {
                    let delay = handle
                        .retry_after()
                        .unwrap_or(self.settings.interval)
                        .min(self.settings.max_interval);
                    tracing::debug!("Operation pending, polling again in {:?}", delay);
                    sleep(delay).await;
                }
            }
        }
    }
}
