//! Background reaper for idle-expired session tokens
//!
//! This module provides the recurring sweep that deletes tokens unused
//! beyond the expiry window. The sweep runs decoupled from request
//! handling; failures are logged and retried on the next tick, never
//! propagated to the host process.

use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::{Duration, Utc};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::domain::entities::session_token::DEFAULT_EXPIRY_WINDOW_DAYS;
use crate::errors::DomainError;
use crate::repositories::SessionTokenRepository;

use sk_shared::SessionPolicy;

/// Configuration for the session reaper
#[derive(Debug, Clone)]
pub struct ReaperConfig {
    /// How often to sweep (in seconds)
    pub interval_seconds: u64,
    /// Sliding expiry window the sweep enforces
    pub expiry_window: Duration,
    /// Whether the background sweep is enabled
    pub enabled: bool,
}

impl Default for ReaperConfig {
    fn default() -> Self {
        Self {
            interval_seconds: 3600, // Run every hour
            expiry_window: Duration::days(DEFAULT_EXPIRY_WINDOW_DAYS),
            enabled: true,
        }
    }
}

impl From<&SessionPolicy> for ReaperConfig {
    fn from(policy: &SessionPolicy) -> Self {
        Self {
            interval_seconds: policy.sweep_interval_seconds,
            expiry_window: Duration::days(policy.expiry_window_days),
            enabled: true,
        }
    }
}

/// Service that periodically deletes idle-expired session tokens
pub struct SessionReaper<R: SessionTokenRepository + 'static> {
    repository: Arc<R>,
    config: ReaperConfig,
}

impl<R: SessionTokenRepository> SessionReaper<R> {
    /// Create a new session reaper
    pub fn new(repository: Arc<R>, config: ReaperConfig) -> Self {
        Self { repository, config }
    }

    /// Run a single sweep, deleting tokens idle past the expiry window
    ///
    /// The expiry predicate is evaluated against current storage state in
    /// one scoped delete, so a token refreshed concurrently with the sweep
    /// survives. Running with no expired tokens present is a safe no-op.
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of tokens reaped
    /// * `Err(DomainError)` - Storage failure; the background loop logs it
    ///   and retries on the next tick
    pub async fn sweep(&self) -> Result<usize, DomainError> {
        let cutoff = Utc::now() - self.config.expiry_window;
        let deleted = self.repository.delete_unused_since(cutoff).await?;

        if deleted > 0 {
            info!(deleted, "reaped idle-expired session tokens");
        }
        Ok(deleted)
    }

    /// Start the reaper as a background task
    ///
    /// Spawns a tokio task sweeping at the configured cadence. The first
    /// sweep happens one full interval after start. Sweep failures are
    /// contained: logged and retried on the next scheduled tick. A sweep
    /// already in flight always runs to completion; the returned handle
    /// stops the task between sweeps.
    pub fn start(self: Arc<Self>) -> ReaperHandle {
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);

        if !self.config.enabled {
            warn!("session reaper is disabled");
            return ReaperHandle {
                shutdown: shutdown_tx,
                task: None,
            };
        }

        let interval = StdDuration::from_secs(self.config.interval_seconds);

        let task = tokio::spawn(async move {
            info!(
                interval_seconds = self.config.interval_seconds,
                "session reaper started"
            );

            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            // An interval's first tick completes immediately; consume it so
            // the first sweep waits a full period.
            ticker.tick().await;

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        if let Err(e) = self.sweep().await {
                            error!("session sweep failed: {}", e);
                        }
                    }
                    _ = shutdown_rx.changed() => {
                        info!("session reaper stopping");
                        break;
                    }
                }
            }
        });

        ReaperHandle {
            shutdown: shutdown_tx,
            task: Some(task),
        }
    }
}

/// Handle controlling the background reaper task
///
/// Dropping the handle also stops the reaper: the task observes the closed
/// shutdown channel on its next poll.
pub struct ReaperHandle {
    shutdown: watch::Sender<bool>,
    task: Option<JoinHandle<()>>,
}

impl ReaperHandle {
    /// Signal the reaper to stop and wait for the task to finish
    ///
    /// A sweep already in flight runs to completion before the task exits.
    pub async fn shutdown(mut self) {
        let _ = self.shutdown.send(true);
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }

    /// Whether a background task was actually spawned
    pub fn is_running(&self) -> bool {
        self.task.is_some()
    }
}
