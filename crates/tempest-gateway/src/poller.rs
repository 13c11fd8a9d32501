//! Update loop: fetch -> normalize -> append, once per interval.
//!
//! No cycle failure is fatal. Errors and panics inside a cycle are caught,
//! logged and counted, and the loop waits for the next tick. The loop exits
//! when the shutdown signal fires, whether it is sleeping or mid-fetch.
//! Appends are synchronous so a cancelled cycle never leaves a partial write.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use futures_util::FutureExt;
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;

use tempest_core::error::Result;
use tempest_core::normalize;

use crate::obs::metrics::GatewayMetrics;
use crate::store::ObservationStore;
use crate::upstream::ObservationSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// A record was appended and published as latest.
    Stored,
    /// The response had no observations; nothing changed.
    Skipped,
    /// Fetch or decode failed; nothing changed.
    Failed,
}

impl CycleOutcome {
    pub fn as_str(self) -> &'static str {
        match self {
            CycleOutcome::Stored => "stored",
            CycleOutcome::Skipped => "skipped",
            CycleOutcome::Failed => "failed",
        }
    }
}

pub struct Poller {
    source: Arc<dyn ObservationSource>,
    store: Arc<ObservationStore>,
    metrics: Arc<GatewayMetrics>,
    interval: Duration,
}

impl Poller {
    pub fn new(
        source: Arc<dyn ObservationSource>,
        store: Arc<ObservationStore>,
        metrics: Arc<GatewayMetrics>,
        interval: Duration,
    ) -> Self {
        Self {
            source,
            store,
            metrics,
            interval,
        }
    }

    /// Run until `shutdown` fires (or its sender is dropped).
    /// The first cycle starts immediately.
    pub async fn run(self, mut shutdown: watch::Receiver<()>) {
        let mut tick = tokio::time::interval(self.interval);
        tick.set_missed_tick_behavior(MissedTickBehavior::Delay);

        tracing::info!(
            interval_secs = self.interval.as_secs_f64(),
            capacity = self.store.capacity(),
            "poller started"
        );

        loop {
            tokio::select! {
                _ = tick.tick() => {}
                _ = shutdown.changed() => break,
            }

            tokio::select! {
                outcome = self.run_cycle() => {
                    tracing::debug!(outcome = outcome.as_str(), "poll cycle finished");
                }
                _ = shutdown.changed() => break,
            }
        }

        tracing::info!("poller stopped");
    }

    /// One fetch-normalize-store pass. Never panics, never returns an error.
    pub async fn run_cycle(&self) -> CycleOutcome {
        let outcome = match AssertUnwindSafe(self.cycle()).catch_unwind().await {
            Ok(Ok(outcome)) => outcome,
            Ok(Err(e)) => {
                let code = e.client_code().as_str();
                self.metrics.fetch_errors.inc(&[("code", code)]);
                tracing::warn!(error = %e, code, "poll cycle failed");
                CycleOutcome::Failed
            }
            Err(_) => {
                self.metrics.fetch_errors.inc(&[("code", "PANIC")]);
                tracing::error!("poll cycle panicked");
                CycleOutcome::Failed
            }
        };

        self.metrics.poll_cycles.inc(&[("outcome", outcome.as_str())]);
        outcome
    }

    async fn cycle(&self) -> Result<CycleOutcome> {
        let started = Instant::now();
        let fetched = self.source.fetch().await;
        self.metrics.fetch_duration.observe(started.elapsed());
        let raw = fetched?;

        let Some(record) = normalize(&raw, Utc::now()) else {
            tracing::warn!(
                fields = raw.ob_fields.len(),
                "response carried no observations; keeping previous latest"
            );
            return Ok(CycleOutcome::Skipped);
        };

        let temperature = record.temperature;
        if self.store.append(record).is_some() {
            tracing::trace!("history full; evicted oldest record");
        }
        self.metrics.history_len.set(self.store.len());
        tracing::info!(temperature, records = self.store.len(), "observation stored");

        Ok(CycleOutcome::Stored)
    }
}
