use anyhow::{anyhow, Result};
use async_trait::async_trait;
use log::{debug, info, warn};
use std::sync::Arc;
use std::time::Duration;
use tokio::select;
use tokio::sync::mpsc;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

/// Work performed on every refresh tick
#[async_trait]
pub trait RefreshTarget: Send + Sync {
    async fn on_refresh_tick(&self);
}

/// Recurring background task that re-quotes on a fixed period.
///
/// At most one task runs per service. Dropping the service closes the stop
/// channel, which ends the task.
pub struct QuoteRefreshService {
    period: Duration,
    stop_tx: Option<mpsc::Sender<()>>,
}

impl QuoteRefreshService {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            stop_tx: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.stop_tx.as_ref().is_some_and(|tx| !tx.is_closed())
    }

    /// Spawn the refresh task; the first tick fires one period from now
    pub fn start(&mut self, target: Arc<dyn RefreshTarget>) -> Result<()> {
        if self.is_running() {
            warn!("Quote refresh service is already running");
            return Ok(());
        }

        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|e| anyhow!("Quote refresh requires a Tokio runtime: {}", e))?;

        let (stop_tx, mut stop_rx) = mpsc::channel::<()>(1);
        self.stop_tx = Some(stop_tx);

        let period = self.period;
        let first_tick = Instant::now() + period;

        runtime.spawn(async move {
            let mut interval = interval_at(first_tick, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut last_run = Instant::now();

            loop {
                select! {
                    _ = interval.tick() => {
                        debug!("Refreshing quote (last run: {:.2?} ago)", last_run.elapsed());
                        target.on_refresh_tick().await;
                        last_run = Instant::now();
                    }
                    // Explicit stop or the service was dropped
                    _ = stop_rx.recv() => {
                        debug!("Quote refresh task exiting");
                        break;
                    }
                }
            }
        });

        info!("Quote refresh started (every {:?})", self.period);
        Ok(())
    }

    pub fn stop(&mut self) {
        if let Some(tx) = self.stop_tx.take() {
            let _ = tx.try_send(());
            info!("Quote refresh stopped");
        }
    }
}

impl Drop for QuoteRefreshService {
    fn drop(&mut self) {
        self.stop();
    }
}
