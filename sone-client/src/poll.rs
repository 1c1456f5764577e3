use std::time::Duration;

use anyhow::Context;

use crate::{
    api::{SoneId, SoneStatus},
    Backend, Sleeper, SoneView, StatusView,
};

// Delay between a sone starting to be watched and its first status fetch
const INITIAL_DELAY_SECS: u64 = 5;
// Poll interval for sones being modified, inserted or downloaded
const BUSY_INTERVAL_SECS: u64 = 5;
// Poll interval for all other sones
const IDLE_INTERVAL_SECS: u64 = 60;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PollConfig {
    pub initial_delay: Duration,
    pub busy_interval: Duration,
    pub idle_interval: Duration,
}

impl Default for PollConfig {
    fn default() -> PollConfig {
        PollConfig {
            initial_delay: Duration::from_secs(INITIAL_DELAY_SECS),
            busy_interval: Duration::from_secs(BUSY_INTERVAL_SECS),
            idle_interval: Duration::from_secs(IDLE_INTERVAL_SECS),
        }
    }
}

impl PollConfig {
    /// Time to wait after having fetched `status` before fetching again
    pub fn interval_for(&self, status: &SoneStatus) -> Duration {
        match status.is_busy() {
            true => self.busy_interval,
            false => self.idle_interval,
        }
    }
}

/// Poll interval with the default configuration
pub fn poll_interval(status: &SoneStatus) -> Duration {
    PollConfig::default().interval_for(status)
}

/// Polling loop of a single sone
pub struct Poller<'a, B: ?Sized, V: ?Sized, S: ?Sized> {
    backend: &'a B,
    view: &'a V,
    sleeper: &'a S,
    config: &'a PollConfig,
}

impl<'a, B, V, S> Poller<'a, B, V, S>
where
    B: Backend + ?Sized,
    V: StatusView + ?Sized,
    S: Sleeper + ?Sized,
{
    pub fn new(backend: &'a B, view: &'a V, sleeper: &'a S, config: &'a PollConfig) -> Self {
        Poller {
            backend,
            view,
            sleeper,
            config,
        }
    }

    /// Polls forever, unless a fetch fails: there is no retry, the loop just
    /// ends
    pub async fn run(&self, sone: SoneId) {
        let mut view = SoneView::new(sone);
        self.sleeper.sleep(self.config.initial_delay).await;
        loop {
            let status = match self.fetch_status(&view.id).await {
                Ok(status) => status,
                Err(err) => {
                    tracing::warn!(sone = %view.id, ?err, "status fetch failed, stopped polling");
                    return;
                }
            };
            let next = self.config.interval_for(&status);
            self.reconcile(&mut view, status);
            self.schedule_next(&view.id, next).await;
        }
    }

    async fn fetch_status(&self, sone: &SoneId) -> anyhow::Result<SoneStatus> {
        self.backend
            .get_sone_status(sone)
            .await
            .with_context(|| format!("fetching status of sone {sone}"))
    }

    fn reconcile(&self, view: &mut SoneView, status: SoneStatus) {
        view.apply(status);
        self.view.render_sone(view);
    }

    async fn schedule_next(&self, sone: &SoneId, d: Duration) {
        tracing::trace!(%sone, secs = d.as_secs(), "scheduling next status fetch");
        self.sleeper.sleep(d).await
    }
}
